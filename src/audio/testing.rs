//! Fake audio tools for tests

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use super::stream::StreamKind;
use super::tool::AudioTool;
use crate::error::ToolError;

fn failure(command: String) -> ToolError {
    ToolError::Failed {
        command,
        status: "exit status: 1".to_string(),
        stderr: "Failure: No such entity".to_string(),
    }
}

/// Replies with canned output per command line; unknown commands succeed
/// with empty output.
#[derive(Default)]
pub struct ScriptedTool {
    responses: HashMap<String, Option<String>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, command: &str, output: &str) -> Self {
        self.responses
            .insert(command.to_string(), Some(output.to_string()));
        self
    }

    pub fn fail(mut self, command: &str) -> Self {
        self.responses.insert(command.to_string(), None);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl AudioTool for ScriptedTool {
    fn run(&self, args: &[&str]) -> Result<String, ToolError> {
        let command = args.join(" ");
        self.calls.lock().unwrap().push(command.clone());

        match self.responses.get(&command) {
            Some(Some(output)) => Ok(output.clone()),
            Some(None) => Err(failure(command)),
            None => Ok(String::new()),
        }
    }
}

#[derive(Debug, Clone)]
struct FakeStream {
    kind: StreamKind,
    id: String,
    app_name: Option<String>,
    muted: bool,
}

/// A tiny stateful audio server: renders `list` output from its streams and
/// applies mute commands to them.
#[derive(Default)]
pub struct FakePulse {
    streams: Mutex<Vec<FakeStream>>,
    failing_ids: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl FakePulse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stream(self, kind: StreamKind, id: &str, app_name: &str, muted: bool) -> Self {
        self.push(kind, id, Some(app_name), muted)
    }

    pub fn with_unnamed_stream(self, kind: StreamKind, id: &str) -> Self {
        self.push(kind, id, None, false)
    }

    /// Mute commands for `id` exit non-zero
    pub fn fail_mute(mut self, id: &str) -> Self {
        self.failing_ids.insert(id.to_string());
        self
    }

    pub fn is_muted(&self, kind: StreamKind, id: &str) -> Option<bool> {
        self.streams
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.kind == kind && s.id == id)
            .map(|s| s.muted)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn push(self, kind: StreamKind, id: &str, app_name: Option<&str>, muted: bool) -> Self {
        self.streams.lock().unwrap().push(FakeStream {
            kind,
            id: id.to_string(),
            app_name: app_name.map(str::to_string),
            muted,
        });
        self
    }

    fn render(&self, kind: StreamKind) -> String {
        let mut output = String::new();
        for stream in self.streams.lock().unwrap().iter().filter(|s| s.kind == kind) {
            output.push_str(&format!("{}{}\n", kind.record_marker(), stream.id));
            output.push_str("\tDriver: protocol-native.c\n");
            output.push_str(&format!(
                "\tMute: {}\n",
                if stream.muted { "yes" } else { "no" }
            ));
            output.push_str("\tVolume: front-left: 65536 / 100% / 0.00 dB\n");
            output.push_str("\tProperties:\n");
            if let Some(name) = &stream.app_name {
                output.push_str(&format!("\t\tapplication.name = \"{}\"\n", name));
            }
            output.push('\n');
        }
        output
    }
}

impl AudioTool for FakePulse {
    fn run(&self, args: &[&str]) -> Result<String, ToolError> {
        let command = args.join(" ");
        self.calls.lock().unwrap().push(command.clone());

        let kinds = [StreamKind::Playback, StreamKind::Recording];
        match args {
            ["list", target] => kinds
                .into_iter()
                .find(|k| k.list_target() == *target)
                .map(|k| self.render(k))
                .ok_or_else(|| failure(command)),
            [verb, id, flag] => {
                let kind = kinds
                    .into_iter()
                    .find(|k| k.mute_command() == *verb)
                    .ok_or_else(|| failure(command.clone()))?;
                if self.failing_ids.contains(*id) {
                    return Err(failure(command));
                }
                let mut streams = self.streams.lock().unwrap();
                let stream = streams
                    .iter_mut()
                    .find(|s| s.kind == kind && s.id == *id)
                    .ok_or_else(|| failure(command))?;
                stream.muted = *flag == "1";
                Ok(String::new())
            }
            _ => Err(failure(command)),
        }
    }
}
