//! Stream records and the `pactl list` output parser

use serde::Serialize;

/// Which listing a stream came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    /// Sink input: audio the application plays
    Playback,
    /// Source output: audio the application records
    Recording,
}

impl StreamKind {
    /// Object name used in tool arguments
    pub fn object_name(self) -> &'static str {
        match self {
            StreamKind::Playback => "sink-input",
            StreamKind::Recording => "source-output",
        }
    }

    /// Argument to `list`
    pub fn list_target(self) -> &'static str {
        match self {
            StreamKind::Playback => "sink-inputs",
            StreamKind::Recording => "source-outputs",
        }
    }

    /// Per-stream mute command
    pub fn mute_command(self) -> &'static str {
        match self {
            StreamKind::Playback => "set-sink-input-mute",
            StreamKind::Recording => "set-source-output-mute",
        }
    }

    /// Line prefix that opens a record in the listing
    pub fn record_marker(self) -> &'static str {
        match self {
            StreamKind::Playback => "Sink Input #",
            StreamKind::Recording => "Source Output #",
        }
    }

    /// Display name
    pub fn as_str(self) -> &'static str {
        match self {
            StreamKind::Playback => "playback",
            StreamKind::Recording => "recording",
        }
    }
}

impl std::fmt::Display for StreamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One stream as reported by the audio server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamRecord {
    /// Server-assigned index; empty if the marker line had none
    pub id: String,
    pub kind: StreamKind,
    pub app_name: Option<String>,
    pub muted: bool,
    /// Percentage, playback streams only
    pub volume: Option<u32>,
}

impl StreamRecord {
    pub fn new(id: impl Into<String>, kind: StreamKind) -> Self {
        Self {
            id: id.into(),
            kind,
            app_name: None,
            muted: false,
            volume: None,
        }
    }
}

const APP_NAME_KEY: &str = "application.name";
const APP_NAME_PREFIX: &str = "application.name = \"";

/// Parse the output of `pactl list sink-inputs` / `pactl list source-outputs`.
///
/// The format is human-readable text with no stability guarantee, so lines
/// that are not understood are skipped rather than treated as errors.
pub fn parse_listing(output: &str, kind: StreamKind) -> Vec<StreamRecord> {
    let marker = kind.record_marker();
    let mut records = Vec::new();
    let mut current: Option<StreamRecord> = None;

    for line in output.lines().map(str::trim) {
        if line.starts_with(marker) {
            records.extend(current.take());
            current = Some(StreamRecord::new(parse_id(line), kind));
            continue;
        }

        // Properties before the first marker have no record to attach to
        let Some(record) = current.as_mut() else {
            continue;
        };

        if line.contains(APP_NAME_KEY) {
            if let Some(name) = parse_app_name(line) {
                record.app_name = Some(name.to_string());
            }
        } else if line.starts_with("Mute:") {
            record.muted = line.to_lowercase().contains("yes");
        } else if kind == StreamKind::Playback && line.starts_with("Volume:") {
            if let Some(volume) = parse_volume_percent(line) {
                record.volume = Some(volume);
            }
        }
    }

    records.extend(current);
    records
}

/// Digits following the first `#` that has any
fn parse_id(line: &str) -> String {
    line.match_indices('#')
        .map(|(pos, _)| leading_digits(&line[pos + 1..]))
        .find(|digits| !digits.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Value of `application.name = "<value>"`
fn parse_app_name(line: &str) -> Option<&str> {
    let start = line.find(APP_NAME_PREFIX)? + APP_NAME_PREFIX.len();
    let rest = &line[start..];
    let end = rest.find('"')?;
    Some(&rest[..end])
}

/// First integer written directly before a `%`
fn parse_volume_percent(line: &str) -> Option<u32> {
    line.match_indices('%').find_map(|(pos, _)| {
        let before = &line[..pos];
        let run = before.chars().rev().take_while(char::is_ascii_digit).count();
        let digits = &before[before.len() - run..];
        if digits.is_empty() {
            None
        } else {
            digits.parse().ok()
        }
    })
}

fn leading_digits(s: &str) -> &str {
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    &s[..end]
}
