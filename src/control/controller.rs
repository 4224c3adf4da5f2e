//! Discord stream selection and mute control

use serde::Serialize;
use std::sync::Arc;

use super::matcher::StreamMatcher;
use crate::audio::{AudioTool, Pactl, StreamInventory, StreamKind, StreamRecord};
use crate::config::AudioConfig;

const NONE_FOUND: &str = "No Discord streams found";
const UNKNOWN_APP: &str = "Unknown";

/// Mute state requested by an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MuteAction {
    Muted,
    Unmuted,
}

impl MuteAction {
    pub fn from_muted(muted: bool) -> Self {
        if muted {
            MuteAction::Muted
        } else {
            MuteAction::Unmuted
        }
    }

    pub fn is_mute(self) -> bool {
        self == MuteAction::Muted
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MuteAction::Muted => "muted",
            MuteAction::Unmuted => "unmuted",
        }
    }
}

/// A matched stream as shown by the status endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamView {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: StreamKind,
    pub app_name: String,
    pub muted: bool,
    pub volume: Option<u32>,
}

impl From<&StreamRecord> for StreamView {
    fn from(stream: &StreamRecord) -> Self {
        Self {
            id: stream.id.clone(),
            kind: stream.kind,
            app_name: display_name(stream).to_string(),
            muted: stream.muted,
            volume: stream.volume,
        }
    }
}

/// Result of `get_status`
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub success: bool,
    pub found: bool,
    pub message: String,
    pub streams: Vec<StreamView>,
}

/// Outcome of muting or unmuting one stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MuteActionResult {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: StreamKind,
    pub app_name: String,
    #[serde(rename = "success")]
    pub succeeded: bool,
    pub action: MuteAction,
}

/// Aggregate outcome of a bulk mute, unmute or toggle
#[derive(Debug, Clone, Serialize)]
pub struct OperationSummary {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<MuteAction>,
    pub streams_affected: usize,
    pub total_streams: usize,
    pub results: Vec<MuteActionResult>,
}

impl OperationSummary {
    /// Nothing matched, nothing attempted
    pub fn none_found() -> Self {
        Self {
            success: false,
            message: NONE_FOUND.to_string(),
            action: None,
            streams_affected: 0,
            total_streams: 0,
            results: Vec::new(),
        }
    }
}

/// Finds Discord's streams and drives their mute state.
///
/// Holds no per-request state: every call takes a fresh snapshot from the
/// audio server, so one instance can serve all requests.
#[derive(Clone)]
pub struct MuteController {
    inventory: StreamInventory,
    matcher: StreamMatcher,
}

impl MuteController {
    pub fn new(tool: Arc<dyn AudioTool>, matcher: StreamMatcher) -> Self {
        Self {
            inventory: StreamInventory::new(tool),
            matcher,
        }
    }

    /// Controller driving `config.tool` with `config.app_patterns`
    pub fn from_config(config: &AudioConfig) -> Self {
        Self::new(
            Arc::new(Pactl::new(config.tool.as_str())),
            StreamMatcher::new(&config.app_patterns),
        )
    }

    /// Matching playback streams followed by matching recording streams
    pub fn find_matching_streams(&self) -> Vec<StreamRecord> {
        self.inventory
            .list_playback_streams()
            .into_iter()
            .chain(self.inventory.list_recording_streams())
            .filter(|stream| self.matcher.matches(stream))
            .collect()
    }

    pub fn get_status(&self) -> StatusReport {
        let streams = self.find_matching_streams();

        if streams.is_empty() {
            return StatusReport {
                success: true,
                found: false,
                message: NONE_FOUND.to_string(),
                streams: Vec::new(),
            };
        }

        StatusReport {
            success: true,
            found: true,
            message: format!("Found {} Discord streams", streams.len()),
            streams: streams.iter().map(StreamView::from).collect(),
        }
    }

    /// Mute (`true`) or unmute (`false`) every matching stream
    pub fn set_mute(&self, mute_on: bool) -> OperationSummary {
        let streams = self.find_matching_streams();
        if streams.is_empty() {
            return OperationSummary::none_found();
        }
        self.apply(&streams, MuteAction::from_muted(mute_on))
    }

    /// Flip every matching stream to the opposite of the first one's state
    pub fn toggle_mute(&self) -> OperationSummary {
        let streams = self.find_matching_streams();
        let Some(first) = streams.first() else {
            return OperationSummary::none_found();
        };
        self.apply(&streams, MuteAction::from_muted(!first.muted))
    }

    fn apply(&self, streams: &[StreamRecord], action: MuteAction) -> OperationSummary {
        let mut results = Vec::with_capacity(streams.len());

        for stream in streams {
            if stream.id.is_empty() {
                tracing::debug!("Skipping {} stream without an index", stream.kind);
                continue;
            }

            let succeeded = match self.inventory.set_stream_mute(stream, action.is_mute()) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(
                        "Failed to set {} {} {}: {}",
                        stream.kind.object_name(),
                        stream.id,
                        action.as_str(),
                        e
                    );
                    false
                }
            };

            results.push(MuteActionResult {
                id: stream.id.clone(),
                kind: stream.kind,
                app_name: display_name(stream).to_string(),
                succeeded,
                action,
            });
        }

        let affected = results.iter().filter(|r| r.succeeded).count();
        let total = streams.len();
        tracing::info!("{} {}/{} Discord streams", action.as_str(), affected, total);

        OperationSummary {
            success: affected > 0,
            message: format!("Successfully {} {}/{} streams", action.as_str(), affected, total),
            action: Some(action),
            streams_affected: affected,
            total_streams: total,
            results,
        }
    }
}

fn display_name(stream: &StreamRecord) -> &str {
    stream.app_name.as_deref().unwrap_or(UNKNOWN_APP)
}
