//! Stream inventory: listing and muting streams through the audio tool

use std::sync::Arc;

use super::stream::{parse_listing, StreamKind, StreamRecord};
use super::tool::AudioTool;
use crate::error::ToolError;

/// Queries the audio server for its current playback and recording streams
#[derive(Clone)]
pub struct StreamInventory {
    tool: Arc<dyn AudioTool>,
}

impl StreamInventory {
    pub fn new(tool: Arc<dyn AudioTool>) -> Self {
        Self { tool }
    }

    /// List streams of one kind.
    ///
    /// `Ok(vec![])` means the server has no such streams; `Err` means the
    /// tool could not be queried at all.
    pub fn try_list_streams(&self, kind: StreamKind) -> Result<Vec<StreamRecord>, ToolError> {
        let output = self.tool.run(&["list", kind.list_target()])?;
        let records = parse_listing(&output, kind);
        tracing::debug!("Found {} {} streams", records.len(), kind);
        Ok(records)
    }

    /// List streams of one kind, treating a failed query as "no streams"
    pub fn list_streams(&self, kind: StreamKind) -> Vec<StreamRecord> {
        match self.try_list_streams(kind) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Could not list {} streams: {}", kind, e);
                Vec::new()
            }
        }
    }

    pub fn try_list_playback_streams(&self) -> Result<Vec<StreamRecord>, ToolError> {
        self.try_list_streams(StreamKind::Playback)
    }

    pub fn try_list_recording_streams(&self) -> Result<Vec<StreamRecord>, ToolError> {
        self.try_list_streams(StreamKind::Recording)
    }

    /// Sink inputs
    pub fn list_playback_streams(&self) -> Vec<StreamRecord> {
        self.list_streams(StreamKind::Playback)
    }

    /// Source outputs
    pub fn list_recording_streams(&self) -> Vec<StreamRecord> {
        self.list_streams(StreamKind::Recording)
    }

    /// Set the mute flag of a single stream
    pub fn set_stream_mute(&self, stream: &StreamRecord, muted: bool) -> Result<(), ToolError> {
        let flag = if muted { "1" } else { "0" };
        self.tool
            .run(&[stream.kind.mute_command(), stream.id.as_str(), flag])
            .map(|_| ())
    }
}
