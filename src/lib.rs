//! # Deafen Server
//!
//! HTTP control surface that finds Discord's audio streams on a PulseAudio
//! server and mutes or unmutes them.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────┐   POST /toggle   ┌─────────────────────────────────────┐
//! │ HTTP client  │ ───────────────▶ │ server (axum router, CORS, tracing) │
//! └──────────────┘                  └──────────────────┬──────────────────┘
//!                                                      │ spawn_blocking
//!                                                      ▼
//!                                   ┌─────────────────────────────────────┐
//!                                   │ control::MuteController             │
//!                                   │   StreamMatcher (name patterns)     │
//!                                   └──────────────────┬──────────────────┘
//!                                                      │
//!                                                      ▼
//!                                   ┌─────────────────────────────────────┐
//!                                   │ audio::StreamInventory              │
//!                                   │   parse `pactl list ...` output     │
//!                                   └──────────────────┬──────────────────┘
//!                                                      │ subprocess
//!                                                      ▼
//!                                              pactl / PulseAudio
//! ```

pub mod audio;
pub mod config;
pub mod control;
pub mod error;
pub mod notify;
pub mod server;

pub use error::{Error, Result};

/// Application-wide constants
pub mod constants {
    /// Service name reported by the index endpoint
    pub const SERVICE_NAME: &str = "Discord Audio Controller";

    /// Version reported by the index endpoint
    pub const SERVICE_VERSION: &str = "1.0.0";

    /// Default HTTP bind address
    pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 18498;

    /// Default audio-control tool
    pub const DEFAULT_AUDIO_TOOL: &str = "pactl";

    /// Application names that identify Discord streams (matched case-insensitively)
    pub const DISCORD_PATTERNS: [&str; 4] =
        ["webrtc voiceengine", "discord", "playstream", "recstream"];
}
