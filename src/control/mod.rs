//! Discord stream selection and mute control

pub mod controller;
pub mod matcher;

pub use controller::{
    MuteAction, MuteActionResult, MuteController, OperationSummary, StatusReport, StreamView,
};
pub use matcher::StreamMatcher;
