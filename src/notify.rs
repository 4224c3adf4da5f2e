//! Desktop notifications

use std::process::Command;

use crate::config::NotifyConfig;

const NOTIFY_PROGRAM: &str = "notify-send";

/// Send the startup notification if enabled.
///
/// Best effort: a missing notification daemon only produces a warning.
pub fn send_startup_notification(config: &NotifyConfig) {
    if !config.enabled {
        return;
    }

    match Command::new(NOTIFY_PROGRAM)
        .arg(&config.title)
        .arg(&config.message)
        .status()
    {
        Ok(status) if status.success() => {
            tracing::debug!("Startup notification sent");
        }
        Ok(status) => {
            tracing::warn!("{} exited with {}", NOTIFY_PROGRAM, status);
        }
        Err(e) => {
            tracing::warn!("Could not run {}: {}", NOTIFY_PROGRAM, e);
        }
    }
}
