//! External audio-control tool invocation
//!
//! Everything the crate knows about the audio server comes from running the
//! control tool with a fixed argument list and reading its stdout.

use std::io::ErrorKind;
use std::process::Command;

use crate::constants::DEFAULT_AUDIO_TOOL;
use crate::error::ToolError;

/// A command-line audio-control tool
pub trait AudioTool: Send + Sync {
    /// Run the tool with `args`, returning stdout on a zero exit status
    fn run(&self, args: &[&str]) -> Result<String, ToolError>;
}

/// `pactl`, or any program with the same command-line interface
#[derive(Debug, Clone)]
pub struct Pactl {
    program: String,
}

impl Pactl {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for Pactl {
    fn default() -> Self {
        Self::new(DEFAULT_AUDIO_TOOL)
    }
}

impl AudioTool for Pactl {
    fn run(&self, args: &[&str]) -> Result<String, ToolError> {
        let command = format!("{} {}", self.program, args.join(" "));
        tracing::debug!("Running {}", command);

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound => ToolError::NotFound {
                    program: self.program.clone(),
                },
                _ => ToolError::Spawn {
                    program: self.program.clone(),
                    source,
                },
            })?;

        if !output.status.success() {
            return Err(ToolError::Failed {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
