//! Changer Command Execution
//!
//! The boundary between the inventory model and the `mtx` program.

use crate::error::{Result, RustMtxError};
use std::process::Command;
use tracing::debug;

/// Runs one changer-control command against a device.
pub trait CommandExecutor: Send + Sync {
    /// Invoke `command -f device args...` and return its standard output.
    fn execute(&self, command: &str, device: &str, args: &[&str]) -> Result<String>;
}

/// Executor spawning the real changer-control program
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

impl CommandExecutor for ProcessExecutor {
    fn execute(&self, command: &str, device: &str, args: &[&str]) -> Result<String> {
        let rendered = render(command, device, args);
        debug!("Running: {}", rendered);

        let output = Command::new(command)
            .arg("-f")
            .arg(device)
            .args(args)
            .output()
            .map_err(|e| RustMtxError::ExternalCommandFailed {
                command: rendered.clone(),
                diagnostic: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!("{} exited with {}", rendered, output.status);
            return Err(RustMtxError::ExternalCommandFailed {
                command: rendered,
                diagnostic: trim_diagnostic(&stderr).to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Command line as it would be typed
pub fn render(command: &str, device: &str, args: &[&str]) -> String {
    let mut line = format!("{} -f {}", command, device);
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

fn trim_diagnostic(stderr: &str) -> &str {
    stderr.strip_suffix('\n').unwrap_or(stderr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_command_line() {
        assert_eq!(
            render("mtx", "/dev/sg3", &["load", "3", "1"]),
            "mtx -f /dev/sg3 load 3 1"
        );
        assert_eq!(render("mtx", "/dev/sg3", &[]), "mtx -f /dev/sg3");
    }

    #[test]
    fn test_trim_single_trailing_newline() {
        assert_eq!(trim_diagnostic("Drive 1 Full\n"), "Drive 1 Full");
        assert_eq!(trim_diagnostic("a\n\n"), "a\n");
        assert_eq!(trim_diagnostic("plain"), "plain");
    }

    #[cfg(unix)]
    #[test]
    fn test_process_executor_passes_device_flag() {
        let out = ProcessExecutor.execute("echo", "/dev/sg3", &["status"]).unwrap();
        assert_eq!(out, "-f /dev/sg3 status\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_process_executor_reports_failure() {
        let err = ProcessExecutor.execute("false", "/dev/sg3", &[]).unwrap_err();
        match err {
            RustMtxError::ExternalCommandFailed { command, .. } => {
                assert_eq!(command, "false -f /dev/sg3");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_process_executor_spawn_failure() {
        let err = ProcessExecutor
            .execute("rustmtx-no-such-binary", "/dev/sg3", &["status"])
            .unwrap_err();
        assert!(matches!(err, RustMtxError::ExternalCommandFailed { .. }));
    }
}
