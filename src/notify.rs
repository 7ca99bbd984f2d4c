// src/notify.rs
// Best-effort desktop notification delivery. Failures are logged and
// swallowed; nothing here may fail the check-notify run.

use std::process::Command;

pub const ENV_NOTIFY_HELPER: &str = "SCOREBAR_NOTIFY_CMD";
const DEFAULT_HELPER: &str = "notify-send";

/// Shells out to a `notify-send`-style helper with a title and a body.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    program: String,
}

impl DesktopNotifier {
    /// Helper from `SCOREBAR_NOTIFY_CMD`, defaulting to `notify-send`.
    pub fn from_env() -> Self {
        let program =
            std::env::var(ENV_NOTIFY_HELPER).unwrap_or_else(|_| DEFAULT_HELPER.to_string());
        Self { program }
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn send(&self, title: &str, body: &str) {
        match Command::new(&self.program).arg(title).arg(body).status() {
            Ok(status) if status.success() => {}
            Ok(status) => {
                tracing::warn!(code = ?status.code(), program = %self.program, "notification helper exited nonzero");
            }
            Err(e) => {
                tracing::warn!(error = ?e, program = %self.program, "failed to launch notification helper");
            }
        }
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::from_env()
    }
}
