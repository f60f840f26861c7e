//! Scripted executor standing in for `mtx` in tests.

use crate::error::{Result, RustMtxError};
use super::executor::{render, CommandExecutor};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Default)]
struct Script {
    report: String,
    calls: Vec<String>,
    failure: Option<String>,
    delay: Option<Duration>,
}

/// Replays a fixed status report and records every invocation.
/// Clones share the same script.
#[derive(Clone, Default)]
pub(crate) struct ScriptedExecutor {
    script: Arc<Mutex<Script>>,
    active: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl ScriptedExecutor {
    pub(crate) fn with_report(report: &str) -> Self {
        let exec = Self::default();
        exec.set_report(report);
        exec
    }

    pub(crate) fn set_report(&self, report: &str) {
        self.script.lock().report = report.to_string();
    }

    /// Make the next invocation fail with the given diagnostic.
    pub(crate) fn fail_next(&self, diagnostic: &str) {
        self.script.lock().failure = Some(diagnostic.to_string());
    }

    pub(crate) fn set_delay(&self, delay: Duration) {
        self.script.lock().delay = Some(delay);
    }

    /// Arguments of each invocation, space separated.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.script.lock().calls.clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.script.lock().calls.clear();
    }

    /// Highest number of invocations observed running at once.
    pub(crate) fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl CommandExecutor for ScriptedExecutor {
    fn execute(&self, command: &str, device: &str, args: &[&str]) -> Result<String> {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        let (delay, failure, report) = {
            let mut script = self.script.lock();
            script.calls.push(args.join(" "));
            (script.delay, script.failure.take(), script.report.clone())
        };
        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }
        self.active.fetch_sub(1, Ordering::SeqCst);

        if let Some(diagnostic) = failure {
            return Err(RustMtxError::ExternalCommandFailed {
                command: render(command, device, args),
                diagnostic,
            });
        }
        match args.first() {
            Some(&"status") => Ok(report),
            _ => Ok(String::new()),
        }
    }
}
