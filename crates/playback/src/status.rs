use std::sync::Mutex;

use tracing::info;

/// Collaborator-facing sink for session state messages.
pub trait StatusSink: Send + Sync {
    fn status(&self, message: &str);
}

/// Routes status lines to the tracing subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingStatusSink;

impl StatusSink for TracingStatusSink {
    fn status(&self, message: &str) {
        info!("{message}");
    }
}

/// Buffers status lines in memory; used by tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStatusSink {
    messages: Mutex<Vec<String>>,
}

impl MemoryStatusSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }
}

impl StatusSink for MemoryStatusSink {
    fn status(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_owned());
        }
    }
}

/// Blocking yes/no decision gate shown before a session may enter Running.
pub trait ConfirmGate {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Gate that approves every session without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl ConfirmGate for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}
