//! Progress reporting seam between the pipeline and the terminal.

use std::cell::RefCell;

/// Receives one-line, human-readable progress messages.
pub trait ProgressSink {
    /// Reports a pipeline step.
    fn progress(&self, message: &str);
}

/// Discards every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl ProgressSink for SilentProgress {
    fn progress(&self, _message: &str) {}
}

/// Collects messages in memory.
#[derive(Debug, Default)]
pub struct RecordedProgress {
    messages: RefCell<Vec<String>>,
}

impl RecordedProgress {
    /// Messages received so far, in order.
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl ProgressSink for RecordedProgress {
    fn progress(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}
