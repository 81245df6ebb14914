//! Output Sink
//!
//! Line-oriented, human-readable progress and result output for the repair
//! services. Diagnostics go through `tracing`; everything a user of the
//! repair command is meant to read goes through this sink.

use std::sync::Mutex;

/// Destination for human-readable repair output lines
pub trait OutputSink: Send + Sync {
    /// Emit one output line
    fn line(&self, message: &str);
}

/// Sink that prints each line to stdout
pub struct ConsoleOutput;

impl OutputSink for ConsoleOutput {
    fn line(&self, message: &str) {
        println!("{}", message);
    }
}

/// Sink that collects lines in memory.
///
/// Used by tests and by embedders that surface repair results through their
/// own channels.
pub struct BufferedOutput {
    lines: Mutex<Vec<String>>,
}

impl BufferedOutput {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of all lines emitted so far
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }
}

impl Default for BufferedOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSink for BufferedOutput {
    fn line(&self, message: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(message.to_string());
        }
    }
}
