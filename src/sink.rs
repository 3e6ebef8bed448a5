use parking_lot::Mutex;
use std::sync::Arc;

/// Receives movement commands ready to be sent to the game.
pub trait CommandSink: Send {
    fn dispatch(&mut self, commands: &str);
}

impl<F> CommandSink for F
where
    F: FnMut(&str) + Send,
{
    fn dispatch(&mut self, commands: &str) {
        self(commands)
    }
}

/// Drops everything. Used until the host wires up a real executor.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl CommandSink for NullSink {
    fn dispatch(&mut self, _commands: &str) {}
}

/// Keeps every dispatched string. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    sent: Arc<Mutex<Vec<String>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().clone()
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.sent.lock())
    }
}

impl CommandSink for RecordingSink {
    fn dispatch(&mut self, commands: &str) {
        self.sent.lock().push(commands.to_string());
    }
}
