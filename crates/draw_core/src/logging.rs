use serde_json::Value;

/// Structured event sink handed to the selector and the draw handler.
///
/// The process-wide subscriber is installed by the binaries; nothing in this
/// crate configures global logging state.
pub trait DrawLogger {
    fn info(&self, event: &str, details: Value);
    fn error(&self, event: &str, details: Value);
}

/// Forwards draw events to `tracing`.
#[derive(Debug, Clone, Copy)]
pub struct TracingLogger {
    component: &'static str,
}

impl TracingLogger {
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }
}

impl DrawLogger for TracingLogger {
    fn info(&self, event: &str, details: Value) {
        tracing::info!(component = self.component, event, %details);
    }

    fn error(&self, event: &str, details: Value) {
        tracing::error!(component = self.component, event, %details);
    }
}
