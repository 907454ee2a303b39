use crate::error::ListenerError;
use crate::event::StateUpdate;
use crate::eventbus::StateListener;
use serde::Serialize;

/// A listener that logs raw reports and decoded state through `tracing`.
///
/// Raw bytes go out at `trace` level, one binary field per byte; the decoded
/// snapshot is serialized to JSON at `debug` level.
#[derive(Debug, Default)]
pub struct DebugLogger {
    pretty: bool,
}

impl DebugLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretty-print the JSON snapshot across several lines.
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    pub(crate) fn render<S: Serialize>(&self, state: &S) -> Result<String, serde_json::Error> {
        if self.pretty {
            serde_json::to_string_pretty(state)
        } else {
            serde_json::to_string(state)
        }
    }
}

impl<S: Serialize + Copy> StateListener<S> for DebugLogger {
    fn on_update(&mut self, update: &StateUpdate<'_, S>) -> Result<(), ListenerError> {
        if tracing::enabled!(tracing::Level::TRACE) {
            for (index, byte) in update.raw.iter().enumerate() {
                tracing::trace!(device = %update.device, seq = update.seq, index, "{byte:08b}");
            }
        }

        let state = self.render(&update.snapshot())?;
        tracing::debug!(device = %update.device, seq = update.seq, %state, "state updated");
        Ok(())
    }
}
