use crate::error::ListenerError;
use crate::event::StateUpdate;
use crate::eventbus::StateListener;

/// Wraps a listener and forwards only the updates a predicate accepts.
pub struct FilteredListener<S> {
    predicate: Box<dyn Fn(&StateUpdate<'_, S>) -> bool + Send>,
    inner: Box<dyn StateListener<S>>,
}

impl<S> FilteredListener<S> {
    pub fn new(
        predicate: impl Fn(&StateUpdate<'_, S>) -> bool + Send + 'static,
        inner: impl StateListener<S> + 'static,
    ) -> Self {
        Self {
            predicate: Box::new(predicate),
            inner: Box::new(inner),
        }
    }

    /// Forwards every `n`th update, counted by sequence number. `n == 0` forwards all.
    ///
    /// Useful in front of an expensive listener such as the
    /// [`DebugLogger`](crate::DebugLogger) on a fast-reporting device.
    pub fn every_nth(n: u64, inner: impl StateListener<S> + 'static) -> Self {
        let n = n.max(1);
        Self::new(move |update| update.seq % n == 0, inner)
    }
}

impl<S> StateListener<S> for FilteredListener<S> {
    fn on_update(&mut self, update: &StateUpdate<'_, S>) -> Result<(), ListenerError> {
        if (self.predicate)(update) {
            self.inner.on_update(update)
        } else {
            Ok(())
        }
    }
}
