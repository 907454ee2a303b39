use crate::error::ListenerError;
use crate::event::StateUpdate;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Trait for reacting to committed state updates of one device.
pub trait StateListener<S>: Send {
    fn on_update(&mut self, update: &StateUpdate<'_, S>) -> Result<(), ListenerError>;
}

/// Closures are listeners too.
impl<S, F> StateListener<S> for F
where
    F: FnMut(&StateUpdate<'_, S>) -> Result<(), ListenerError> + Send,
{
    fn on_update(&mut self, update: &StateUpdate<'_, S>) -> Result<(), ListenerError> {
        self(update)
    }
}

/// Makes a closure generic over the update's lifetime so it can be wrapped
/// by another listener, such as a [`FilteredListener`](crate::FilteredListener).
///
/// Nothing ties `S` to a particular bus: if the body reads the state, annotate
/// the argument (`|u: &StateUpdate<'_, ThrottleState>|`). Closures registered
/// straight on a bus should go through [`InputEventBus::add_fn`] instead.
pub fn from_fn<S, F>(f: F) -> F
where
    F: FnMut(&StateUpdate<'_, S>) -> Result<(), ListenerError> + Send,
{
    f
}

/// Handle returned by [`InputEventBus::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Metadata-wrapped listener.
struct ListenerEntry<S> {
    id: ListenerId,
    label: Option<String>,
    listener: Box<dyn StateListener<S>>,
}

/// Fan-out of state updates to the listeners registered during setup.
///
/// Listeners run synchronously on the producer's thread, in registration
/// order. A listener that fails or panics is logged and skipped; it never
/// stops its siblings or the producer. Once the bus is handed to a
/// [`Pipeline`](crate::Pipeline) no more listeners can be added.
pub struct InputEventBus<S> {
    next_id: u64,
    listeners: Vec<ListenerEntry<S>>,
}

impl<S> Default for InputEventBus<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> InputEventBus<S> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    /// Registers a listener.
    pub fn add_listener(&mut self, listener: impl StateListener<S> + 'static) -> ListenerId {
        self.register(Box::new(listener), None)
    }

    /// Registers a closure, typed by this bus's state.
    pub fn add_fn<F>(&mut self, f: F) -> ListenerId
    where
        F: FnMut(&StateUpdate<'_, S>) -> Result<(), ListenerError> + Send + 'static,
    {
        self.register(Box::new(f), None)
    }

    /// Registers a listener with a label used in failure logs.
    pub fn add_labeled_listener(
        &mut self,
        label: impl Into<String>,
        listener: impl StateListener<S> + 'static,
    ) -> ListenerId {
        self.register(Box::new(listener), Some(label.into()))
    }

    fn register(&mut self, listener: Box<dyn StateListener<S>>, label: Option<String>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(ListenerEntry { id, label, listener });
        id
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Delivers one update to every listener. Returns how many of them failed.
    pub fn emit(&mut self, update: &StateUpdate<'_, S>) -> usize {
        let mut failed = 0;

        for entry in &mut self.listeners {
            let label = entry.label.as_deref().unwrap_or("-");
            let outcome = catch_unwind(AssertUnwindSafe(|| entry.listener.on_update(update)));

            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(error)) => {
                    failed += 1;
                    tracing::warn!(
                        device = %update.device,
                        seq = update.seq,
                        listener = entry.id.0,
                        label,
                        %error,
                        "listener failed"
                    );
                }
                Err(_) => {
                    failed += 1;
                    tracing::error!(
                        device = %update.device,
                        seq = update.seq,
                        listener = entry.id.0,
                        label,
                        "listener panicked"
                    );
                }
            }
        }

        failed
    }
}
