//! Per-device state store.
//!
//! [`StateStore`] owns the most recently committed snapshot of one device. It is
//! held by exactly one producer (the device's pipeline), which is the only code
//! able to [`commit`](StateStore::commit). Everyone else gets a [`StateReader`],
//! a cheap cloneable handle that can only take snapshots.
//!
//! # Semantics
//! - Snapshots are flat `Copy` values, built completely by the decoder before
//!   being committed in a single assignment. A reader sees either the previous
//!   snapshot or the new one, never a mix.
//! - Before the first commit the store holds `S::default()`, the all-zero state.
//! - `snapshot()` holds the read lock only for the duration of the copy.
//!
//! # Examples
//! ```
//! use hotas_relay::{StateStore, StickState};
//!
//! let store = StateStore::<StickState>::new();
//! let reader = store.reader();
//! assert_eq!(reader.snapshot(), StickState::default());
//!
//! store.commit(StickState { x: 32768, ..StickState::default() });
//! assert_eq!(reader.snapshot().x, 32768);
//! ```

use parking_lot::RwLock;
use std::sync::Arc;

/// Writer side of a device's state cell.
#[derive(Debug, Default)]
pub struct StateStore<S> {
    current: Arc<RwLock<S>>,
}

impl<S: Copy + Default> StateStore<S> {
    pub fn new() -> Self {
        Self {
            current: Arc::new(RwLock::new(S::default())),
        }
    }

    /// Copy of the current committed state.
    #[inline]
    pub fn snapshot(&self) -> S {
        *self.current.read()
    }

    /// Replaces the current state with `next`, visible in full to every
    /// subsequent snapshot.
    #[inline]
    pub fn commit(&self, next: S) {
        *self.current.write() = next;
    }

    /// Read-only handle sharing this store.
    pub fn reader(&self) -> StateReader<S> {
        StateReader {
            current: Arc::clone(&self.current),
        }
    }
}

/// Read-only view of a [`StateStore`], safe to share across threads.
#[derive(Debug)]
pub struct StateReader<S> {
    current: Arc<RwLock<S>>,
}

impl<S> Clone for StateReader<S> {
    fn clone(&self) -> Self {
        Self {
            current: Arc::clone(&self.current),
        }
    }
}

impl<S: Copy> StateReader<S> {
    /// Copy of the current committed state.
    #[inline]
    pub fn snapshot(&self) -> S {
        *self.current.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    struct Pair {
        a: u32,
        b: u32,
    }

    #[test]
    fn starts_at_default() {
        let store = StateStore::<Pair>::new();
        assert_eq!(store.snapshot(), Pair::default());
    }

    #[test]
    fn commit_is_visible_to_existing_readers() {
        let store = StateStore::<Pair>::new();
        let reader = store.reader();
        let other = reader.clone();
        store.commit(Pair { a: 1, b: 2 });
        assert_eq!(reader.snapshot(), Pair { a: 1, b: 2 });
        assert_eq!(other.snapshot(), Pair { a: 1, b: 2 });
    }

    #[test]
    fn readers_never_see_torn_pairs() {
        let store = StateStore::<Pair>::new();
        let reader = store.reader();

        std::thread::scope(|s| {
            for _ in 0..4 {
                let reader = reader.clone();
                s.spawn(move || {
                    for _ in 0..10_000 {
                        let p = reader.snapshot();
                        assert_eq!(p.a, p.b);
                    }
                });
            }
            for n in 0..10_000 {
                store.commit(Pair { a: n, b: n });
            }
        });
    }
}
