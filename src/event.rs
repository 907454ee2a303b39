//! Control values and the state-updated event.
//!
//! ## Value conventions
//! - **Axes:** raw `u16` magnitudes exactly as sampled, never scaled. The range
//!   depends on the field (10-bit throttles, byte axes, 12-bit stick Z, 16-bit stick X/Y).
//! - **Buttons:** `bool`, `true` while pressed.
//! - **Hats:** four independent directions. Diagonals set two adjacent ones.
//! - **Mode:** the throttle's 3-position selector, `None` until the device reports one.

use crate::device::DeviceClass;
use crate::snapshot::StateReader;
use serde::Serialize;
use std::time::Instant;

/// A 4-way hat. Diagonal positions set two adjacent directions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Hat {
    pub up: bool,
    pub right: bool,
    pub down: bool,
    pub left: bool,
}

impl Hat {
    pub const CENTER: Self = Self {
        up: false,
        right: false,
        down: false,
        left: false,
    };

    /// Decodes a POV code: `0` is center, `1..=8` run clockwise from up with
    /// the even codes on the diagonals (2 is up-right, 8 is up-left).
    /// Anything above 8 reads as center.
    pub const fn from_pov(code: u8) -> Self {
        Self {
            up: matches!(code, 8 | 1 | 2),
            right: matches!(code, 2 | 3 | 4),
            down: matches!(code, 4 | 5 | 6),
            left: matches!(code, 6 | 7 | 8),
        }
    }

    /// Decodes a 4-bit direction field: bit 0 up, bit 1 right, bit 2 down, bit 3 left.
    pub const fn from_nibble(bits: u8) -> Self {
        Self {
            up: bits & 0b0001 != 0,
            right: bits & 0b0010 != 0,
            down: bits & 0b0100 != 0,
            left: bits & 0b1000 != 0,
        }
    }

    pub const fn is_centered(&self) -> bool {
        !(self.up || self.right || self.down || self.left)
    }
}

/// Position of the throttle's mode selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Mode {
    M1,
    M2,
    S1,
}

/// "State updated" signal handed to every listener after a commit.
///
/// The commit is already visible through `state` when listeners run, so
/// [`StateUpdate::snapshot`] returns at least this update's data, or a newer
/// one if the producer has moved on.
pub struct StateUpdate<'a, S> {
    pub device: DeviceClass,
    /// Per-pipeline sequence number of the committed report, starting at 1.
    pub seq: u64,
    /// Capture time (monotonic) of the raw report.
    pub at: Instant,
    /// The raw report the committed snapshot was decoded from.
    pub raw: &'a [u8],
    pub state: &'a StateReader<S>,
}

impl<S: Copy> StateUpdate<'_, S> {
    /// Latest committed snapshot of the device.
    #[inline]
    pub fn snapshot(&self) -> S {
        self.state.snapshot()
    }
}
