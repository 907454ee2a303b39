//! Projection of decoded state onto a virtual output device.
//!
//! The virtual device emulates the legacy joystick layout: each semantic field
//! of a snapshot is bound to a fixed sink axis id (with its logical range) or a
//! fixed sink button id. The tables live next to each device's decoder; this
//! module holds the shared types and the [`SinkSync`] listener that pushes a
//! projected snapshot into a [`ReportSink`].

use crate::error::{ListenerError, SinkError};
use crate::event::StateUpdate;
use crate::eventbus::StateListener;
use serde::Serialize;

/// First joystick button code (`BTN_JOYSTICK`).
pub const BTN_JOYSTICK: u16 = 0x120;

/// First extended button code (`BTN_TRIGGER_HAPPY`). Button tables continue at
/// `BTN_TRIGGER_HAPPY + 0x10` once the 16 joystick codes are used up.
pub const BTN_TRIGGER_HAPPY: u16 = 0x2c0;

/// One sink axis and its logical range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AxisBinding {
    pub id: u16,
    pub min: i32,
    pub max: i32,
}

impl AxisBinding {
    pub const fn new(id: u16, min: i32, max: i32) -> Self {
        Self { id, min, max }
    }

    #[inline]
    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Fixed mapping from a snapshot type to sink identifiers.
///
/// `axes()` and `buttons()` yield values in the same order as [`AXES`] and
/// [`BUTTONS`] declare them.
///
/// [`AXES`]: Projection::AXES
/// [`BUTTONS`]: Projection::BUTTONS
pub trait Projection {
    const AXES: &'static [AxisBinding];
    const BUTTONS: &'static [u16];

    fn axes(&self) -> Vec<(u16, i32)>;
    fn buttons(&self) -> Vec<(u16, bool)>;
}

/// The virtual output device, as seen by the relay.
pub trait ReportSink {
    fn set_axis(&mut self, id: u16, value: i32) -> Result<(), SinkError>;
    fn set_button(&mut self, id: u16, pressed: bool) -> Result<(), SinkError>;
}

impl<T: ReportSink + ?Sized> ReportSink for Box<T> {
    fn set_axis(&mut self, id: u16, value: i32) -> Result<(), SinkError> {
        (**self).set_axis(id, value)
    }

    fn set_button(&mut self, id: u16, pressed: bool) -> Result<(), SinkError> {
        (**self).set_button(id, pressed)
    }
}

/// Listener mirroring every update onto a [`ReportSink`].
///
/// Writes all axes, then all buttons, from the latest snapshot. The first sink
/// error abandons the rest of that update.
pub struct SinkSync<K> {
    sink: K,
}

impl<K: ReportSink> SinkSync<K> {
    pub fn new(sink: K) -> Self {
        Self { sink }
    }

    pub fn into_inner(self) -> K {
        self.sink
    }

    /// Writes one projected snapshot to the sink.
    pub fn sync<S: Projection>(&mut self, state: &S) -> Result<(), SinkError> {
        for (id, value) in state.axes() {
            self.sink.set_axis(id, value)?;
        }
        for (id, pressed) in state.buttons() {
            self.sink.set_button(id, pressed)?;
        }
        Ok(())
    }
}

impl<S, K> StateListener<S> for SinkSync<K>
where
    S: Projection + Copy,
    K: ReportSink + Send,
{
    fn on_update(&mut self, update: &StateUpdate<'_, S>) -> Result<(), ListenerError> {
        let state = update.snapshot();
        self.sync(&state)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        writes: Vec<String>,
        fail_on_button: Option<u16>,
    }

    impl ReportSink for Recorder {
        fn set_axis(&mut self, id: u16, value: i32) -> Result<(), SinkError> {
            self.writes.push(format!("a{id}={value}"));
            Ok(())
        }

        fn set_button(&mut self, id: u16, pressed: bool) -> Result<(), SinkError> {
            if self.fail_on_button == Some(id) {
                return Err(SinkError::UnknownButton(id));
            }
            self.writes.push(format!("b{id:#x}={pressed}"));
            Ok(())
        }
    }

    #[derive(Clone, Copy)]
    struct Tiny {
        x: u16,
        fire: bool,
        alt: bool,
    }

    impl Projection for Tiny {
        const AXES: &'static [AxisBinding] = &[AxisBinding::new(0, 0, 255)];
        const BUTTONS: &'static [u16] = &[BTN_JOYSTICK, BTN_JOYSTICK + 1];

        fn axes(&self) -> Vec<(u16, i32)> {
            vec![(0, i32::from(self.x))]
        }

        fn buttons(&self) -> Vec<(u16, bool)> {
            vec![(BTN_JOYSTICK, self.fire), (BTN_JOYSTICK + 1, self.alt)]
        }
    }

    #[test]
    fn sync_writes_axes_before_buttons() {
        let mut sync = SinkSync::new(Recorder::default());
        sync.sync(&Tiny { x: 7, fire: true, alt: false }).unwrap();
        assert_eq!(
            sync.into_inner().writes,
            vec!["a0=7", "b0x120=true", "b0x121=false"]
        );
    }

    #[test]
    fn first_sink_error_stops_the_update() {
        let mut sync = SinkSync::new(Recorder {
            fail_on_button: Some(BTN_JOYSTICK),
            ..Recorder::default()
        });
        let err = sync.sync(&Tiny { x: 1, fire: true, alt: true }).unwrap_err();
        assert_eq!(err, SinkError::UnknownButton(BTN_JOYSTICK));
        assert_eq!(sync.into_inner().writes, vec!["a0=1"]);
    }

    #[test]
    fn axis_binding_range_is_inclusive() {
        let axis = AxisBinding::new(4, 0, 4095);
        assert!(axis.contains(0));
        assert!(axis.contains(4095));
        assert!(!axis.contains(4096));
        assert!(!axis.contains(-1));
    }
}
