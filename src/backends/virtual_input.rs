use crate::binding::{AxisBinding, Projection, ReportSink};
use crate::device::ReportSource;
use crate::error::{SinkError, SourceError};
use parking_lot::Mutex;
use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

/// Report source replaying recorded reports in order, then closing.
#[derive(Debug, Default, Clone)]
pub struct ReplaySource {
    reports: VecDeque<Vec<u8>>,
}

impl ReplaySource {
    pub fn new<I, R>(reports: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Vec<u8>>,
    {
        Self {
            reports: reports.into_iter().map(Into::into).collect(),
        }
    }

    /// Queue one more raw report.
    pub fn feed(&mut self, report: impl Into<Vec<u8>>) {
        self.reports.push_back(report.into());
    }

    pub fn remaining(&self) -> usize {
        self.reports.len()
    }
}

impl ReportSource for ReplaySource {
    fn read_report(&mut self, buf: &mut [u8]) -> Result<usize, SourceError> {
        let report = self.reports.pop_front().ok_or(SourceError::Closed)?;
        let len = report.len().min(buf.len());
        buf[..len].copy_from_slice(&report[..len]);
        Ok(len)
    }
}

#[derive(Debug, Default)]
struct VirtualState {
    axes: BTreeMap<u16, i32>,
    buttons: BTreeMap<u16, bool>,
    writes: u64,
}

/// In-memory stand-in for the emulated joystick.
///
/// Declared with a name and the sink tables of one device, it accepts only the
/// ids it was declared with and axis values inside their ranges. Clones share
/// the same recorded state, so a test can keep one handle while the other sits
/// inside a [`SinkSync`](crate::SinkSync) listener.
#[derive(Debug, Clone)]
pub struct VirtualDevice {
    name: String,
    axes: Arc<[AxisBinding]>,
    buttons: Arc<[u16]>,
    state: Arc<Mutex<VirtualState>>,
}

impl VirtualDevice {
    pub fn new(name: impl Into<String>, axes: &[AxisBinding], buttons: &[u16]) -> Self {
        let mut state = VirtualState::default();
        for axis in axes {
            state.axes.insert(axis.id, axis.min);
        }
        for &id in buttons {
            state.buttons.insert(id, false);
        }

        Self {
            name: name.into(),
            axes: axes.into(),
            buttons: buttons.into(),
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// A device laid out like the sink tables of `S`.
    pub fn for_projection<S: Projection>(name: impl Into<String>) -> Self {
        Self::new(name, S::AXES, S::BUTTONS)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn axis(&self, id: u16) -> Option<i32> {
        self.state.lock().axes.get(&id).copied()
    }

    pub fn button(&self, id: u16) -> Option<bool> {
        self.state.lock().buttons.get(&id).copied()
    }

    /// Ids of the buttons currently held down.
    pub fn pressed(&self) -> Vec<u16> {
        self.state
            .lock()
            .buttons
            .iter()
            .filter_map(|(&id, &on)| on.then_some(id))
            .collect()
    }

    /// Total accepted writes, axes and buttons alike.
    pub fn writes(&self) -> u64 {
        self.state.lock().writes
    }
}

impl ReportSink for VirtualDevice {
    fn set_axis(&mut self, id: u16, value: i32) -> Result<(), SinkError> {
        let binding = self
            .axes
            .iter()
            .find(|axis| axis.id == id)
            .ok_or(SinkError::UnknownAxis(id))?;
        if !binding.contains(value) {
            return Err(SinkError::OutOfRange {
                id,
                value,
                min: binding.min,
                max: binding.max,
            });
        }

        let mut state = self.state.lock();
        state.axes.insert(id, value);
        state.writes += 1;
        Ok(())
    }

    fn set_button(&mut self, id: u16, pressed: bool) -> Result<(), SinkError> {
        if !self.buttons.contains(&id) {
            return Err(SinkError::UnknownButton(id));
        }

        let mut state = self.state.lock();
        state.buttons.insert(id, pressed);
        state.writes += 1;
        Ok(())
    }
}
