//! Per-device decode, commit and fan-out.
//!
//! A [`Pipeline`] owns one device's [`StateStore`] and [`InputEventBus`]. For each
//! raw report it decodes a complete new snapshot against the current one,
//! commits it, then emits a [`StateUpdate`] to every listener.
//!
//! [`Pipeline::run`] is the device's polling loop. It checks a [`StopSignal`]
//! between reads; a report that has been read is always decoded to completion.

use crate::device::{Decode, ReportSource};
use crate::error::{DecodeError, SourceError};
use crate::event::StateUpdate;
use crate::eventbus::InputEventBus;
use crate::snapshot::{StateReader, StateStore};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Largest read buffer handed to a report source. Larger than a report so
/// sources delivering a full USB packet are not truncated.
const READ_BUF_LEN: usize = 64;

/// Cooperative cancellation flag shared between a controller and its loops.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Counters reported when a polling loop ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Reports decoded and committed.
    pub committed: u64,
    /// Reports dropped by the decoder.
    pub rejected: u64,
    /// Transient read errors the loop recovered from.
    pub source_errors: u64,
    /// Listener invocations that failed or panicked.
    pub listener_failures: u64,
}

pub struct Pipeline<S> {
    store: StateStore<S>,
    bus: InputEventBus<S>,
    seq: u64,
}

impl<S: Decode> Pipeline<S> {
    /// Takes ownership of the listeners; none can be added afterwards.
    pub fn new(bus: InputEventBus<S>) -> Self {
        Self {
            store: StateStore::new(),
            bus,
            seq: 0,
        }
    }

    pub fn reader(&self) -> StateReader<S> {
        self.store.reader()
    }

    pub fn snapshot(&self) -> S {
        self.store.snapshot()
    }

    /// Decodes, commits and publishes one report.
    ///
    /// On error nothing is committed or published and the previous state
    /// stays current.
    pub fn process(&mut self, report: &[u8]) -> Result<S, DecodeError> {
        self.process_counted(report).map(|(state, _)| state)
    }

    fn process_counted(&mut self, report: &[u8]) -> Result<(S, usize), DecodeError> {
        let at = Instant::now();
        let next = S::decode(report, &self.store.snapshot())?;
        self.store.commit(next);
        self.seq += 1;

        let reader = self.store.reader();
        let update = StateUpdate {
            device: S::DEVICE,
            seq: self.seq,
            at,
            raw: report,
            state: &reader,
        };
        let failed = self.bus.emit(&update);
        Ok((next, failed))
    }

    /// Polls `source` until `stop` is raised or the source closes.
    pub fn run<R: ReportSource + ?Sized>(&mut self, source: &mut R, stop: &StopSignal) -> RunSummary {
        let device = S::DEVICE;
        let mut summary = RunSummary::default();
        let mut buf = [0u8; READ_BUF_LEN];

        tracing::info!(%device, "report loop started");

        while !stop.is_stopped() {
            let len = match source.read_report(&mut buf) {
                Ok(0) => continue,
                Ok(len) => len.min(buf.len()),
                Err(SourceError::Closed) => {
                    tracing::info!(%device, "report source closed");
                    break;
                }
                Err(error) => {
                    summary.source_errors += 1;
                    tracing::warn!(%device, %error, "read failed");
                    continue;
                }
            };

            match self.process_counted(&buf[..len]) {
                Ok((_, failed)) => {
                    summary.committed += 1;
                    summary.listener_failures += failed as u64;
                }
                Err(error) => {
                    summary.rejected += 1;
                    tracing::warn!(%device, len, %error, "report rejected");
                }
            }
        }

        tracing::info!(
            %device,
            committed = summary.committed,
            rejected = summary.rejected,
            "report loop stopped"
        );
        summary
    }
}
