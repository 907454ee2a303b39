use crate::device::{Decode, DeviceClass, ReportSource};
use crate::error::ManagerError;
use crate::pipeline::{Pipeline, RunSummary, StopSignal};
use std::thread::{self, JoinHandle};

struct Worker {
    device: DeviceClass,
    handle: JoinHandle<RunSummary>,
}

/// Runs one pipeline per device on its own thread.
///
/// Devices share nothing but the stop signal. [`shutdown`](Self::shutdown)
/// raises it and joins every worker; each finishes the report it is decoding
/// and exits before its next read. Dropping the manager does the same and
/// discards the summaries.
#[derive(Default)]
pub struct DeviceManager {
    stop: StopSignal,
    workers: Vec<Worker>,
}

impl DeviceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal observed by every worker, for wiring into external shutdown.
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Starts a worker thread polling `source` into `pipeline`.
    ///
    /// Keep a [`StateReader`](crate::StateReader) from the pipeline before
    /// handing it over if the state must be read from elsewhere.
    pub fn spawn<S, R>(&mut self, mut pipeline: Pipeline<S>, mut source: R) -> Result<(), ManagerError>
    where
        S: Decode,
        R: ReportSource + Send + 'static,
    {
        let device = S::DEVICE;
        let stop = self.stop.clone();
        let handle = thread::Builder::new()
            .name(format!("{device}-reports"))
            .spawn(move || pipeline.run(&mut source, &stop))
            .map_err(|source| ManagerError::Spawn { device, source })?;

        self.workers.push(Worker { device, handle });
        Ok(())
    }

    pub fn running(&self) -> usize {
        self.workers.iter().filter(|w| !w.handle.is_finished()).count()
    }

    /// Stops every worker and collects their summaries in spawn order.
    pub fn shutdown(mut self) -> Vec<(DeviceClass, Result<RunSummary, ManagerError>)> {
        self.stop.stop();
        std::mem::take(&mut self.workers).into_iter().map(join).collect()
    }
}

impl Drop for DeviceManager {
    fn drop(&mut self) {
        if self.workers.is_empty() {
            return;
        }
        self.stop.stop();
        for worker in self.workers.drain(..) {
            let _ = join(worker);
        }
    }
}

fn join(worker: Worker) -> (DeviceClass, Result<RunSummary, ManagerError>) {
    let device = worker.device;
    let result = worker.handle.join().map_err(|_| {
        tracing::error!(%device, "worker panicked");
        ManagerError::WorkerPanicked { device }
    });
    (device, result)
}
