use crate::collectors::docker::{self, ContainerRuntime};
use crate::models::units::ByteBase;
use crate::models::usage::DockerUsage;
use crate::util::latest::LatestValue;
use anyhow::{Context, Result};
use log::{debug, info};
use std::sync::mpsc::{self, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Polls container usage on a background thread so the slow runtime CLI never
/// blocks the UI. The UI reads the last completed result via [`latest`].
///
/// Dropping the worker signals the thread to stop; a command still in flight
/// is abandoned and its result discarded.
///
/// [`latest`]: DockerWorker::latest
pub struct DockerWorker {
    target: String,
    slot:   Arc<LatestValue<DockerUsage>>,
    stop:   mpsc::Sender<()>,
}

impl DockerWorker {
    pub fn spawn<R>(runtime: R, target: String, base: ByteBase, interval: Duration) -> Result<Self>
    where
        R: ContainerRuntime + Send + 'static,
    {
        let slot = Arc::new(LatestValue::new());
        let (stop, stop_rx) = mpsc::channel::<()>();

        let writer = Arc::clone(&slot);
        let filter = target.clone();
        thread::Builder::new()
            .name("docker-poll".into())
            .spawn(move || poll_loop(&runtime, &filter, base, interval, &writer, &stop_rx))
            .context("spawn docker poller")?;

        info!("docker poller started for {:?} every {:?}", target, interval);
        Ok(Self { target, slot, stop })
    }

    /// Last completed reading; `None` until the first poll finishes or while
    /// the container is unavailable.
    pub fn latest(&self) -> Option<DockerUsage> {
        self.slot.load().map(|u| *u)
    }

    pub fn target(&self) -> &str { &self.target }
}

impl Drop for DockerWorker {
    fn drop(&mut self) {
        let _ = self.stop.send(());
    }
}

fn poll_loop(
    runtime:  &dyn ContainerRuntime,
    filter:   &str,
    base:     ByteBase,
    interval: Duration,
    slot:     &LatestValue<DockerUsage>,
    stop:     &mpsc::Receiver<()>,
) {
    loop {
        let result = docker::sample(runtime, filter, base);
        match stop.try_recv() {
            Ok(()) | Err(TryRecvError::Disconnected) => break,
            Err(TryRecvError::Empty) => {}
        }
        slot.store(result);

        match stop.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => continue,
            _ => break,
        }
    }
    debug!("docker poller for {:?} stopped", filter);
}
