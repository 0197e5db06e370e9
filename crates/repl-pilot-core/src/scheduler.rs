//! Fixed-cadence polling driver
//!
//! Ticks on a fixed wall-clock interval and spawns one cycle per tick
//! without awaiting it, so a slow or hung cycle never delays the cadence.
//! No jitter, no backoff, and nothing a cycle does can stop the ticker.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

/// Drives a cycle factory on a fixed interval
#[derive(Debug, Default)]
pub struct PollingScheduler {
    handle: Option<JoinHandle<()>>,
}

impl PollingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin ticking every `period`, spawning `cycle()` on each tick.
    ///
    /// The first tick fires one period after `start` is called. Calling
    /// `start` again replaces the previous ticker.
    pub fn start<F, Fut>(&mut self, period: Duration, cycle: F)
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.stop();

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            loop {
                ticker.tick().await;
                tokio::spawn(cycle());
            }
        });
        self.handle = Some(handle);
    }

    /// Tear the ticker down. Cycles already spawned run to completion.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for PollingScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
