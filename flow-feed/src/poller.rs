use std::thread;
use std::time::Duration;

use flow_core::{FlowConfig, Patient};
use tracing::{debug, info, warn};

use crate::source::PatientSource;

/// Periodic fetcher that keeps the last successful snapshot across failed reads.
pub struct Poller<S> {
    source: S,
    config: FlowConfig,
    latest: Option<Vec<Patient>>,
    consecutive_failures: u32,
}

impl<S: PatientSource> Poller<S> {
    pub fn new(source: S, config: FlowConfig) -> Self {
        Self {
            source,
            config,
            latest: None,
            consecutive_failures: 0,
        }
    }

    /// Fetch once and return whatever snapshot is retained afterwards.
    pub fn poll(&mut self) -> Option<&[Patient]> {
        match self.source.fetch() {
            Ok(patients) => {
                debug!(patients = patients.len(), "fetched patient snapshot");
                self.latest = Some(patients);
                self.consecutive_failures = 0;
            }
            Err(err) => {
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
                warn!(
                    failures = self.consecutive_failures,
                    "patient fetch failed, keeping previous snapshot: {err}"
                );

                let limit = self.config.max_retained_failures;
                if limit > 0 && self.consecutive_failures >= limit && self.latest.is_some() {
                    info!(failures = self.consecutive_failures, "dropping stale snapshot");
                    self.latest = None;
                }
            }
        }

        self.latest()
    }

    pub fn latest(&self) -> Option<&[Patient]> {
        self.latest.as_deref()
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.config.poll_interval_ms)
    }

    /// Poll `ticks` times (forever when `None`), sleeping one interval between ticks.
    /// `on_snapshot` runs after every tick that has a snapshot to show.
    pub fn run<F>(&mut self, ticks: Option<usize>, mut on_snapshot: F)
    where
        F: FnMut(&[Patient]),
    {
        if ticks == Some(0) {
            return;
        }

        let mut tick = 0usize;
        loop {
            if let Some(patients) = self.poll() {
                on_snapshot(patients);
            }

            tick += 1;
            if ticks.is_some_and(|limit| tick >= limit) {
                break;
            }
            thread::sleep(self.interval());
        }
    }

    pub fn into_source(self) -> S {
        self.source
    }
}
