//! Bounded fan-out/fan-in probe pool.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::config::ProbeConfig;
use crate::probe::{Pinger, ProbeOutcome};

/// Fixed-size worker pool for dispatching reachability probes.
///
/// Created once at process start and shared across all requests; probe tasks
/// from concurrent requests interleave over the same permits. Each batch
/// spawns one task per host, with at most `workers` probes in flight at a
/// time; hosts beyond the bound queue on the semaphore.
pub struct ProbePool {
    pinger: Arc<dyn Pinger>,
    permits: Arc<Semaphore>,
    timeout: Duration,
}

impl ProbePool {
    /// Create a pool from configuration and a pinger implementation.
    ///
    /// Worker count is clamped to a minimum of 1.
    pub fn new(config: &ProbeConfig, pinger: Arc<dyn Pinger>) -> Self {
        Self {
            pinger,
            permits: Arc::new(Semaphore::new(config.workers.max(1))),
            timeout: config.timeout,
        }
    }

    /// Probe every host concurrently and reduce the results into a map.
    ///
    /// The map holds exactly one entry per distinct host string submitted;
    /// duplicate strings collapse into one key, later completions overwriting
    /// earlier ones. Completion order is irrelevant. One host's failure never
    /// affects another's result or aborts the batch.
    pub async fn probe_all(&self, hosts: Vec<String>) -> BTreeMap<String, ProbeOutcome> {
        let mut tasks = JoinSet::new();
        let submitted: Vec<String> = hosts.clone();

        for host in hosts {
            let pinger = Arc::clone(&self.pinger);
            let permits = Arc::clone(&self.permits);
            let probe_timeout = self.timeout;

            tasks.spawn(async move {
                // The semaphore is never closed, so acquisition only fails
                // if the runtime is shutting down.
                let Ok(_permit) = permits.acquire_owned().await else {
                    return (host, ProbeOutcome::Error);
                };
                let outcome = pinger.ping(&host, probe_timeout).await;
                (host, outcome)
            });
        }

        let mut results = BTreeMap::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((host, outcome)) => {
                    results.insert(host, outcome);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Probe task failed to complete");
                }
            }
        }

        // A task that failed to join still owes its host an entry.
        for host in submitted {
            results.entry(host).or_insert(ProbeOutcome::Error);
        }

        results
    }
}

impl std::fmt::Debug for ProbePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProbePool")
            .field("available_permits", &self.permits.available_permits())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
