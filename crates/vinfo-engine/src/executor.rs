//! Batch executor - issues a plan as one batch and settles every endpoint

use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, warn};
use vinfo_core::{
    BatchResult, ConnectionError, Endpoint, Settlement, TypedError, VehicleConnection,
};

/// Runs planned requests against a vehicle connection.
///
/// Execution never fails: every planned endpoint ends up with a
/// settlement, whether the batch as a whole succeeded or not.
#[derive(Debug, Clone, Default)]
pub struct BatchExecutor {
    timeout: Option<Duration>,
}

impl BatchExecutor {
    /// Executor without a timeout of its own
    pub fn new() -> Self {
        Self::default()
    }

    /// Executor that settles the whole batch as `TIMEOUT` after `timeout`
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }

    /// Configured timeout, if any
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Issue `endpoints` as one batch and settle each of them
    pub async fn execute(
        &self,
        endpoints: &[Endpoint],
        connection: &dyn VehicleConnection,
    ) -> BatchResult {
        if endpoints.is_empty() {
            return BatchResult::default();
        }

        let call = connection.batch(endpoints);
        let outcome = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .unwrap_or(Err(ConnectionError::Timeout)),
            None => call.await,
        };

        match outcome {
            Ok(settled) => settle_answers(endpoints, settled, connection.vehicle_id()),
            Err(e) => {
                warn!(
                    vehicle_id = %connection.vehicle_id(),
                    requests = endpoints.len(),
                    error = %e,
                    "Batch request failed"
                );
                let error = e.into_typed();
                endpoints
                    .iter()
                    .map(|endpoint| (endpoint.clone(), Settlement::Failure(error.clone())))
                    .collect()
            }
        }
    }
}

fn settle_answers(
    endpoints: &[Endpoint],
    settled: Vec<(Endpoint, Settlement)>,
    vehicle_id: &str,
) -> BatchResult {
    let mut answers: HashMap<Endpoint, Settlement> = HashMap::with_capacity(settled.len());
    for (endpoint, settlement) in settled {
        if !endpoints.contains(&endpoint) {
            debug!(vehicle_id = %vehicle_id, endpoint = %endpoint, "Ignoring unrequested response");
            continue;
        }
        answers.entry(endpoint).or_insert(settlement);
    }

    endpoints
        .iter()
        .map(|endpoint| {
            let settlement = answers.remove(endpoint).unwrap_or_else(|| {
                warn!(vehicle_id = %vehicle_id, endpoint = %endpoint, "No response for request");
                Settlement::Failure(TypedError::unavailable(format!(
                    "No response for {}",
                    endpoint
                )))
            });
            (endpoint.clone(), settlement)
        })
        .collect()
}
