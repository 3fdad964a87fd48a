use crate::metrics::Metric;
use core::time::Duration;
use futures_util::future::join_all;
use ohno::AppError;
use std::sync::Arc;
use std::time::Instant;

const LOG_TARGET: &str = "   latency";

/// Round to millisecond precision when expressed in seconds
#[must_use]
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// How one metric invocation went, and how long it took.
#[derive(Debug, Clone)]
pub struct LatencyResult {
    latency: f64,
    outcome: Result<f64, Arc<AppError>>,
}

impl LatencyResult {
    /// Seconds from invocation to settlement, rounded to 3 decimals
    #[must_use]
    pub const fn latency(&self) -> f64 {
        self.latency
    }

    /// The score, if the metric succeeded
    #[must_use]
    pub fn result(&self) -> Option<f64> {
        self.outcome.as_ref().ok().copied()
    }

    /// The error, if the metric failed
    #[must_use]
    pub fn error(&self) -> Option<&Arc<AppError>> {
        self.outcome.as_ref().err()
    }

    #[must_use]
    pub const fn outcome(&self) -> &Result<f64, Arc<AppError>> {
        &self.outcome
    }
}

/// Results of one harness run, index-aligned with the metrics that produced them.
#[derive(Debug, Clone, Default)]
pub struct LatencyBatch {
    entries: Vec<LatencyResult>,
}

impl LatencyBatch {
    #[must_use]
    pub fn latencies(&self) -> Vec<f64> {
        self.entries.iter().map(LatencyResult::latency).collect()
    }

    #[must_use]
    pub fn results(&self) -> Vec<Option<f64>> {
        self.entries.iter().map(LatencyResult::result).collect()
    }

    #[must_use]
    pub fn errors(&self) -> Vec<Option<Arc<AppError>>> {
        self.entries.iter().map(|e| e.error().map(Arc::clone)).collect()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&LatencyResult> {
        self.entries.get(index)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LatencyResult> {
        self.entries.iter()
    }
}

/// Run every metric against the same repository concurrently and time each one.
///
/// All metrics are polled from the calling task and the call returns once every one of them
/// has settled; a failing metric never cuts the others short. When `timeout` is set, a metric
/// still pending after that long is dropped and recorded as failed.
pub async fn measure_concurrent_latencies(
    fns: &[Arc<dyn Metric>],
    owner: &str,
    repo: &str,
    timeout: Option<Duration>,
) -> LatencyBatch {
    let futures = fns.iter().enumerate().map(|(index, metric)| async move {
        let start = Instant::now();

        let outcome = match timeout {
            Some(limit) => match tokio::time::timeout(limit, metric.score(owner, repo)).await {
                Ok(outcome) => outcome,
                Err(_) => Err(ohno::app_err!("timed out after {:.3}s", limit.as_secs_f64())),
            },
            None => metric.score(owner, repo).await,
        };

        let latency = round3(start.elapsed().as_secs_f64());
        match &outcome {
            Ok(score) => log::debug!(target: LOG_TARGET, "{owner}/{repo}: metric #{index} scored {score} in {latency:.3}s"),
            Err(e) => log::debug!(target: LOG_TARGET, "{owner}/{repo}: metric #{index} failed after {latency:.3}s: {e:#}"),
        }

        LatencyResult {
            latency,
            outcome: outcome.map_err(Arc::new),
        }
    });

    LatencyBatch {
        entries: join_all(futures).await,
    }
}
