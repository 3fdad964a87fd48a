use super::latency::{LatencyBatch, measure_concurrent_latencies, round3};
use super::weights::{DEFAULT_SCORE, MISSING_LATENCY, weight};
use super::{ScoreReport, ScoringContext};
use crate::metrics::{
    BusFactorMetric, CorrectnessMetric, LicenseMetric, Metric, MetricKind, RampUpMetric, ResponsivenessMetric,
};
use core::fmt::{Debug, Formatter};
use core::time::Duration;
use std::sync::Arc;
use strum::{EnumCount, IntoEnumIterator};

const LOG_TARGET: &str = "   scoring";

/// The five metrics behind a net score, one per named slot.
pub struct MetricSuite {
    pub ramp_up: Arc<dyn Metric>,
    pub correctness: Arc<dyn Metric>,
    pub bus_factor: Arc<dyn Metric>,
    pub responsive_maintainer: Arc<dyn Metric>,
    pub license: Arc<dyn Metric>,
}

impl MetricSuite {
    /// The production metrics, reading GitHub and cloning through `ctx`
    #[must_use]
    pub fn from_context(ctx: &ScoringContext) -> Self {
        Self {
            ramp_up: Arc::new(RampUpMetric::new(ctx.github.clone())),
            correctness: Arc::new(CorrectnessMetric::new(
                ctx.github_web_url.clone(),
                ctx.clone_root.clone(),
                Arc::clone(&ctx.lint_command),
                ctx.git_timeout,
            )),
            bus_factor: Arc::new(BusFactorMetric::new(ctx.github.clone())),
            responsive_maintainer: Arc::new(ResponsivenessMetric::new(ctx.github.clone())),
            license: Arc::new(LicenseMetric::new(ctx.github.clone())),
        }
    }

    /// Lay the metrics out in [`MetricKind`] order
    fn into_dispatch_list(self) -> [Arc<dyn Metric>; MetricKind::COUNT] {
        [
            self.ramp_up,
            self.correctness,
            self.bus_factor,
            self.responsive_maintainer,
            self.license,
        ]
    }
}

impl Debug for MetricSuite {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MetricSuite").finish_non_exhaustive()
    }
}

/// Computes net scores by running the metric suite and weighting its results.
///
/// A scorer holds no per-call state; scoring the same repository twice with deterministic
/// metrics yields the same scores.
pub struct Scorer {
    metrics: [Arc<dyn Metric>; MetricKind::COUNT],
    timeout: Option<Duration>,
}

impl Scorer {
    #[must_use]
    pub fn new(suite: MetricSuite, timeout: Option<Duration>) -> Self {
        Self {
            metrics: suite.into_dispatch_list(),
            timeout,
        }
    }

    #[must_use]
    pub fn from_context(ctx: &ScoringContext) -> Self {
        Self::new(MetricSuite::from_context(ctx), ctx.metric_timeout)
    }

    /// Score one repository.
    ///
    /// Never fails: a metric that errors or times out contributes [`DEFAULT_SCORE`] to the net
    /// score and is reported with [`MISSING_LATENCY`].
    pub async fn get_scores(&self, owner: &str, repo: &str, url: &str) -> ScoreReport {
        let batch = measure_concurrent_latencies(&self.metrics, owner, repo, self.timeout).await;
        let report = aggregate(&batch, url);

        log::info!(
            target: LOG_TARGET,
            "{owner}/{repo}: net score {} in {:.3}s",
            report.net_score,
            report.net_score_latency
        );

        report
    }
}

impl Debug for Scorer {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scorer").field("timeout", &self.timeout).finish_non_exhaustive()
    }
}

/// Fold a batch produced from the metrics in [`MetricKind`] order into a report
fn aggregate(batch: &LatencyBatch, url: &str) -> ScoreReport {
    let mut report = ScoreReport {
        url: url.to_string(),
        net_score: 0.0,
        net_score_latency: 0.0,
        ramp_up: DEFAULT_SCORE,
        ramp_up_latency: MISSING_LATENCY,
        correctness: DEFAULT_SCORE,
        correctness_latency: MISSING_LATENCY,
        bus_factor: DEFAULT_SCORE,
        bus_factor_latency: MISSING_LATENCY,
        responsive_maintainer: DEFAULT_SCORE,
        responsive_maintainer_latency: MISSING_LATENCY,
        license: DEFAULT_SCORE,
        license_latency: MISSING_LATENCY,
    };

    let mut net_score = 0.0;
    let mut net_latency = 0.0;

    for kind in MetricKind::iter() {
        let (score, latency) = match batch.get(kind.index()) {
            Some(entry) => match entry.outcome() {
                Ok(score) => (*score, entry.latency()),
                Err(e) => {
                    log::warn!(target: LOG_TARGET, "{url}: {kind} could not be computed: {e:#}");
                    (DEFAULT_SCORE, MISSING_LATENCY)
                }
            },
            None => (DEFAULT_SCORE, MISSING_LATENCY),
        };

        report.set_metric(kind, score, latency);
        net_score += score * weight(kind);
        net_latency += latency;
    }

    report.net_score = round3(net_score);
    report.net_score_latency = round3(net_latency);
    report
}
