use crate::metrics::MetricKind;

/// Score used for a metric that failed
pub const DEFAULT_SCORE: f64 = 0.0;

/// Latency reported for a metric that failed
pub const MISSING_LATENCY: f64 = -1.0;

/// Contribution of each metric to the net score.
///
/// Weights are non-negative and sum to 1, so the net score stays within `[0, 1]`.
#[must_use]
pub const fn weight(kind: MetricKind) -> f64 {
    match kind {
        MetricKind::RampUp | MetricKind::Correctness => 0.125,
        MetricKind::BusFactor | MetricKind::ResponsiveMaintainer | MetricKind::License => 0.25,
    }
}
