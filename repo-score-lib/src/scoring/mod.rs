//! Concurrent latency measurement and weighted aggregation
//!
//! # Implementation Model
//!
//! [`measure_concurrent_latencies`] runs a list of [`Metric`](crate::metrics::Metric)s against
//! one repository at the same time, timing each and capturing its outcome without letting one
//! failure affect the others. The result is a [`LatencyBatch`], index-aligned with the input.
//!
//! [`Scorer`] owns the fixed, ordered list of metrics described by a [`MetricSuite`]. It feeds
//! the batch through the weights in [`weight`], substituting [`DEFAULT_SCORE`] and
//! [`MISSING_LATENCY`] for failed metrics, and yields a [`ScoreReport`].
//!
//! Run-time configuration arrives through an immutable [`ScoringContext`].

mod aggregator;
mod context;
mod latency;
mod score_report;
mod weights;

pub use aggregator::{MetricSuite, Scorer};
pub use context::ScoringContext;
pub use latency::{LatencyBatch, LatencyResult, measure_concurrent_latencies, round3};
pub use score_report::ScoreReport;
pub use weights::{DEFAULT_SCORE, MISSING_LATENCY, weight};
