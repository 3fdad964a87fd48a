//! The individual scoring functions
//!
//! Every metric implements [`Metric`]: an async function from a repository's owner and name to
//! a score in `[0, 1]`. Each module pairs the provider with the pure computation it performs on
//! the fetched data, so the arithmetic can be tested without a network.
//!
//! | Metric | Source | Score |
//! |---|---|---|
//! | [`RampUpMetric`] | README | fraction of documentation keywords present |
//! | [`CorrectnessMetric`] | shallow clone + linter | 1 − problems per (files × 10) |
//! | [`BusFactorMetric`] | last 100 commits | authors covering half the commits, / 5 |
//! | [`ResponsivenessMetric`] | open issues | 1 − average response time / 28 days |
//! | [`LicenseMetric`] | detected license | 1 when LGPL-2.1 compatible |

mod bus_factor;
mod correctness;
mod license;
mod metric;
mod metric_kind;
mod ramp_up;
mod responsiveness;

pub use bus_factor::{BusFactorMetric, bus_factor, bus_factor_score};
pub use correctness::{CorrectnessMetric, correctness_score};
pub use license::{LicenseMetric, is_compatible, license_score};
pub use metric::Metric;
pub use metric_kind::MetricKind;
pub use ramp_up::{RampUpMetric, ramp_up_score};
pub use responsiveness::{ResponsivenessMetric, response_minutes, responsiveness_score};

const LOG_TARGET: &str = "   metrics";
