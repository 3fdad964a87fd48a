use strum::{Display, EnumCount, EnumIter, IntoStaticStr};

/// The metrics making up a net score, in dispatch order.
///
/// The display form is the key used for the metric in score reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, Display, IntoStaticStr)]
pub enum MetricKind {
    RampUp,
    Correctness,
    BusFactor,
    ResponsiveMaintainer,
    License,
}

impl MetricKind {
    /// Position of this metric in a dispatch list
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}
