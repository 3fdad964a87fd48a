use crate::Result;
use crate::metrics::MetricKind;
use ohno::IntoAppError;
use serde::Serialize;

/// One output line: the net score and every metric's score and latency.
///
/// Fields serialize in declaration order, which is the stable key order of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "NetScore")]
    pub net_score: f64,
    #[serde(rename = "NetScore_Latency")]
    pub net_score_latency: f64,
    #[serde(rename = "RampUp")]
    pub ramp_up: f64,
    #[serde(rename = "RampUp_Latency")]
    pub ramp_up_latency: f64,
    #[serde(rename = "Correctness")]
    pub correctness: f64,
    #[serde(rename = "Correctness_Latency")]
    pub correctness_latency: f64,
    #[serde(rename = "BusFactor")]
    pub bus_factor: f64,
    #[serde(rename = "BusFactor_Latency")]
    pub bus_factor_latency: f64,
    #[serde(rename = "ResponsiveMaintainer")]
    pub responsive_maintainer: f64,
    #[serde(rename = "ResponsiveMaintainer_Latency")]
    pub responsive_maintainer_latency: f64,
    #[serde(rename = "License")]
    pub license: f64,
    #[serde(rename = "License_Latency")]
    pub license_latency: f64,
}

impl ScoreReport {
    /// Score and latency reported for one metric
    #[must_use]
    pub const fn metric(&self, kind: MetricKind) -> (f64, f64) {
        match kind {
            MetricKind::RampUp => (self.ramp_up, self.ramp_up_latency),
            MetricKind::Correctness => (self.correctness, self.correctness_latency),
            MetricKind::BusFactor => (self.bus_factor, self.bus_factor_latency),
            MetricKind::ResponsiveMaintainer => (self.responsive_maintainer, self.responsive_maintainer_latency),
            MetricKind::License => (self.license, self.license_latency),
        }
    }

    pub(crate) fn set_metric(&mut self, kind: MetricKind, score: f64, latency: f64) {
        let (score_slot, latency_slot) = match kind {
            MetricKind::RampUp => (&mut self.ramp_up, &mut self.ramp_up_latency),
            MetricKind::Correctness => (&mut self.correctness, &mut self.correctness_latency),
            MetricKind::BusFactor => (&mut self.bus_factor, &mut self.bus_factor_latency),
            MetricKind::ResponsiveMaintainer => (&mut self.responsive_maintainer, &mut self.responsive_maintainer_latency),
            MetricKind::License => (&mut self.license, &mut self.license_latency),
        };
        *score_slot = score;
        *latency_slot = latency;
    }

    /// Serialize as a single line of JSON
    pub fn to_json_line(&self) -> Result<String> {
        serde_json::to_string(self).into_app_err("serializing score report")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> ScoreReport {
        ScoreReport {
            url: "https://github.com/a/b".into(),
            net_score: 0.35,
            net_score_latency: 0.5,
            ramp_up: 0.0,
            ramp_up_latency: -1.0,
            correctness: 0.0,
            correctness_latency: -1.0,
            bus_factor: 0.4,
            bus_factor_latency: 1.25,
            responsive_maintainer: 0.0,
            responsive_maintainer_latency: -1.0,
            license: 1.0,
            license_latency: 2.25,
        }
    }

    #[test]
    fn test_key_order() {
        let line = report().to_json_line().unwrap();
        let keys = [
            "\"URL\"",
            "\"NetScore\"",
            "\"NetScore_Latency\"",
            "\"RampUp\"",
            "\"RampUp_Latency\"",
            "\"Correctness\"",
            "\"Correctness_Latency\"",
            "\"BusFactor\"",
            "\"BusFactor_Latency\"",
            "\"ResponsiveMaintainer\"",
            "\"ResponsiveMaintainer_Latency\"",
            "\"License\"",
            "\"License_Latency\"",
        ];

        let positions: Vec<usize> = keys.iter().map(|k| line.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{line}");
    }

    #[test]
    fn test_single_line() {
        let line = report().to_json_line().unwrap();
        assert!(!line.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["URL"], "https://github.com/a/b");
        assert_eq!(value["BusFactor_Latency"], 1.25);
        assert_eq!(value["RampUp_Latency"], -1.0);
    }

    #[test]
    fn test_set_and_get_metric() {
        let mut r = report();
        r.set_metric(MetricKind::Correctness, 0.83, 4.5);
        assert_eq!(r.metric(MetricKind::Correctness), (0.83, 4.5));
        assert_eq!(r.correctness, 0.83);
    }
}
