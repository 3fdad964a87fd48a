use super::Metric;
use crate::Result;
use crate::facts::github;
use futures_util::future::BoxFuture;

/// Licenses whose terms allow combining with LGPL-2.1 code
const COMPATIBLE_LICENSES: &[&str] = &[
    "LGPLv2.1",
    "LGPL-2.1",
    "LGPL-2.1-only",
    "LGPL-2.1-or-later",
    "GPL-2.0",
    "MIT",
    "BSD-2-Clause",
    "BSD-3-Clause",
    "Apache-2.0",
    "CC0-1.0",
    "ISC",
    "Zlib",
    "Unlicense",
];

#[must_use]
pub fn is_compatible(spdx_id: &str) -> bool {
    COMPATIBLE_LICENSES.iter().any(|l| l.eq_ignore_ascii_case(spdx_id.trim()))
}

/// 1 for a compatible license, 0 for anything else including no license at all
#[must_use]
pub fn license_score(spdx_id: Option<&str>) -> f64 {
    match spdx_id {
        Some(id) if is_compatible(id) => 1.0,
        _ => 0.0,
    }
}

/// Scores whether the repository's detected license is compatible with LGPL-2.1.
#[derive(Debug, Clone)]
pub struct LicenseMetric {
    github: github::Client,
}

impl LicenseMetric {
    #[must_use]
    pub const fn new(github: github::Client) -> Self {
        Self { github }
    }
}

impl Metric for LicenseMetric {
    fn score<'a>(&'a self, owner: &'a str, repo: &'a str) -> BoxFuture<'a, Result<f64>> {
        Box::pin(async move {
            let spdx_id = self.github.fetch_license(owner, repo).await?;
            Ok(license_score(spdx_id.as_deref()))
        })
    }
}
