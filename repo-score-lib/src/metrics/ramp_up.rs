use super::Metric;
use crate::Result;
use crate::facts::github;
use futures_util::future::BoxFuture;
use regex::Regex;
use std::sync::LazyLock;

/// Sections a newcomer looks for in a README
const KEYWORDS: &[&str] = &["installation", "usage", "api", "examples"];

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid HTML tag pattern"));

/// Fraction of the documentation keywords present in the README text, ignoring markup.
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "keyword counts are tiny")]
pub fn ramp_up_score(readme: &str) -> f64 {
    let text = HTML_TAG.replace_all(readme, " ").to_lowercase();
    let found = KEYWORDS.iter().filter(|k| text.contains(*k)).count();
    found as f64 / KEYWORDS.len() as f64
}

/// Scores how easy it is to get started, judged from the README.
#[derive(Debug, Clone)]
pub struct RampUpMetric {
    github: github::Client,
}

impl RampUpMetric {
    #[must_use]
    pub const fn new(github: github::Client) -> Self {
        Self { github }
    }
}

impl Metric for RampUpMetric {
    fn score<'a>(&'a self, owner: &'a str, repo: &'a str) -> BoxFuture<'a, Result<f64>> {
        Box::pin(async move {
            let readme = self.github.fetch_readme(owner, repo).await?;
            Ok(readme.as_deref().map_or(0.0, ramp_up_score))
        })
    }
}
