use super::Metric;
use crate::Result;
use crate::facts::github::{self, CommitNode};
use futures_util::future::BoxFuture;
use std::collections::HashMap;

/// A bus factor of this many authors or more earns a full score
const FULL_SCORE_BUS_FACTOR: usize = 5;

const UNKNOWN_AUTHOR: &str = "<unknown>";

/// Smallest number of authors who together made at least half of the commits.
///
/// Commits are attributed by author name, falling back to the email address.
#[must_use]
pub fn bus_factor(commits: &[CommitNode]) -> usize {
    let mut by_author: HashMap<&str, usize> = HashMap::new();
    for commit in commits {
        let author = commit
            .author
            .as_ref()
            .and_then(|a| a.name.as_deref().filter(|n| !n.is_empty()).or(a.email.as_deref()))
            .unwrap_or(UNKNOWN_AUTHOR);
        *by_author.entry(author).or_default() += 1;
    }

    let mut counts: Vec<usize> = by_author.into_values().collect();
    counts.sort_unstable_by(|a, b| b.cmp(a));

    let total = commits.len();
    let mut cumulative = 0;
    let mut factor = 0;
    for count in counts {
        cumulative += count;
        factor += 1;
        if cumulative * 2 >= total {
            break;
        }
    }

    factor
}

#[must_use]
#[expect(clippy::cast_precision_loss, reason = "bus factors are tiny")]
pub fn bus_factor_score(commits: &[CommitNode]) -> f64 {
    (bus_factor(commits) as f64 / FULL_SCORE_BUS_FACTOR as f64).min(1.0)
}

/// Scores how widely authorship of recent commits is spread.
#[derive(Debug, Clone)]
pub struct BusFactorMetric {
    github: github::Client,
}

impl BusFactorMetric {
    #[must_use]
    pub const fn new(github: github::Client) -> Self {
        Self { github }
    }
}

impl Metric for BusFactorMetric {
    fn score<'a>(&'a self, owner: &'a str, repo: &'a str) -> BoxFuture<'a, Result<f64>> {
        Box::pin(async move {
            let commits = self.github.fetch_commits(owner, repo).await?;
            Ok(bus_factor_score(&commits))
        })
    }
}
