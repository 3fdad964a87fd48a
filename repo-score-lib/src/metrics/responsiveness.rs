use super::Metric;
use crate::Result;
use crate::facts::github::{self, IssueNode};
use futures_util::future::BoxFuture;

/// Response time at which the score bottoms out: 28 days, in minutes
const MAX_RESPONSE_MINUTES: f64 = 28.0 * 24.0 * 60.0;

/// Minutes until an issue first got a response, capped at [`MAX_RESPONSE_MINUTES`] for
/// issues nobody has answered.
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "minute counts fit comfortably in an f64")]
pub fn response_minutes(issue: &IssueNode) -> f64 {
    issue.first_response_at().map_or(MAX_RESPONSE_MINUTES, |responded| {
        ((responded - issue.created_at).num_minutes() as f64).max(0.0)
    })
}

/// 1 for instant responses down to 0 for an average of 28 days or more.
///
/// A repository without open issues averages zero minutes and so scores 1.
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "at most 100 issues are considered")]
pub fn responsiveness_score(issues: &[IssueNode]) -> f64 {
    if issues.is_empty() {
        return 1.0;
    }

    let total: f64 = issues.iter().map(response_minutes).sum();
    let average = total / issues.len() as f64;
    1.0 - average.min(MAX_RESPONSE_MINUTES) / MAX_RESPONSE_MINUTES
}

/// Scores how quickly maintainers react to open issues.
#[derive(Debug, Clone)]
pub struct ResponsivenessMetric {
    github: github::Client,
}

impl ResponsivenessMetric {
    #[must_use]
    pub const fn new(github: github::Client) -> Self {
        Self { github }
    }
}

impl Metric for ResponsivenessMetric {
    fn score<'a>(&'a self, owner: &'a str, repo: &'a str) -> BoxFuture<'a, Result<f64>> {
        Box::pin(async move {
            let issues = self.github.fetch_open_issues(owner, repo).await?;
            log::debug!(target: super::LOG_TARGET, "{owner}/{repo} has {} open issues considered", issues.len());
            Ok(responsiveness_score(&issues))
        })
    }
}
