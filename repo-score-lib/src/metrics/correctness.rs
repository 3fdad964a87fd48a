use super::{LOG_TARGET, Metric};
use crate::Result;
use crate::facts::codebase::{LintSummary, WorkDir, run_lint, shallow_clone};
use camino::Utf8PathBuf;
use core::time::Duration;
use futures_util::future::BoxFuture;
use ohno::IntoAppError;
use std::sync::Arc;
use url::Url;

/// Problems per file at which the score reaches 0
const PROBLEMS_PER_FILE_LIMIT: f64 = 10.0;

/// 1 minus the problem density, floored at 0 and rounded to 2 decimals.
///
/// A report without files scores 0: there was nothing the linter could vouch for.
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "lint counts fit comfortably in an f64")]
pub fn correctness_score(summary: LintSummary) -> f64 {
    if summary.files == 0 {
        return 0.0;
    }

    let score = (1.0 - summary.problems as f64 / (summary.files as f64 * PROBLEMS_PER_FILE_LIMIT)).max(0.0);
    (score * 100.0).round() / 100.0
}

/// Scores lint cleanliness of a fresh shallow clone.
#[derive(Debug, Clone)]
pub struct CorrectnessMetric {
    web_url: Url,
    clone_root: Utf8PathBuf,
    lint_command: Arc<[String]>,
    git_timeout: Duration,
}

impl CorrectnessMetric {
    /// `web_url` is the base repositories are cloned from, `https://github.com` for GitHub.
    #[must_use]
    pub fn new(web_url: Url, clone_root: Utf8PathBuf, lint_command: Arc<[String]>, git_timeout: Duration) -> Self {
        Self {
            web_url,
            clone_root,
            lint_command,
            git_timeout,
        }
    }

    fn clone_url(&self, owner: &str, repo: &str) -> Result<Url> {
        let base = self.web_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/{owner}/{repo}.git")).into_app_err_with(|| format!("building clone URL for {owner}/{repo}"))
    }

    async fn evaluate(&self, owner: &str, repo: &str) -> Result<f64> {
        let url = self.clone_url(owner, repo)?;

        // Dropping the work dir on cancellation removes it synchronously
        let work_dir = WorkDir::new(&self.clone_root, owner, repo).await?;
        let outcome = self.lint_clone(&work_dir, &url, owner, repo).await;
        work_dir.remove().await;

        outcome
    }

    async fn lint_clone(&self, work_dir: &WorkDir, url: &Url, owner: &str, repo: &str) -> Result<f64> {
        shallow_clone(work_dir.path(), url, self.git_timeout).await?;

        let summary = run_lint(work_dir.path(), &self.lint_command).await?;
        log::debug!(
            target: LOG_TARGET,
            "{owner}/{repo}: {} problems in {} linted files",
            summary.problems,
            summary.files
        );

        Ok(correctness_score(summary))
    }
}

impl Metric for CorrectnessMetric {
    fn score<'a>(&'a self, owner: &'a str, repo: &'a str) -> BoxFuture<'a, Result<f64>> {
        Box::pin(self.evaluate(owner, repo))
    }
}
