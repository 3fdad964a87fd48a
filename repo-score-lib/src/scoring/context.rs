use crate::Result;
use crate::commands::Config;
use crate::facts::{github, npm};
use camino::Utf8PathBuf;
use core::time::Duration;
use ohno::IntoAppError;
use std::sync::Arc;
use url::Url;

/// Everything metrics need at run time, built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct ScoringContext {
    pub github: github::Client,
    pub npm: npm::Client,
    pub github_web_url: Url,
    pub clone_root: Utf8PathBuf,
    pub lint_command: Arc<[String]>,
    pub git_timeout: Duration,
    pub metric_timeout: Option<Duration>,
}

impl ScoringContext {
    pub fn from_config(config: &Config, github_token: Option<&str>) -> Result<Self> {
        let github = github::Client::new(github_token, &config.github_api_url, config.request_timeout)?;
        let npm = npm::Client::new(&config.npm_registry_url, config.request_timeout)?;

        let github_web_url =
            Url::parse(&config.github_web_url).into_app_err_with(|| format!("invalid github_web_url '{}'", config.github_web_url))?;

        let clone_root = match &config.clone_dir {
            Some(dir) => dir.clone(),
            None => Utf8PathBuf::from_path_buf(std::env::temp_dir().join("repo-score"))
                .map_err(|p| ohno::app_err!("temporary directory '{}' is not valid UTF-8", p.display()))?,
        };

        Ok(Self {
            github,
            npm,
            github_web_url,
            clone_root,
            lint_command: Arc::from(config.lint_command.as_slice()),
            git_timeout: config.git_timeout,
            metric_timeout: (!config.metric_timeout.is_zero()).then_some(config.metric_timeout),
        })
    }
}
