use super::normalize_repository_url;
use crate::Result;
use crate::facts::RepoSpec;
use core::time::Duration;
use ohno::{IntoAppError, bail};
use reqwest::StatusCode;
use serde::Deserialize;

const LOG_TARGET: &str = "       npm";

/// The parts of an npm registry package document we care about
#[derive(Debug, Clone, Deserialize)]
pub struct PackageDocument {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub repository: Option<RepositoryField>,
}

/// The `repository` field, which may be a bare string or an object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RepositoryField {
    Url(String),
    Object {
        #[serde(default)]
        url: Option<String>,
    },
}

impl RepositoryField {
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Url(url) => Some(url),
            Self::Object { url } => url.as_deref(),
        }
    }
}

/// npm registry client
#[derive(Debug, Clone)]
pub struct Client {
    client: reqwest::Client,
    base_url: String,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent("repo-score").timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the registry document of a package.
    pub async fn package(&self, name: &str) -> Result<PackageDocument> {
        // Scoped names keep their '@' but the separator must be escaped
        let url = format!("{}/{}", self.base_url, name.replace('/', "%2F"));
        log::debug!(target: LOG_TARGET, "Querying npm registry for '{name}'");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .into_app_err_with(|| format!("querying npm registry for '{name}'"))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            bail!("npm package '{name}' not found");
        }
        if !status.is_success() {
            bail!("npm registry request for '{name}' failed ({status})");
        }

        resp.json()
            .await
            .into_app_err_with(|| format!("decoding npm registry document for '{name}'"))
    }

    /// Find the GitHub repository a package is published from.
    pub async fn resolve_repository(&self, name: &str) -> Result<RepoSpec> {
        let doc = self.package(name).await?;

        let raw = doc
            .repository
            .as_ref()
            .and_then(RepositoryField::url)
            .into_app_err_with(|| format!("npm package '{name}' does not declare a repository"))?;

        let normalized =
            normalize_repository_url(raw).into_app_err_with(|| format!("npm package '{name}' has an empty repository URL"))?;

        let repo_spec: RepoSpec = normalized
            .parse()
            .map_err(|e| ohno::app_err!("npm package '{name}' is not hosted on GitHub (repository '{raw}'): {e}"))?;

        log::debug!(target: LOG_TARGET, "npm package '{name}' resolved to {repo_spec}");
        Ok(repo_spec)
    }
}
