use crate::Result;
use core::fmt::{Display, Formatter};
use core::str::FromStr;
use ohno::{IntoAppError, bail};
use std::sync::Arc;
use url::Url;

const GITHUB_HOST: &str = "github.com";

/// Identity of a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSpec {
    url: Arc<Url>,
    owner: Arc<str>,
    repo: Arc<str>,
}

impl RepoSpec {
    /// Extract the owner and repository name from a GitHub URL.
    ///
    /// Anything after the repository segment (tree paths, issue links, etc.) is dropped,
    /// as is a trailing `.git`.
    pub fn parse(url: &Url) -> Result<Self> {
        let host = url.host_str().unwrap_or_default();
        let host = host.strip_prefix("www.").unwrap_or(host);
        if !host.eq_ignore_ascii_case(GITHUB_HOST) {
            bail!("not a GitHub repository URL: {url}");
        }

        let path_segments: Vec<_> = url.path_segments().map(Iterator::collect).unwrap_or_default();

        if path_segments.len() < 2 {
            bail!("invalid repository URL format: {url}");
        }

        let owner = path_segments[0];
        let repo = path_segments[1].trim_end_matches(".git");

        if owner.is_empty() || repo.is_empty() {
            bail!("invalid repository URL: empty owner or repo name: {url}");
        }

        let clean_url = Url::parse(&format!("https://{GITHUB_HOST}/{owner}/{repo}")).into_app_err("reconstructing repository URL")?;

        Ok(Self {
            owner: Arc::from(owner),
            repo: Arc::from(repo),
            url: Arc::new(clean_url),
        })
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }
}

impl FromStr for RepoSpec {
    type Err = ohno::AppError;

    /// Parse a repository link, tolerating a missing scheme (`github.com/owner/repo`).
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let url = if s.contains("://") {
            Url::parse(s)
        } else {
            Url::parse(&format!("https://{s}"))
        }
        .into_app_err_with(|| format!("invalid repository URL '{s}'"))?;

        Self::parse(&url)
    }
}

impl Display for RepoSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
