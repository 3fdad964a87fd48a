use super::RepoSpec;
use crate::Result;
use core::fmt::{Display, Formatter};
use core::str::FromStr;
use ohno::{IntoAppError, bail};
use regex::Regex;
use std::sync::LazyLock;

static GITHUB_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:https?://)?(?:www\.)?github\.com/[^/\s]+/[^/\s]+").expect("valid GitHub URL pattern"));

static NPM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://)?(?:www\.)?npmjs\.com/package/((?:@[^/\s]+/)?[^/\s?#]+)").expect("valid npm URL pattern")
});

/// A package link from the input file, classified by where it points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageUrl {
    /// A GitHub repository link.
    GitHub(RepoSpec),

    /// An npm package page; the repository must be looked up in the registry.
    Npm(String),
}

impl PackageUrl {
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();

        if GITHUB_PATTERN.is_match(text) {
            return Ok(Self::GitHub(text.parse()?));
        }

        if let Some(captures) = NPM_PATTERN.captures(text) {
            let name = captures.get(1).into_app_err("npm package name missing from URL")?.as_str();
            return Ok(Self::Npm(name.to_string()));
        }

        bail!("unsupported URL '{text}': expected a GitHub repository or an npm package")
    }
}

impl FromStr for PackageUrl {
    type Err = ohno::AppError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Display for PackageUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GitHub(repo_spec) => write!(f, "GitHub repository {repo_spec}"),
            Self::Npm(name) => write!(f, "npm package {name}"),
        }
    }
}
