use super::{PackageUrl, RepoSpec, npm};
use crate::Result;
use camino::Utf8Path;
use ohno::{IntoAppError, bail};

const LOG_TARGET: &str = "  resolver";

/// Map one line of the URL file to the GitHub repository to score.
pub async fn resolve(url_text: &str, npm: &npm::Client) -> Result<RepoSpec> {
    let repo_spec = match PackageUrl::parse(url_text)? {
        PackageUrl::GitHub(repo_spec) => repo_spec,
        PackageUrl::Npm(name) => npm.resolve_repository(&name).await?,
    };

    log::debug!(target: LOG_TARGET, "'{url_text}' resolved to {repo_spec}");
    Ok(repo_spec)
}

/// Read a newline-delimited list of URLs, skipping blank lines.
pub fn read_url_file(path: &Utf8Path) -> Result<Vec<String>> {
    if !path.exists() {
        bail!("file not found: {path}");
    }

    let text = std::fs::read_to_string(path).into_app_err_with(|| format!("could not read URL file '{path}'"))?;

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect())
}
