use super::LOG_TARGET;
use crate::Result;
use camino::Utf8Path;
use core::time::Duration;
use ohno::{IntoAppError, bail};
use tokio::process::Command;
use url::Url;

/// Clone the tip of the default branch of a repository.
///
/// Only the latest commit is fetched (`--depth 1`); the working tree is all the linter needs.
pub async fn shallow_clone(repo_path: &Utf8Path, repo_url: &Url, timeout: Duration) -> Result<()> {
    let start_time = std::time::Instant::now();
    log::info!(target: LOG_TARGET, "Cloning repository '{repo_url}' into '{repo_path}'");

    let output = run_git_with_timeout(
        &["clone", "--depth", "1", "--single-branch", "--no-tags", repo_url.as_str(), repo_path.as_str()],
        timeout,
    )
    .await?;
    check_git_output(&output, "git clone")?;

    log::debug!(target: LOG_TARGET, "Cloned '{repo_url}' in {:.3}s", start_time.elapsed().as_secs_f64());
    Ok(())
}

fn check_git_output(output: &std::process::Output, operation: &str) -> Result<()> {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("{operation} failed: {}", stderr.trim());
    }
    Ok(())
}

async fn run_git_with_timeout(args: &[&str], timeout: Duration) -> Result<std::process::Output> {
    let child = Command::new("git")
        .args(args)
        .env("GIT_TERMINAL_PROMPT", "0")
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .into_app_err("could not spawn git command")?;

    match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(e).into_app_err_with(|| format!("'git {}' failed to run", args.join(" "))),
        Err(_) => {
            bail!("'git {}' timed out after {} seconds", args.join(" "), timeout.as_secs());
        }
    }
}
