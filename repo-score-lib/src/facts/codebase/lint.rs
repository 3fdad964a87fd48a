use super::LOG_TARGET;
use crate::Result;
use camino::Utf8Path;
use ohno::{IntoAppError, bail};
use serde::Deserialize;
use tokio::process::Command;

/// Totals from one linter run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LintSummary {
    /// Number of files the linter reported on
    pub files: u64,

    /// Errors plus warnings across all files
    pub problems: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileReport {
    #[serde(default)]
    error_count: u64,
    #[serde(default)]
    warning_count: u64,
}

/// Run a linter that emits ESLint-style JSON inside `dir`.
///
/// The exit status is not checked since linters exit non-zero whenever they find problems;
/// output that is not a JSON report is treated as a failure instead.
pub async fn run_lint(dir: &Utf8Path, command: &[String]) -> Result<LintSummary> {
    let Some((program, args)) = command.split_first() else {
        bail!("no lint command configured");
    };

    log::debug!(target: LOG_TARGET, "Running '{}' in '{dir}'", command.join(" "));

    let output = Command::new(program)
        .args(args)
        .current_dir(dir)
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await
        .into_app_err_with(|| format!("could not run lint command '{program}'"))?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_lint_report(&stdout).map_err(|e| {
        let stderr = String::from_utf8_lossy(&output.stderr);
        ohno::app_err!("'{program}' did not produce a lint report ({}): {e}", stderr.trim())
    })
}

/// Sum the per-file counts of an ESLint JSON report.
pub fn parse_lint_report(json: &str) -> Result<LintSummary> {
    let reports: Vec<FileReport> = serde_json::from_str(json.trim()).into_app_err("parsing lint report")?;

    Ok(LintSummary {
        files: reports.len() as u64,
        problems: reports.iter().map(|r| r.error_count + r.warning_count).sum(),
    })
}
