use super::common::{LogLevel, init_logging};
use super::config::Config;
use super::Host;
use crate::Result;
use crate::facts::{read_url_file, resolve};
use crate::scoring::{Scorer, ScoringContext};
use camino::Utf8PathBuf;
use clap::Args;
use ohno::{IntoAppError, bail};
use std::io::Write;

const LOG_TARGET: &str = "     score";

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// File with one GitHub repository or npm package URL per line
    #[arg(value_name = "URL_FILE")]
    pub url_file: Utf8PathBuf,

    /// GitHub personal access token
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Path to configuration file (default is `repo-score.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", env = "LOG_LEVEL", default_value = "none")]
    pub log_level: LogLevel,

    /// Append diagnostic output to this file instead of writing it to stderr
    #[arg(long, value_name = "PATH", env = "LOG_FILE")]
    pub log_file: Option<Utf8PathBuf>,
}

/// Score every URL in the input file, writing one JSON line per resolvable URL.
///
/// URLs that cannot be mapped to a GitHub repository are reported on the error stream; once all
/// URLs have been processed, the command fails if there were any.
pub async fn score_urls<H: Host>(host: &mut H, args: &ScoreArgs) -> Result<()> {
    init_logging(args.log_level, args.log_file.as_deref())?;

    let config = Config::load(args.config.as_deref())?;
    let token = args.github_token.as_deref().map(str::trim).filter(|t| !t.is_empty());
    let ctx = ScoringContext::from_config(&config, token)?;

    if token.is_some() {
        if !ctx.github.validate_token().await? {
            let _ = writeln!(host.error(), "The supplied GitHub token was rejected");
            host.exit(1);
            bail!("GitHub token is invalid");
        }
    } else {
        log::warn!(target: LOG_TARGET, "No GitHub token supplied, GitHub queries will likely fail");
    }

    let urls = read_url_file(&args.url_file)?;
    log::info!(target: LOG_TARGET, "Scoring {} URLs from '{}'", urls.len(), args.url_file);

    let scorer = Scorer::from_context(&ctx);
    let mut unresolved = 0;

    for url in &urls {
        match resolve(url, &ctx.npm).await {
            Ok(repo_spec) => {
                let report = scorer.get_scores(repo_spec.owner(), repo_spec.repo(), url).await;
                writeln!(host.output(), "{}", report.to_json_line()?).into_app_err("writing score report")?;
            }
            Err(e) => {
                log::error!(target: LOG_TARGET, "Could not resolve '{url}': {e:#}");
                let _ = writeln!(host.error(), "{url}: {e:#}");
                unresolved += 1;
            }
        }
    }

    if unresolved > 0 {
        host.exit(1);
        bail!("{unresolved} of {} URLs could not be resolved", urls.len());
    }

    Ok(())
}
