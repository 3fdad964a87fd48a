//! Command dispatch logic for repo-score

use super::{ScoreArgs, score_urls};
use crate::{Host, Result};
use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "repo-score", version, author, long_about = None)]
#[command(about = "Score the trustworthiness of open-source packages")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(flatten)]
    args: ScoreArgs,
}

/// Parse command-line arguments and score the listed packages
///
/// This is designed to be called from main.rs with the program arguments. Usage errors make
/// clap print a message and exit the process with a non-zero status.
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = Cli::parse_from(args);
    score_urls(host, &cli.args).await
}
