//! Command-line interface and orchestration for repo-score
//!
//! # Implementation Model
//!
//! [`run`] parses the command line with clap and hands the arguments to the score command,
//! which:
//!
//! 1. Sets up logging and loads the configuration (`repo-score.toml` or built-in defaults)
//! 2. Builds the immutable [`ScoringContext`](crate::scoring::ScoringContext) and validates the
//!    GitHub token, if one was given
//! 3. Reads the URL file and resolves each URL to a GitHub repository, via the npm registry when
//!    needed
//! 4. Scores each repository and writes one JSON line per URL through the [`Host`]

mod common;
mod config;
mod host;
mod run;
mod score;

pub use common::{LogLevel, init_logging};
pub use config::{Config, DEFAULT_CONFIG_FILE, DEFAULT_CONFIG_TOML};
pub use host::Host;
pub use run::run;
pub use score::{ScoreArgs, score_urls};

#[cfg(test)]
pub use host::TestHost;
