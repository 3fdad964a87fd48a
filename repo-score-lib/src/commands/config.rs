use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use url::Url;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "repo-score.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Time allowed for a single metric before it is abandoned (`0s` disables the limit)
    #[serde(default = "default_metric_timeout", with = "humantime_serde")]
    pub metric_timeout: Duration,

    /// Timeout for each HTTP request to GitHub or npm
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,

    /// Timeout for cloning a repository
    #[serde(default = "default_git_timeout", with = "humantime_serde")]
    pub git_timeout: Duration,

    /// Root of the GitHub API
    #[serde(default = "default_github_api_url")]
    pub github_api_url: String,

    /// Base URL repositories are cloned from
    #[serde(default = "default_github_web_url")]
    pub github_web_url: String,

    /// Root of the npm registry
    #[serde(default = "default_npm_registry_url")]
    pub npm_registry_url: String,

    /// Directory for temporary clones (defaults to a directory under the system temp dir)
    #[serde(default)]
    pub clone_dir: Option<Utf8PathBuf>,

    /// Linter invocation, run inside the clone; must print an ESLint-style JSON report
    #[serde(default = "default_lint_command")]
    pub lint_command: Vec<String>,
}

const fn default_metric_timeout() -> Duration {
    Duration::from_secs(3 * 60)
}

const fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

const fn default_git_timeout() -> Duration {
    Duration::from_secs(2 * 60)
}

fn default_github_api_url() -> String {
    "https://api.github.com".into()
}

fn default_github_web_url() -> String {
    "https://github.com".into()
}

fn default_npm_registry_url() -> String {
    "https://registry.npmjs.org".into()
}

fn default_lint_command() -> Vec<String> {
    ["npx", "--yes", "eslint", "--format", "json", "--no-error-on-unmatched-pattern", "**/*.{ts,tsx}"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `repo-score.toml` in the working directory is used if present.
    pub fn load(config_path: Option<&Utf8Path>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
            (path.to_owned(), text)
        } else {
            let path = Utf8PathBuf::from(DEFAULT_CONFIG_FILE);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
                Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.request_timeout.is_zero() {
            return Err(app_err!("request_timeout must be greater than zero"));
        }

        if self.git_timeout.is_zero() {
            return Err(app_err!("git_timeout must be greater than zero"));
        }

        for (name, value) in [
            ("github_api_url", &self.github_api_url),
            ("github_web_url", &self.github_web_url),
            ("npm_registry_url", &self.npm_registry_url),
        ] {
            let _ = Url::parse(value).map_err(|e| app_err!("{name} is not a valid URL ('{value}'): {e}"))?;
        }

        if self.lint_command.first().is_none_or(String::is_empty) {
            return Err(app_err!("lint_command must name a program to run"));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
    }

    #[test]
    fn test_default_config_matches_serde_defaults() {
        let from_file = Config::default();
        let from_empty: Config = toml::from_str("").unwrap();

        assert_eq!(from_file.metric_timeout, from_empty.metric_timeout);
        assert_eq!(from_file.request_timeout, from_empty.request_timeout);
        assert_eq!(from_file.git_timeout, from_empty.git_timeout);
        assert_eq!(from_file.github_api_url, from_empty.github_api_url);
        assert_eq!(from_file.github_web_url, from_empty.github_web_url);
        assert_eq!(from_file.npm_registry_url, from_empty.npm_registry_url);
        assert_eq!(from_file.lint_command, from_empty.lint_command);
    }

    #[test]
    fn test_humantime_durations() {
        let config: Config = toml::from_str("metric_timeout = \"90s\"\ngit_timeout = \"5m\"").unwrap();
        assert_eq!(config.metric_timeout, Duration::from_secs(90));
        assert_eq!(config.git_timeout, Duration::from_secs(300));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let _ = toml::from_str::<Config>("no_such_setting = 1").unwrap_err();
    }

    #[test]
    fn test_validate_zero_request_timeout() {
        let config = Config {
            request_timeout: Duration::ZERO,
            ..Config::default()
        };
        let _ = config.validate().unwrap_err();
    }

    #[test]
    fn test_validate_bad_url() {
        let config = Config {
            npm_registry_url: "not a url".into(),
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("npm_registry_url"));
    }

    #[test]
    fn test_validate_empty_lint_command() {
        let config = Config {
            lint_command: Vec::new(),
            ..Config::default()
        };
        let _ = config.validate().unwrap_err();
    }

    #[test]
    fn test_zero_metric_timeout_allowed() {
        let config = Config {
            metric_timeout: Duration::ZERO,
            ..Config::default()
        };
        config.validate().unwrap();
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_explicit_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("custom.toml")).unwrap();
        fs::write(&path, "request_timeout = \"5s\"\nclone_dir = \"/var/tmp/clones\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.clone_dir.as_deref(), Some(Utf8Path::new("/var/tmp/clones")));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_missing_explicit_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("absent.toml")).unwrap();
        let _ = Config::load(Some(&path)).unwrap_err();
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_invalid_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("bad.toml")).unwrap();
        fs::write(&path, "git_timeout = \"0s\"\n").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("git_timeout"));
    }
}
