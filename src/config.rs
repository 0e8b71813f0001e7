use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// What to do with a submitted genre name that matches no `genres` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedGenrePolicy {
    /// Drop the name and keep the rest of the submission.
    #[default]
    Skip,
    /// Fail the whole submission.
    Reject,
    /// Insert the genre inside the same transaction.
    Create,
}

impl UnmatchedGenrePolicy {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Skip => "skip",
            Self::Reject => "reject",
            Self::Create => "create",
        }
    }
}

impl FromStr for UnmatchedGenrePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "reject" => Ok(Self::Reject),
            "create" => Ok(Self::Create),
            other => bail!("unknown genre policy '{}', expected skip, reject or create", other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => bail!("unknown log format '{}', expected pretty or json", other),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub unmatched_genres: UnmatchedGenrePolicy,
    pub log_format: LogFormat,
    /// Extra plain-text log sink, e.g. `error.log`. Unset or blank disables it.
    pub log_file: Option<PathBuf>,
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
            unmatched_genres: env::var("UNMATCHED_GENRES")
                .unwrap_or_else(|_| "skip".to_string())
                .parse()
                .context("UNMATCHED_GENRES must be skip, reject or create")?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse()
                .context("LOG_FORMAT must be pretty or json")?,
            log_file: optional_path(env::var("LOG_FILE").ok()),
            run_migrations: parse_flag(
                &env::var("RUN_MIGRATIONS").unwrap_or_else(|_| "true".to_string()),
            )
            .context("RUN_MIGRATIONS must be true or false")?,
        })
    }
}

fn optional_path(raw: Option<String>) -> Option<PathBuf> {
    raw.map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("'{}' is not a boolean", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genre_policy_parses_case_insensitively() {
        assert_eq!("Skip".parse::<UnmatchedGenrePolicy>().unwrap(), UnmatchedGenrePolicy::Skip);
        assert_eq!(" reject ".parse::<UnmatchedGenrePolicy>().unwrap(), UnmatchedGenrePolicy::Reject);
        assert_eq!("CREATE".parse::<UnmatchedGenrePolicy>().unwrap(), UnmatchedGenrePolicy::Create);
        assert!("merge".parse::<UnmatchedGenrePolicy>().is_err());
    }

    #[test]
    fn log_format_rejects_unknown_values() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn blank_log_file_is_disabled() {
        assert_eq!(optional_path(None), None);
        assert_eq!(optional_path(Some("  ".to_string())), None);
        assert_eq!(
            optional_path(Some(" logs/error.log ".to_string())),
            Some(PathBuf::from("logs/error.log"))
        );
    }

    #[test]
    fn flags_accept_common_spellings() {
        assert!(parse_flag("on").unwrap());
        assert!(!parse_flag("0").unwrap());
        assert!(parse_flag("maybe").is_err());
    }
}
