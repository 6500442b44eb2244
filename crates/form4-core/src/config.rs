//! Environment configuration
//!
//! Settings come from the process environment after an optional `.env`
//! file has been loaded:
//! - `DATABASE_URL` - SQLite database path (`sqlite://` prefix accepted)
//! - `FORM4_DB_KEY` - SQLCipher passphrase (unset = unencrypted database)

use std::path::PathBuf;

use tracing::debug;

use crate::error::{Error, Result};

/// Environment variable naming the database
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Environment variable for database encryption key
pub const DB_KEY_ENV: &str = "FORM4_DB_KEY";

/// Database path used when nothing is configured
pub const DEFAULT_DB_PATH: &str = "form4.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub db_path: PathBuf,
    pub db_key: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            db_key: None,
        }
    }
}

impl Settings {
    /// Load `.env` (if present) and read settings from the environment
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenv::dotenv() {
            debug!(path = %path.display(), "Loaded .env file");
        }
        Self::from_vars(
            std::env::var(DATABASE_URL_ENV).ok(),
            std::env::var(DB_KEY_ENV).ok(),
        )
    }

    /// Build settings from raw variable values
    pub fn from_vars(database_url: Option<String>, db_key: Option<String>) -> Result<Self> {
        let db_path = match database_url.as_deref().map(str::trim) {
            None | Some("") => PathBuf::from(DEFAULT_DB_PATH),
            Some(url) => parse_database_url(url)?,
        };

        Ok(Self {
            db_path,
            db_key: db_key.filter(|k| !k.is_empty()),
        })
    }
}

/// Turn a `DATABASE_URL` value into a file path
pub fn parse_database_url(url: &str) -> Result<PathBuf> {
    let path = if let Some(rest) = url.strip_prefix("sqlite://") {
        rest
    } else if let Some(rest) = url.strip_prefix("sqlite:") {
        rest
    } else if url.contains("://") {
        return Err(Error::Config(format!(
            "Unsupported database URL scheme: {} (expected a sqlite:// URL or a file path)",
            url
        )));
    } else {
        url
    };

    if path.is_empty() {
        return Err(Error::Config("DATABASE_URL has no path".to_string()));
    }

    Ok(PathBuf::from(path))
}
