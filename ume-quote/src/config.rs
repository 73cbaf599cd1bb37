use shared::error::AppResult;
use std::path::PathBuf;
use ume_payments::RateTable;

/// Quote tool configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | LOG_LEVEL | warn | tracing max level |
/// | LOG_DIR | (unset) | directory for a daily rolling log file |
/// | RATE_TABLE_PATH | (unset) | JSON rate table replacing the standard one |
///
/// A `.env` file in the working directory is read first.
///
/// ```ignore
/// RATE_TABLE_PATH=/etc/ume/rates.json ume-quote 1000 --method credit --terminal bbva
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_level: String,
    pub log_dir: Option<String>,
    pub rate_table_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".into(),
            log_dir: None,
            rate_table_path: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            log_level: non_empty("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: non_empty("LOG_DIR"),
            rate_table_path: non_empty("RATE_TABLE_PATH").map(PathBuf::from),
        }
    }

    /// Rate table from `RATE_TABLE_PATH`, or the standard one
    pub fn rate_table(&self) -> AppResult<RateTable> {
        match &self.rate_table_path {
            Some(path) => RateTable::load(path),
            None => Ok(RateTable::standard()),
        }
    }
}
