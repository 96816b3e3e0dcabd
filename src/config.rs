use anyhow::Context;
use camino::{
    Utf8Path,
    Utf8PathBuf,
};
use serde::Deserialize;
use std::collections::HashMap;

fn default_log_level() -> String {
    "info".to_string()
}

fn default_confirm() -> bool {
    true
}

#[derive(Deserialize, Debug)]
pub struct Config {
    /// The directory to write the log file to.
    ///
    /// File logging is disabled if this is missing.
    pub log_dir: Option<Utf8PathBuf>,

    /// The filter for the log file, in `RUST_LOG` syntax.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Whether to ask before resetting a match.
    #[serde(default = "default_confirm")]
    pub confirm_reset: bool,

    /// Whether to ask before exiting.
    #[serde(default = "default_confirm")]
    pub confirm_exit: bool,

    #[serde(flatten)]
    pub extra: HashMap<String, toml::Value>,
}

impl Config {
    /// Load a config from a path
    pub fn load_from_path(path: &Utf8Path) -> anyhow::Result<Self> {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from '{path}'"))
            .and_then(|s| Self::load_from_str(&s))
    }

    /// Load a config from a string
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("Failed to parse config")
    }

    /// Validate a config
    pub fn validate(&self) -> Vec<ValidationMessage> {
        let mut errors = Vec::new();

        if let Err(e) = tracing_subscriber::EnvFilter::try_new(&self.log_level) {
            errors.push(ValidationMessage {
                severity: Severity::Error,
                error: ValidationError::InvalidLogLevel {
                    log_level: self.log_level.clone(),
                    reason: e.to_string(),
                },
            });
        }

        if let Some(log_dir) = self.log_dir.as_deref() {
            if log_dir.is_file() {
                errors.push(ValidationMessage {
                    severity: Severity::Error,
                    error: ValidationError::LogDirIsFile(log_dir.to_path_buf()),
                });
            }
        }

        let mut extra_keys: Vec<&String> = self.extra.keys().collect();
        extra_keys.sort();
        for key in extra_keys {
            errors.push(ValidationMessage {
                severity: Severity::Warn,
                error: ValidationError::UnknownKey(key.clone()),
            });
        }

        errors
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_dir: None,
            log_level: default_log_level(),
            confirm_reset: default_confirm(),
            confirm_exit: default_confirm(),
            extra: HashMap::new(),
        }
    }
}

#[derive(Debug)]
pub struct ValidationMessage {
    severity: Severity,
    error: ValidationError,
}

impl ValidationMessage {
    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn error(&self) -> &ValidationError {
        &self.error
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid log level \"{log_level}\": {reason}")]
    InvalidLogLevel { log_level: String, reason: String },

    #[error("log dir \"{0}\" is a file")]
    LogDirIsFile(Utf8PathBuf),

    #[error("unknown key \"{0}\"")]
    UnknownKey(String),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Severity {
    Warn,
    Error,
}
