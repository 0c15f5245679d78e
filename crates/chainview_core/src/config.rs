//! Explorer configuration passed explicitly to the components that need it.
//!
//! # Responsibility
//! - Hold the settings shared by logging, decoding and query display.
//! - Load them from a JSON file and validate them before use.
//!
//! # Invariants
//! - Missing fields take their defaults; unknown fields are rejected.
//! - A validated config always has a known log level and, if set, an
//!   absolute `log_dir`.

use crate::codec::{ByteFormat, DecodeMode};
use crate::logging::{default_log_level, normalize_level};
use crate::query::default_redacted_keys;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    InvalidLogLevel(String),
    RelativeLogDir(PathBuf),
    EmptyRedactedKey,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config JSON: {err}"),
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
            Self::RelativeLogDir(dir) => {
                write!(f, "log_dir must be an absolute path, got `{}`", dir.display())
            }
            Self::EmptyRedactedKey => write!(f, "redacted_keys cannot contain blank entries"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Settings for one explorer session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExplorerConfig {
    /// `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Rolling log file directory. `None` logs to stderr.
    pub log_dir: Option<PathBuf>,
    /// Policy for turning byte input into text.
    pub decode_mode: DecodeMode,
    /// Default rendering for encoded bytes.
    pub byte_format: ByteFormat,
    /// Query parameters masked before display.
    pub redacted_keys: Vec<String>,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            decode_mode: DecodeMode::default(),
            byte_format: ByteFormat::default(),
            redacted_keys: default_redacted_keys(),
        }
    }
}

impl ExplorerConfig {
    /// Parses and validates a JSON config document.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates the JSON config at `path`.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        normalize_level(&self.log_level).map_err(ConfigError::InvalidLogLevel)?;
        if let Some(dir) = &self.log_dir {
            if !dir.is_absolute() {
                return Err(ConfigError::RelativeLogDir(dir.clone()));
            }
        }
        if self.redacted_keys.iter().any(|key| key.trim().is_empty()) {
            return Err(ConfigError::EmptyRedactedKey);
        }
        Ok(())
    }
}
