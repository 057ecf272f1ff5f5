//! TOML configuration for the `kmp-trace` harness.
//!
//! Every key is optional; command-line flags are applied on top of whatever
//! the file provides.
//!
//! ```toml
//! trace = "per-iteration"
//! empty_pattern = "match-everywhere"
//! format = "json"
//! show_table = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::matcher::{EmptyPatternPolicy, SearchOptions, TraceMode};
use crate::report::OutputFormat;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub trace: TraceMode,
    pub empty_pattern: EmptyPatternPolicy,
    pub format: OutputFormat,
    pub show_table: bool,
    pub show_trace: bool,
    pub color: bool,
    pub per_line: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trace: TraceMode::Full,
            empty_pattern: EmptyPatternPolicy::Reject,
            format: OutputFormat::Text,
            show_table: false,
            show_trace: true,
            color: true,
            per_line: false,
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            trace: if self.show_trace { self.trace } else { TraceMode::Off },
            empty_pattern: self.empty_pattern,
        }
    }
}
