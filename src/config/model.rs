use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::dockerfile::{BaseStrategy, Boundary, ReconstructOptions, TieBreak};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub docker: DockerConfig,
    #[serde(default)]
    pub reconstruct: ReconstructConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LogConfig,
}

/// Docker connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DockerConfig {
    /// Path to docker.sock; discovered when unset
    #[serde(default)]
    pub socket: Option<PathBuf>,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// How many images are inspected at once while indexing layers
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            socket: None,
            timeout_seconds: default_timeout(),
            concurrency: default_concurrency(),
        }
    }
}

/// Reconstruction heuristics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconstructConfig {
    #[serde(default)]
    pub tie_break: TieBreak,
    #[serde(default)]
    pub base_strategy: BaseStrategy,
    #[serde(default)]
    pub boundary: Boundary,
    /// Spaces in front of reflowed `&&`
    #[serde(default = "default_indent")]
    pub indent: usize,
}

impl Default for ReconstructConfig {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::default(),
            base_strategy: BaseStrategy::default(),
            boundary: Boundary::default(),
            indent: default_indent(),
        }
    }
}

impl ReconstructConfig {
    pub fn options(&self) -> ReconstructOptions {
        ReconstructOptions {
            boundary: self.boundary,
            indent: self.indent,
        }
    }
}

/// Output settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Terminate each instruction with a newline when writing a file
    #[serde(default)]
    pub file_newlines: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log to this file instead of stderr
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

// Default value functions
fn default_timeout() -> u64 {
    crate::docker::DEFAULT_TIMEOUT_SECS
}

fn default_concurrency() -> usize {
    8
}

fn default_indent() -> usize {
    crate::dockerfile::step::DEFAULT_INDENT
}

fn default_log_level() -> String {
    "warn".to_string()
}
