//! Configuration loading and saving for prefixsum.

use anyhow::Context;
use prefixsum_logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming a config file when no path is given explicitly.
pub const CONFIG_ENV: &str = "PREFIXSUM_CONFIG";

/// Configuration format types supported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFormat {
    Json,
    #[default]
    Yaml,
}

impl ConfigFormat {
    /// Detect format from a file extension; anything unrecognised is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => ConfigFormat::Json,
            _ => ConfigFormat::Yaml,
        }
    }
}

/// Main prefixsum configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PrefixsumConfig {
    /// Log filtering and output format
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Stop a replay at the first failed expectation
    #[serde(default)]
    pub stop_on_mismatch: bool,

    /// Print the element values after each replayed update
    #[serde(default)]
    pub show_values: bool,

    /// Largest length a replayed `create` may request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_len: Option<usize>,
}

/// Pick the config path: an explicit path wins, then `PREFIXSUM_CONFIG`.
pub fn resolve_config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| {
        std::env::var_os(CONFIG_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    })
}

/// Load the resolved config, or defaults when no path is configured.
pub fn load_or_default(explicit: Option<PathBuf>) -> anyhow::Result<PrefixsumConfig> {
    match resolve_config_path(explicit) {
        Some(path) => load_config(path),
        None => Ok(PrefixsumConfig::default()),
    }
}

/// Load configuration from a file
pub fn load_config<P: AsRef<Path>>(path: P) -> anyhow::Result<PrefixsumConfig> {
    let path = path.as_ref();
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("read config {path:?}"))?;

    match ConfigFormat::from_path(path) {
        ConfigFormat::Json => serde_json::from_str(&contents)
            .with_context(|| format!("parse JSON config {path:?}")),
        ConfigFormat::Yaml => serde_yaml::from_str(&contents)
            .with_context(|| format!("parse YAML config {path:?}")),
    }
}

/// Save configuration to a file
pub fn save_config<P: AsRef<Path>>(config: &PrefixsumConfig, path: P) -> anyhow::Result<()> {
    let path = path.as_ref();
    let contents = match ConfigFormat::from_path(path) {
        ConfigFormat::Json => {
            serde_json::to_string_pretty(config).context("serialize JSON config")?
        }
        ConfigFormat::Yaml => serde_yaml::to_string(config).context("serialize YAML config")?,
    };

    std::fs::write(path, contents).with_context(|| format!("write config {path:?}"))?;
    Ok(())
}
