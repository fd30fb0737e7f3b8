//! Configuration for the relay CLI.
//!
//! Settings load from a TOML file (`~/.relay/config.toml` by default); a
//! missing file falls back to defaults so the CLI works out of the box with
//! a replay events file.

use std::path::{Path, PathBuf};

use relay::engine::GraphConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    /// TOML serialization error.
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelayConfig {
    /// Opaque graph-construction parameters passed to the engine.
    #[serde(default)]
    pub graph: GraphConfig,

    /// Replay engine settings.
    #[serde(default)]
    pub replay: ReplayConfig,
}

/// Settings for the bundled replay engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Path to a JSON-Lines file of recorded workflow events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events_file: Option<PathBuf>,
}

/// Get the default config directory path.
#[must_use]
pub fn default_config_dir() -> PathBuf {
    dirs_next::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".relay")
}

/// Get the default config file path.
#[must_use]
pub fn config_path() -> PathBuf {
    default_config_dir().join("config.toml")
}

/// Load configuration from the default path.
pub async fn load_config() -> ConfigResult<RelayConfig> {
    load_config_from(&config_path()).await
}

/// Load configuration from a specific path.
pub async fn load_config_from(path: &Path) -> ConfigResult<RelayConfig> {
    if !path.exists() {
        info!(path = %path.display(), "config file not found, using defaults");
        return Ok(RelayConfig::default());
    }

    let content = tokio::fs::read_to_string(path).await?;
    let config: RelayConfig = toml::from_str(&content)?;
    debug!(path = %path.display(), "loaded config file");

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let toml = r#"
            [graph]
            server = "ollama"
            model = "llama3"
            model_endpoint = "http://localhost:11434"
            temperature = 0.2
            recursion_limit = 25

            [replay]
            events_file = "run.jsonl"
        "#;
        let config: RelayConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.graph.server, "ollama");
        assert_eq!(config.graph.recursion_limit, 25);
        assert_eq!(
            config.replay.events_file.as_deref(),
            Some(Path::new("run.jsonl"))
        );
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config: RelayConfig = toml::from_str("").unwrap();
        assert_eq!(
            config.graph.recursion_limit,
            relay::engine::DEFAULT_RECURSION_LIMIT
        );
        assert!(config.replay.events_file.is_none());
    }

    #[test]
    fn unknown_top_level_key_is_rejected() {
        let result: Result<RelayConfig, _> = toml::from_str("[nonsense]\nx = 1\n");
        assert!(result.is_err());
    }
}
