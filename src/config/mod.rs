pub mod schema;

pub use schema::LlmConfig;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

pub const ENV_BASE_URL: &str = "LOCAL_LLM_BASE_URL";
pub const ENV_MODEL: &str = "LOCAL_LLM_MODEL";
pub const ENV_MAX_TOKENS: &str = "LOCAL_LLM_MAX_TOKENS";
pub const ENV_TEMPERATURE: &str = "LOCAL_LLM_TEMPERATURE";
pub const ENV_TIMEOUT_SECS: &str = "LOCAL_LLM_TIMEOUT_SECS";

/// Default config file location (`<config dir>/mcp-local-llm/config.toml`).
pub fn default_config_path() -> PathBuf {
    directories::BaseDirs::new()
        .map(|d| d.config_dir().join("mcp-local-llm").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("mcp-local-llm.toml"))
}

/// Expand `~` in a user-supplied path.
pub fn resolve_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Load config from the given path, or return defaults.
pub fn load_config(path: &Path) -> Result<LlmConfig> {
    if path.exists() {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: LlmConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config (TOML) at {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    } else {
        Ok(LlmConfig::default())
    }
}

/// Load the file layer, then apply `LOCAL_LLM_*` environment overrides.
pub fn load_effective(path: &Path) -> Result<LlmConfig> {
    let mut config = load_config(path)?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Apply environment-style overrides using `lookup` to fetch each key.
///
/// Empty values are ignored. Numeric values that fail to parse keep the
/// previous setting.
pub fn apply_env_overrides<F>(config: &mut LlmConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(url) = get(ENV_BASE_URL) {
        config.base_url = url;
    }
    if let Some(model) = get(ENV_MODEL) {
        config.default_model = model;
    }
    if let Some(n) = get(ENV_MAX_TOKENS).and_then(|v| parse_or_warn::<u32>(ENV_MAX_TOKENS, &v)) {
        config.default_max_tokens = n;
    }
    if let Some(t) =
        get(ENV_TEMPERATURE).and_then(|v| parse_or_warn::<f64>(ENV_TEMPERATURE, &v))
    {
        config.default_temperature = t;
    }
    if let Some(secs) =
        get(ENV_TIMEOUT_SECS).and_then(|v| parse_or_warn::<u64>(ENV_TIMEOUT_SECS, &v))
    {
        config.request_timeout_secs = Some(secs);
    }
}

fn parse_or_warn<T: FromStr>(key: &str, raw: &str) -> Option<T> {
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a valid number", key, raw);
            None
        }
    }
}

/// Render the effective config as TOML.
pub fn to_toml(config: &LlmConfig) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_local_ollama() {
        let config = LlmConfig::default();
        assert_eq!(config.base_url, "http://localhost:11434/v1");
        assert_eq!(config.default_model, "qwen2.5-coder:7b");
        assert_eq!(config.default_max_tokens, 2048);
        assert_eq!(config.default_temperature, 0.7);
        assert_eq!(config.request_timeout_secs, None);
    }

    #[test]
    fn env_overrides_every_field() {
        let mut config = LlmConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[
                (ENV_BASE_URL, "http://localhost:12434/engines/v1"),
                (ENV_MODEL, "llama3.2"),
                (ENV_MAX_TOKENS, "512"),
                (ENV_TEMPERATURE, "0.2"),
                (ENV_TIMEOUT_SECS, "30"),
            ]),
        );
        assert_eq!(config.base_url, "http://localhost:12434/engines/v1");
        assert_eq!(config.default_model, "llama3.2");
        assert_eq!(config.default_max_tokens, 512);
        assert_eq!(config.default_temperature, 0.2);
        assert_eq!(config.request_timeout_secs, Some(30));
    }

    #[test]
    fn unparseable_numbers_keep_previous_value() {
        let mut config = LlmConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[(ENV_MAX_TOKENS, "lots"), (ENV_TEMPERATURE, ""), (ENV_MODEL, " ")]),
        );
        assert_eq!(config, LlmConfig::default());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, LlmConfig::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "default_model = \"phi3\"\nrequest_timeout_secs = 5\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.default_model, "phi3");
        assert_eq!(config.request_timeout_secs, Some(5));
        assert_eq!(config.base_url, "http://localhost:11434/v1");
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "default_max_tokens = \"many\"").unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn toml_rendering_roundtrips() {
        let config = LlmConfig::default();
        let rendered = to_toml(&config).unwrap();
        assert!(rendered.contains("base_url = \"http://localhost:11434/v1\""));
        let parsed: LlmConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
