mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use tracing::debug;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    let mut config = load_from(&config_path).await?;
    apply_env_overrides(&mut config, |key| env::var(key).ok())?;
    Ok(config)
}

/// Reads a YAML config file. A missing file yields the defaults.
pub async fn load_from(config_path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", config_path);

    let config_str = match tokio::fs::read_to_string(config_path).await {
        Ok(config_str) => config_str,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No configuration file at {}, using defaults", config_path);
            return Ok(Config::default());
        }
        Err(e) => return Err(e.into()),
    };

    let config: Config = serde_yaml::from_str(&config_str)?;
    Ok(config)
}

/// Applies `GEMINI_API_KEY` and `PORT` on top of the file configuration.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = lookup(API_KEY_ENV).filter(|key| !key.trim().is_empty()) {
        config.llm.api_key = Some(key);
    }

    if let Some(port) = lookup("PORT") {
        config.server.port = port
            .trim()
            .parse()
            .map_err(|_| Error::config(format!("Invalid PORT value: '{}'", port)))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.logs.level, "info");
        assert_eq!(config.server.frontend_file, "User_Interface.html");
        assert_eq!(config.llm.provider, LlmProvider::Gemini);
        assert_eq!(config.llm.model, "gemini-1.5-flash");
        assert!(config.llm.api_key().is_none());
    }

    #[test]
    fn test_env_key_overrides_file() {
        let mut config = Config::default();
        config.llm.api_key = Some("from-file".to_string());

        apply_env_overrides(&mut config, lookup_from(&[(API_KEY_ENV, "from-env")])).unwrap();
        assert_eq!(config.llm.api_key(), Some("from-env"));
    }

    #[test]
    fn test_blank_env_key_is_ignored() {
        let mut config = Config::default();
        config.llm.api_key = Some("from-file".to_string());

        apply_env_overrides(&mut config, lookup_from(&[(API_KEY_ENV, "  ")])).unwrap();
        assert_eq!(config.llm.api_key(), Some("from-file"));
    }

    #[test]
    fn test_port_override() {
        let mut config = Config::default();
        apply_env_overrides(&mut config, lookup_from(&[("PORT", "10000")])).unwrap();
        assert_eq!(config.server.port, 10000);
    }

    #[test]
    fn test_invalid_port_override() {
        let mut config = Config::default();
        let result = apply_env_overrides(&mut config, lookup_from(&[("PORT", "http")]));
        assert!(result.unwrap_err().to_string().contains("Invalid PORT value"));
    }

    #[test]
    fn test_provider_names() {
        let provider: LlmProvider = serde_yaml::from_str("openai").unwrap();
        assert_eq!(provider, LlmProvider::OpenAi);
        let provider: LlmProvider = serde_yaml::from_str("gemini").unwrap();
        assert_eq!(provider, LlmProvider::Gemini);
    }
}
