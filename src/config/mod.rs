mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;

/// Loads `CONFIG_PATH` (default `config.yaml`) if present, then applies
/// environment overrides.
pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    let mut config = if Path::new(&config_path).exists() {
        debug!("Loading configuration from: {}", config_path);
        let config_str = tokio::fs::read_to_string(&config_path).await?;
        serde_yaml::from_str(&config_str)?
    } else {
        debug!("No configuration file at {}, using defaults", config_path);
        Config::default()
    };

    config.apply_env(|key| env::var(key).ok())?;
    Ok(config)
}

impl Config {
    /// Overrides fields from environment variables resolved through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| Error::config(format!("Invalid PORT value: '{}'", port)))?;
        }
        if let Some(origin) = lookup("FRONTEND_URL") {
            self.server.allowed_origin = origin;
        }
        if let Some(key) = lookup("GROQ_API_KEY").or_else(|| lookup("LLM_API_KEY")) {
            self.llm.api_key = key;
        }
        if let Some(base_url) = lookup("LLM_BASE_URL") {
            self.llm.base_url = base_url;
        }
        if let Some(model) = lookup("LLM_MODEL") {
            self.llm.model = model;
        }
        if let Some(command) = lookup("SCORER_COMMAND") {
            self.scorer.command = command;
        }
        if let Some(dir) = lookup("SCORER_WORKDIR") {
            self.scorer.working_dir = dir.into();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.allowed_origin, "*");
        assert_eq!(config.llm.model, "llama-3.3-70b-versatile");
        assert_eq!(config.scorer.exchange, ExchangeMode::Shared);
        assert_eq!(config.scorer.input_file, "user_data.json");
        assert_eq!(config.scorer.output_file, "predicted.json");
        assert!(config.scorer.timeout_secs.is_none());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = r#"
server:
  port: 8081
scorer:
  exchange: isolated
  timeout_secs: 30
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.scorer.exchange, ExchangeMode::Isolated);
        assert_eq!(config.scorer.timeout_secs, Some(30));
        assert_eq!(config.scorer.command, "python");
        assert_eq!(config.llm.system_prompt, DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env(lookup_from(&[
                ("PORT", "7000"),
                ("FRONTEND_URL", "https://heal.example"),
                ("GROQ_API_KEY", "gsk_test"),
                ("SCORER_WORKDIR", "/srv/model"),
            ]))
            .unwrap();

        assert_eq!(config.server.port, 7000);
        assert_eq!(config.server.allowed_origin, "https://heal.example");
        assert_eq!(config.llm.api_key, "gsk_test");
        assert_eq!(config.scorer.working_dir, std::path::PathBuf::from("/srv/model"));
    }

    #[test]
    fn test_groq_key_wins_over_generic_key() {
        let mut config = Config::default();
        config
            .apply_env(lookup_from(&[("GROQ_API_KEY", "groq"), ("LLM_API_KEY", "generic")]))
            .unwrap();
        assert_eq!(config.llm.api_key, "groq");
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let mut config = Config::default();
        let err = config
            .apply_env(lookup_from(&[("PORT", "not-a-port")]))
            .unwrap_err();
        assert!(err.to_string().contains("Invalid PORT value"));
    }
}
