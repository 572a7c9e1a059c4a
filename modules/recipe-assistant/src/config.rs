use anyhow::{bail, Result};
use std::env;
use tracing::info;

pub const DEFAULT_MODEL: &str = "mistral-large-latest";

/// Application configuration loaded from environment variables.
///
/// The two API keys may be missing here; the terminal prompts for them and
/// fills them in with [`Config::with_keys`] before [`Config::validate`].
#[derive(Debug, Clone)]
pub struct Config {
    // Credentials
    pub mistral_api_key: Option<String>,
    pub spoonacular_api_key: Option<String>,

    // Language model
    pub model: String,
    pub llm_base_url: Option<String>,

    // Recipe search
    pub spoonacular_base_url: Option<String>,

    /// Feed search results back to the model for a written summary.
    pub narrate_results: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mistral_api_key: None,
            spoonacular_api_key: None,
            model: DEFAULT_MODEL.to_string(),
            llm_base_url: None,
            spoonacular_base_url: None,
            narrate_results: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            mistral_api_key: non_empty_env("MISTRAL_API_KEY"),
            spoonacular_api_key: non_empty_env("SPOONACULAR_API_KEY"),
            model: non_empty_env("RECIPE_ASSISTANT_MODEL")
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            llm_base_url: non_empty_env("MISTRAL_BASE_URL"),
            spoonacular_base_url: non_empty_env("SPOONACULAR_BASE_URL"),
            narrate_results: env::var("RECIPE_ASSISTANT_NARRATE")
                .map(|v| !matches!(v.trim().to_lowercase().as_str(), "0" | "false" | "no"))
                .unwrap_or(true),
        }
    }

    pub fn with_keys(
        mut self,
        mistral_api_key: impl Into<String>,
        spoonacular_api_key: impl Into<String>,
    ) -> Self {
        self.mistral_api_key = Some(mistral_api_key.into());
        self.spoonacular_api_key = Some(spoonacular_api_key.into());
        self
    }

    pub fn has_keys(&self) -> bool {
        is_set(&self.mistral_api_key) && is_set(&self.spoonacular_api_key)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.has_keys() {
            bail!("Please enter your API keys (MISTRAL_API_KEY and SPOONACULAR_API_KEY) to continue.");
        }
        if self.model.trim().is_empty() {
            bail!("Model name must not be empty");
        }
        Ok(())
    }

    /// Log the effective configuration without secrets.
    pub fn log_redacted(&self) {
        info!(
            model = %self.model,
            mistral_api_key = if is_set(&self.mistral_api_key) { "set" } else { "missing" },
            spoonacular_api_key = if is_set(&self.spoonacular_api_key) { "set" } else { "missing" },
            llm_base_url = self.llm_base_url.as_deref().unwrap_or("default"),
            spoonacular_base_url = self.spoonacular_base_url.as_deref().unwrap_or("default"),
            narrate_results = self.narrate_results,
            "Configuration loaded"
        );
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(config.narrate_results);
        assert!(!config.has_keys());
    }

    #[test]
    fn test_validate_requires_both_keys() {
        let config = Config {
            mistral_api_key: Some("m".into()),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("API keys"));

        assert!(Config::default().with_keys("m", "s").validate().is_ok());
    }

    #[test]
    fn test_blank_key_is_missing() {
        let config = Config::default().with_keys("  ", "s");
        assert!(!config.has_keys());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_model_is_rejected() {
        let mut config = Config::default().with_keys("m", "s");
        config.model = " ".into();
        assert!(config.validate().is_err());
    }
}
