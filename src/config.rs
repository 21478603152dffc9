//! Startup configuration for the Firebox assistant.
//!
//! The API credential is injected from the environment (or an explicit
//! value) and validated once at construction. Configuration is immutable
//! afterwards: the interaction loop reuses one client built from it for
//! every cycle.

use crate::error::FireboxError;

/// Environment variable holding the Gemini API credential
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Model identifier used when none is configured
pub const DEFAULT_MODEL: &str = "gemini-pro";

/// Output token limit used when none is configured
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2048;

/// Validated configuration for the Firebox model client.
#[derive(Debug, Clone)]
pub struct FireboxConfig {
    /// API key for the generation endpoint
    pub api_key: String,
    /// Model identifier (e.g. "gemini-pro")
    pub model: String,
    /// Maximum number of tokens to generate per response
    pub max_output_tokens: u32,
}

impl FireboxConfig {
    /// Creates a configuration from an explicit API key, applying the
    /// default model and token limit.
    ///
    /// # Returns
    ///
    /// * `Ok(FireboxConfig)` if the key passes validation
    /// * `Err(FireboxError::ConfigError)` if the key is blank or malformed
    pub fn new(api_key: impl Into<String>) -> Result<Self, FireboxError> {
        let api_key = api_key.into();
        validate_api_key(&api_key)?;
        Ok(Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        })
    }

    /// Creates a configuration from the `GEMINI_API_KEY` environment
    /// variable.
    ///
    /// # Returns
    ///
    /// * `Ok(FireboxConfig)` if the variable is set and valid
    /// * `Err(FireboxError::ConfigError)` if it is absent or invalid
    pub fn from_env() -> Result<Self, FireboxError> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) => Self::new(key),
            Err(_) => Err(FireboxError::ConfigError(format!(
                "{} is not set. Please configure the API key before starting.",
                API_KEY_ENV
            ))),
        }
    }

    /// Sets the model identifier.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the maximum number of output tokens per response.
    pub fn max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }
}

fn validate_api_key(key: &str) -> Result<(), FireboxError> {
    if key.trim().is_empty() {
        return Err(FireboxError::ConfigError(
            "API key is empty. Please configure the API key before starting.".to_string(),
        ));
    }
    if key.chars().any(char::is_whitespace) {
        return Err(FireboxError::ConfigError(
            "API key contains whitespace. Please check the configured value.".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_applied() {
        let config = FireboxConfig::new("test-key").unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.max_output_tokens, DEFAULT_MAX_OUTPUT_TOKENS);
    }

    #[test]
    fn blank_key_rejected() {
        assert!(matches!(
            FireboxConfig::new(""),
            Err(FireboxError::ConfigError(_))
        ));
        assert!(matches!(
            FireboxConfig::new("   "),
            Err(FireboxError::ConfigError(_))
        ));
    }

    #[test]
    fn key_with_whitespace_rejected() {
        assert!(matches!(
            FireboxConfig::new("abc def"),
            Err(FireboxError::ConfigError(_))
        ));
    }

    #[test]
    fn builder_setters_override_defaults() {
        let config = FireboxConfig::new("test-key")
            .unwrap()
            .model("gemini-1.5-flash")
            .max_output_tokens(512);
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.max_output_tokens, 512);
    }
}
