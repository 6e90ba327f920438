//! Provider router: selects the correct completion provider based on config.
//!
//! Handles provider creation and lookup by name.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use gamechat_core::error::ProviderError;
use gamechat_core::provider::Provider;
use crate::openai_compat::{DEFAULT_TIMEOUT, OpenAiCompatProvider};

/// Routes completion requests to the correct provider.
pub struct ProviderRouter {
    providers: HashMap<String, Arc<dyn Provider>>,
    default_provider: String,
}

impl ProviderRouter {
    /// Create a new router with a default provider.
    pub fn new(default_provider: impl Into<String>) -> Self {
        Self {
            providers: HashMap::new(),
            default_provider: default_provider.into(),
        }
    }

    /// Register a provider.
    pub fn register(&mut self, name: impl Into<String>, provider: Arc<dyn Provider>) {
        self.providers.insert(name.into(), provider);
    }

    /// Get the default provider.
    pub fn default(&self) -> Option<Arc<dyn Provider>> {
        self.providers.get(&self.default_provider).cloned()
    }

    /// Get a specific provider by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Provider>> {
        self.providers.get(name).cloned()
    }
}

/// Build providers from configuration.
///
/// Every `[providers.<name>]` section becomes an OpenAI-compatible
/// provider; the default provider is always registered, even when it has
/// no section of its own.
pub fn build_from_config(
    config: &gamechat_config::AppConfig,
) -> Result<ProviderRouter, ProviderError> {
    let mut router = ProviderRouter::new(&config.default_provider);

    for (name, provider_config) in &config.providers {
        let api_key = provider_config
            .api_key
            .clone()
            .or_else(|| config.api_key.clone())
            .unwrap_or_default();

        let base_url = provider_config
            .api_url
            .clone()
            .unwrap_or_else(|| default_base_url(name));

        let provider = OpenAiCompatProvider::with_timeout(
            name,
            &base_url,
            &api_key,
            Duration::from_secs(provider_config.request_timeout_secs),
        )?;

        router.register(name.clone(), Arc::new(provider));
    }

    // Ensure the default provider exists (even if not explicitly configured)
    if router.get(&config.default_provider).is_none() {
        let api_key = config.api_key.clone().unwrap_or_default();
        let base_url = default_base_url(&config.default_provider);

        let provider = OpenAiCompatProvider::with_timeout(
            &config.default_provider,
            &base_url,
            &api_key,
            DEFAULT_TIMEOUT,
        )?;

        router.register(config.default_provider.clone(), Arc::new(provider));
    }

    Ok(router)
}

/// Get the default base URL for well-known providers.
fn default_base_url(provider_name: &str) -> String {
    match provider_name {
        "openrouter" => "https://openrouter.ai/api/v1".into(),
        "openai" => "https://api.openai.com/v1".into(),
        "ollama" => "http://localhost:11434/v1".into(),
        "deepseek" => "https://api.deepseek.com/v1".into(),
        "groq" => "https://api.groq.com/openai/v1".into(),
        "together" => "https://api.together.xyz/v1".into(),
        "vllm" => "http://localhost:8000/v1".into(),
        "llamacpp" | "llama.cpp" => "http://localhost:8080/v1".into(),
        _ => format!("https://{provider_name}.api.example.com/v1"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn router_register_and_lookup() {
        let mut router = ProviderRouter::new("openai");
        let provider = Arc::new(OpenAiCompatProvider::openai("sk-test").unwrap());
        router.register("openai", provider);

        assert!(router.get("openai").is_some());
        assert!(router.get("nonexistent").is_none());
        assert!(router.default().is_some());
    }

    #[test]
    fn default_base_urls() {
        assert!(default_base_url("openrouter").contains("openrouter.ai"));
        assert!(default_base_url("openai").contains("api.openai.com"));
        assert!(default_base_url("ollama").contains("localhost:11434"));
    }

    #[test]
    fn build_from_default_config() {
        let config = gamechat_config::AppConfig::default();
        let router = build_from_config(&config).unwrap();
        assert!(router.default().is_some());
        assert_eq!(router.default().unwrap().name(), "openai");
    }

    #[test]
    fn configured_sections_are_registered() {
        let mut config = gamechat_config::AppConfig {
            default_provider: "ollama".into(),
            ..Default::default()
        };
        config.providers.insert(
            "ollama".into(),
            gamechat_config::ProviderConfig {
                api_url: Some("http://gpu-box:11434/v1".into()),
                request_timeout_secs: 300,
                ..Default::default()
            },
        );

        let router = build_from_config(&config).unwrap();
        assert!(router.get("ollama").is_some());
        assert!(router.get("openai").is_none());
        assert_eq!(router.default().unwrap().name(), "ollama");
    }
}
