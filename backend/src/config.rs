//! Environment-driven service configuration, read once at startup.

use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// OpenAI-compatible chat-completions endpoint.
    pub model_base_url: String,
    pub model_api_key: String,
    pub model_name: String,
    /// Root directory for locally stored assets.
    pub storage_root: String,
    /// Public prefix prepended to locally stored asset paths.
    pub cdn_base_url: String,
    /// Root directory rendered sites are written under.
    pub sites_root: String,
    pub preview_base_url: String,
    /// Artificial delay standing in for CDN propagation on deploy.
    pub deploy_delay: Duration,
    /// Pacing delay between competitor page fetches.
    pub competitor_delay: Duration,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

impl Config {
    pub fn from_env() -> Config {
        let deploy_ms = env_or("DEPLOY_DELAY_MS", "2000").parse().unwrap_or(2000);
        let pacing_ms = env_or("COMPETITOR_DELAY_MS", "2000").parse().unwrap_or(2000);
        Config {
            host: env_or("HOST", "127.0.0.1"),
            port: env_or("PORT", "8000").parse().unwrap_or(8000),
            model_base_url: env_or(
                "OPENAI_BASE_URL",
                "https://api.openai.com/v1/chat/completions",
            ),
            model_api_key: env_or("OPENAI_API_KEY", ""),
            model_name: env_or("OPENAI_MODEL", "gpt-4"),
            storage_root: env_or("ASSET_STORAGE_ROOT", "/tmp/assets"),
            cdn_base_url: env_or("CDN_BASE_URL", "https://cdn.klmpegasus.com"),
            sites_root: env_or("SITES_OUTPUT_ROOT", "/tmp/sites"),
            preview_base_url: env_or("PREVIEW_BASE_URL", "https://preview.klmpegasus.com"),
            deploy_delay: Duration::from_millis(deploy_ms),
            competitor_delay: Duration::from_millis(pacing_ms),
        }
    }

    /// Configuration with zero delays, for use in tests only.
    #[cfg(test)]
    pub fn for_tests() -> Config {
        Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            model_base_url: "http://127.0.0.1:0/v1/chat/completions".to_string(),
            model_api_key: "test-key".to_string(),
            model_name: "test-model".to_string(),
            storage_root: std::env::temp_dir().join("assets-tests").display().to_string(),
            cdn_base_url: "https://cdn.test".to_string(),
            sites_root: std::env::temp_dir().join("sites-tests").display().to_string(),
            preview_base_url: "https://preview.test".to_string(),
            deploy_delay: Duration::ZERO,
            competitor_delay: Duration::ZERO,
        }
    }
}
