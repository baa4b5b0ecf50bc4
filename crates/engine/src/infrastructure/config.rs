//! Application configuration

use std::fmt;

use anyhow::{Context, Result};

use super::anthropic::{DEFAULT_ANTHROPIC_BASE_URL, DEFAULT_ANTHROPIC_MODEL, DEFAULT_MAX_TOKENS};

const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
const DEFAULT_SERVER_PORT: u16 = 8080;
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:3001";
const DEFAULT_CORS_SUFFIXES: &str = ".gitpod.io,gitpod.dev";

/// Application configuration loaded from environment
#[derive(Clone)]
pub struct AppConfig {
    /// Hosted project URL (store and identity provider)
    pub supabase_url: String,
    /// Service role key; bypasses row-level security
    pub supabase_service_key: String,

    /// Anthropic API key. Empty means AI calls will be rejected upstream.
    pub anthropic_api_key: String,
    pub anthropic_base_url: String,
    pub anthropic_model: String,
    pub anthropic_max_tokens: u32,

    pub server_host: String,
    pub server_port: u16,

    /// Origins allowed verbatim
    pub cors_allowed_origins: Vec<String>,
    /// Host suffixes allowed for any scheme and port
    pub cors_allowed_origin_suffixes: Vec<String>,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let server_port = match var("PORT").or_else(|| var("SERVER_PORT")) {
            Some(port) => port
                .trim()
                .parse()
                .context("PORT must be a valid port number")?,
            None => DEFAULT_SERVER_PORT,
        };

        let anthropic_max_tokens = match var("ANTHROPIC_MAX_TOKENS") {
            Some(value) => value
                .trim()
                .parse()
                .context("ANTHROPIC_MAX_TOKENS must be a positive integer")?,
            None => DEFAULT_MAX_TOKENS,
        };

        Ok(Self {
            supabase_url: var("SUPABASE_URL")
                .context("SUPABASE_URL environment variable is required")?,
            supabase_service_key: var("SUPABASE_SERVICE_ROLE_KEY")
                .context("SUPABASE_SERVICE_ROLE_KEY environment variable is required")?,

            anthropic_api_key: var("ANTHROPIC_API_KEY").unwrap_or_default(),
            anthropic_base_url: var("ANTHROPIC_BASE_URL")
                .unwrap_or_else(|| DEFAULT_ANTHROPIC_BASE_URL.to_string()),
            anthropic_model: var("ANTHROPIC_MODEL")
                .unwrap_or_else(|| DEFAULT_ANTHROPIC_MODEL.to_string()),
            anthropic_max_tokens,

            server_host: var("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            server_port,

            cors_allowed_origins: split_list(
                &var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string()),
            ),
            cors_allowed_origin_suffixes: split_list(
                &var("CORS_ALLOWED_ORIGIN_SUFFIXES")
                    .unwrap_or_else(|| DEFAULT_CORS_SUFFIXES.to_string()),
            ),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

// Keys stay out of logs.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("supabase_url", &self.supabase_url)
            .field("supabase_service_key", &"<redacted>")
            .field(
                "anthropic_api_key",
                &if self.anthropic_api_key.is_empty() {
                    "<unset>"
                } else {
                    "<redacted>"
                },
            )
            .field("anthropic_base_url", &self.anthropic_base_url)
            .field("anthropic_model", &self.anthropic_model)
            .field("anthropic_max_tokens", &self.anthropic_max_tokens)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field(
                "cors_allowed_origin_suffixes",
                &self.cors_allowed_origin_suffixes,
            )
            .finish()
    }
}
