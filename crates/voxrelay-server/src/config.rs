//! Server configuration read from Shuttle secrets

use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};

pub const DEFAULT_REALTIME_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_REALTIME_MODEL: &str = "gpt-4o-realtime-preview-2024-12-17";
pub const DEFAULT_REALTIME_VOICE: &str = "verse";
pub const DEFAULT_CHAT_MODEL: &str = "gemini-2.0-flash";

/// Vendor realtime endpoint settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealtimeSettings {
    pub base_url: String,
    pub model: String,
    pub voice: String,
}

impl Default for RealtimeSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_REALTIME_BASE_URL.to_string(),
            model: DEFAULT_REALTIME_MODEL.to_string(),
            voice: DEFAULT_REALTIME_VOICE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    pub openai_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub realtime: RealtimeSettings,
    pub chat_model: Option<String>,
    pub cors_origins: Vec<String>,
    pub api_key: Option<String>,
}

impl ServerConfig {
    /// Build from any key lookup (the Shuttle `SecretStore` in production).
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = RealtimeSettings::default();

        Self {
            openai_api_key: get("OPENAI_API_KEY"),
            gemini_api_key: get("GEMINI_API_KEY"),
            realtime: RealtimeSettings {
                base_url: get("REALTIME_BASE_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or(defaults.base_url),
                model: get("REALTIME_MODEL").unwrap_or(defaults.model),
                voice: get("REALTIME_VOICE").unwrap_or(defaults.voice),
            },
            chat_model: get("CHAT_MODEL"),
            cors_origins: parse_origins(get("CORS_ORIGINS").as_deref().unwrap_or("*")),
            api_key: get("VOXRELAY_API_KEY"),
        }
    }

    /// Permissive when `*` is listed, otherwise only the configured origins.
    pub fn cors_layer(&self) -> CorsLayer {
        if self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*") {
            return CorsLayer::permissive();
        }

        let origins: Vec<HeaderValue> = self
            .cors_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("⚠️  Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
