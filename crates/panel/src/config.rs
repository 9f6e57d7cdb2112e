//! Environment configuration.

/// Runtime configuration read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL; absent means in-memory demo mode.
    pub api_url: Option<String>,
    /// Base URL for resolving relative media paths (product images).
    pub media_url: String,
    /// Frontend base URL for shareable links (quotations).
    pub frontend_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        let api_url = std::env::var("MILLADMIN_API_URL").ok().filter(|v| !v.is_empty());
        if api_url.is_none() {
            tracing::warn!("MILLADMIN_API_URL not set; running against the in-memory gateway");
        }

        Self {
            api_url,
            media_url: env_or("MILLADMIN_MEDIA_URL", "http://localhost:8080/media"),
            frontend_url: env_or("MILLADMIN_FRONTEND_URL", "http://localhost:3000"),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
