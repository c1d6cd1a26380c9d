use serde::Deserialize;

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Airstack API key sent in the Authorization header of every GraphQL
    /// request. Required — the service must not start without it.
    pub airstack_api_key: String,

    /// Airstack GraphQL endpoint URL
    pub airstack_api_url: String,

    /// Public root URL of the app, used in Frame metadata and cast-action
    /// redirect targets
    pub app_url: String,

    /// Port the HTTP server binds to (default: 3000)
    pub bind_port: u16,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            airstack_api_key: std::env::var("AIRSTACK_API_KEY").map_err(|_| {
                anyhow::anyhow!("AIRSTACK_API_KEY environment variable is required")
            })?,
            airstack_api_url: std::env::var("AIRSTACK_API_URL")
                .unwrap_or_else(|_| "https://api.airstack.xyz/gql".to_string()),
            app_url: std::env::var("APP_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            bind_port: std::env::var("BIND_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("BIND_PORT must be a valid u16"))?,
        })
    }
}
