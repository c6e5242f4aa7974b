use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_PREDICTION_API_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Base address of the prediction/search service.
    pub prediction_api_url: String,
    /// Total timeout applied to every upstream call, in seconds.
    pub upstream_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            prediction_api_url: validate_base_url(
                std::env::var("PREDICTION_API_URL")
                    .unwrap_or_else(|_| DEFAULT_PREDICTION_API_URL.to_string()),
            )?,
            upstream_timeout_secs: std::env::var("UPSTREAM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse::<u64>()
                .map_err(|_| anyhow::anyhow!("UPSTREAM_TIMEOUT_SECS must be a whole number"))
                .and_then(|secs| {
                    if secs == 0 {
                        anyhow::bail!("UPSTREAM_TIMEOUT_SECS must be at least 1");
                    }
                    Ok(secs)
                })?,
        };

        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Prediction API URL: {}", config.prediction_api_url);
        tracing::debug!("Upstream timeout: {}s", config.upstream_timeout_secs);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}

fn validate_base_url(url: String) -> anyhow::Result<String> {
    let url = url.trim().to_string();
    if url.is_empty() {
        anyhow::bail!("PREDICTION_API_URL cannot be empty");
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        anyhow::bail!("PREDICTION_API_URL must start with http:// or https://");
    }
    url::Url::parse(&url)
        .map_err(|e| anyhow::anyhow!("PREDICTION_API_URL is not a valid URL: {}", e))?;
    Ok(url)
}
