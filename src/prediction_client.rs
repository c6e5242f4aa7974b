use crate::config::Config;
use crate::errors::AppError;
use crate::models::{
    InstagramProfileInfo, PredictResponse, QueryRequest, SearchResponse, SocialLink,
    SocialLinksResponse, TwitterProfileInfo, UsernameRequest,
};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use url::Url;

pub const PREDICT_ENDPOINT: &str = "predict";
pub const PREDICT_TWITTER_ENDPOINT: &str = "predict_twitter";
pub const SOCIAL_LINKS_ENDPOINT: &str = "social_links";
pub const SEARCH_ENDPOINT: &str = "google_search";

/// Client for the external prediction/search service.
///
/// Every call is a JSON POST. A non-2xx status, a transport error, a timeout
/// or a body that does not match the expected shape is an
/// `AppError::ExternalApiError`. Nothing is retried.
#[derive(Clone)]
pub struct PredictionClient {
    client: reqwest::Client,
    base_url: Url,
}

impl PredictionClient {
    /// Creates a new `PredictionClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base address of the service, e.g. `http://localhost:5000`.
    /// * `timeout` - Total timeout applied to each call.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                AppError::InternalError(format!("Failed to create prediction client: {}", e))
            })?;

        // Url::join replaces the last segment unless the base ends with '/'
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized).map_err(|e| {
            AppError::InternalError(format!("Invalid prediction API URL '{}': {}", base_url, e))
        })?;

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(&config.prediction_api_url, config.upstream_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Runs the Instagram fake-account model for `username`.
    pub async fn predict_instagram(
        &self,
        username: &str,
    ) -> Result<PredictResponse<InstagramProfileInfo>, AppError> {
        tracing::info!("Requesting Instagram prediction for {}", username);
        self.post_json(
            PREDICT_ENDPOINT,
            &UsernameRequest {
                username: username.to_string(),
            },
        )
        .await
    }

    /// Runs the Twitter fake-account model for `username`.
    pub async fn predict_twitter(
        &self,
        username: &str,
    ) -> Result<PredictResponse<TwitterProfileInfo>, AppError> {
        tracing::info!("Requesting Twitter prediction for {}", username);
        self.post_json(
            PREDICT_TWITTER_ENDPOINT,
            &UsernameRequest {
                username: username.to_string(),
            },
        )
        .await
    }

    /// Looks up accounts with the same username on other platforms.
    pub async fn social_links(&self, username: &str) -> Result<Vec<SocialLink>, AppError> {
        tracing::info!("Requesting social links for {}", username);
        let response: SocialLinksResponse = self
            .post_json(
                SOCIAL_LINKS_ENDPOINT,
                &UsernameRequest {
                    username: username.to_string(),
                },
            )
            .await?;

        tracing::debug!(
            "Found {} social link(s) for {}",
            response.social_links.len(),
            username
        );
        Ok(response.social_links)
    }

    /// Runs a free-text search and returns the candidate URLs.
    pub async fn search(&self, query: &str) -> Result<Vec<String>, AppError> {
        tracing::info!("Searching for '{}'", query);
        let response: SearchResponse = self
            .post_json(
                SEARCH_ENDPOINT,
                &QueryRequest {
                    query: query.to_string(),
                },
            )
            .await?;

        tracing::debug!("Search returned {} result(s)", response.results.len());
        Ok(response.results)
    }

    async fn post_json<B, R>(&self, endpoint: &str, body: &B) -> Result<R, AppError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.base_url.join(endpoint).map_err(|e| {
            AppError::InternalError(format!("Failed to build URL for {}: {}", endpoint, e))
        })?;

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("{} request failed: {}", endpoint, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("{} returned error {}: {}", endpoint, status, error_text);
            return Err(AppError::ExternalApiError(format!(
                "{} returned {}: {}",
                endpoint, status, error_text
            )));
        }

        let data = response.json().await.map_err(|e| {
            AppError::ExternalApiError(format!("Failed to parse {} response: {}", endpoint, e))
        })?;

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = PredictionClient::new("http://localhost:5000", Duration::from_secs(5));
        assert!(client.is_ok());
    }

    #[test]
    fn test_endpoints_join_onto_base_path() {
        let client =
            PredictionClient::new("https://ml.example.com/api/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            client.base_url().join(PREDICT_TWITTER_ENDPOINT).unwrap().as_str(),
            "https://ml.example.com/api/predict_twitter"
        );

        let client =
            PredictionClient::new("https://ml.example.com/api", Duration::from_secs(5)).unwrap();
        assert_eq!(
            client.base_url().join(SEARCH_ENDPOINT).unwrap().as_str(),
            "https://ml.example.com/api/google_search"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let client = PredictionClient::new("not a url", Duration::from_secs(5));
        assert!(matches!(client, Err(AppError::InternalError(_))));
    }
}
