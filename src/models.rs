use serde::{Deserialize, Serialize};

// ============ Upstream Request Bodies ============

/// Body of the `predict`, `predict_twitter` and `social_links` calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsernameRequest {
    #[serde(default)]
    pub username: String,
}

/// Body of the `google_search` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: String,
}

// ============ Upstream Responses ============

/// Response of a predict endpoint, generic over the platform's profile shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse<P> {
    /// Whether the model judges the account to be fake.
    pub is_fake: bool,
    /// Probability (0.0 - 1.0) that the account is fake.
    pub fake_probability: f64,
    /// Raw profile metadata used by the model.
    pub profile_info: P,
}

/// Instagram profile metadata as returned by `predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstagramProfileInfo {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub profile_pic_url: Option<String>,
    pub num_posts: u64,
    pub num_followers: u64,
    pub num_follows: u64,
    #[serde(default)]
    pub external_url: Option<String>,
    #[serde(default)]
    pub is_private: bool,
}

/// Twitter profile metadata as returned by `predict_twitter`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwitterProfileInfo {
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub screen_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub followers_count: u64,
    #[serde(default)]
    pub friends_count: u64,
    #[serde(default)]
    pub favorites_count: u64,
    #[serde(default)]
    pub statuses_count: u64,
    /// Creation timestamp, usually in the Twitter API format
    /// (`Wed Oct 10 20:19:24 +0000 2018`).
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub has_extended_profile: bool,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub tweet_content: Option<String>,
}

/// An account with the same username on another platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

/// Response of `social_links`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLinksResponse {
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
}

/// Response of `google_search`: candidate URLs, in upstream order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<String>,
}

/// Treats `None` and empty strings alike, the way the dashboard decides
/// whether a profile field is present.
pub fn is_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}
