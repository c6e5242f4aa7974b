//! Typed data passed between views through navigation.
//!
//! Hand-offs arrive from the browser, so everything here is validated at the
//! receiving side before a view uses it.

use crate::errors::AppError;
use crate::models::{InstagramProfileInfo, TwitterProfileInfo};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::form_urlencoded;

/// Longest value accepted for a pre-filled username.
pub const MAX_PREFILL_LEN: usize = 2048;

/// Search result → Twitter form. Only pre-fills the username field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TwitterHandoff {
    #[serde(default)]
    pub username: Option<String>,
}

impl TwitterHandoff {
    pub fn for_result(url: &str) -> Self {
        Self {
            username: Some(url.to_string()),
        }
    }

    /// Path of the Twitter form with this value pre-filled.
    pub fn path(&self) -> String {
        match self.username.as_deref() {
            Some(username) => format!(
                "/twitter?username={}",
                form_urlencoded::byte_serialize(username.as_bytes()).collect::<String>()
            ),
            None => "/twitter".to_string(),
        }
    }

    /// The value to pre-fill, if any. Blank and oversized values are ignored.
    pub fn prefill(&self) -> Option<&str> {
        let value = self.username.as_deref()?.trim();
        if value.is_empty() {
            return None;
        }
        if value.chars().count() > MAX_PREFILL_LEN {
            tracing::warn!("Ignoring oversized Twitter hand-off ({} bytes)", value.len());
            return None;
        }
        Some(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Twitter,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Twitter => "twitter",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::Twitter => "Twitter",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "instagram" => Ok(Platform::Instagram),
            "twitter" => Ok(Platform::Twitter),
            other => Err(AppError::BadRequest(format!(
                "Unknown platform '{}'",
                other
            ))),
        }
    }
}

/// Wire form of a report hand-off: the platform plus the profile as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportForm {
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub profile: String,
}

/// Verification view → report view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "platform", content = "profile", rename_all = "lowercase")]
pub enum ReportHandoff {
    Instagram(InstagramProfileInfo),
    Twitter(TwitterProfileInfo),
}

impl ReportHandoff {
    pub fn platform(&self) -> Platform {
        match self {
            ReportHandoff::Instagram(_) => Platform::Instagram,
            ReportHandoff::Twitter(_) => Platform::Twitter,
        }
    }

    /// Username of the reported account.
    pub fn identity(&self) -> &str {
        match self {
            ReportHandoff::Instagram(profile) => &profile.username,
            ReportHandoff::Twitter(profile) => &profile.screen_name,
        }
    }

    pub fn to_form(&self) -> Result<ReportForm, AppError> {
        let profile = match self {
            ReportHandoff::Instagram(profile) => serde_json::to_string(profile),
            ReportHandoff::Twitter(profile) => serde_json::to_string(profile),
        }
        .map_err(|e| AppError::InternalError(format!("Failed to encode report hand-off: {}", e)))?;

        Ok(ReportForm {
            platform: self.platform().to_string(),
            profile,
        })
    }

    /// Parses and validates a hand-off received from the browser.
    pub fn from_form(form: &ReportForm) -> Result<Self, AppError> {
        let platform: Platform = form.platform.parse()?;

        let handoff = match platform {
            Platform::Instagram => serde_json::from_str(&form.profile).map(ReportHandoff::Instagram),
            Platform::Twitter => serde_json::from_str(&form.profile).map(ReportHandoff::Twitter),
        }
        .map_err(|e| AppError::BadRequest(format!("Malformed {} profile: {}", platform, e)))?;

        if handoff.identity().trim().is_empty() {
            return Err(AppError::BadRequest(format!(
                "{} profile is missing its username",
                platform.label()
            )));
        }

        Ok(handoff)
    }
}
