//! Client-side verification view models.
//!
//! The prediction service decides whether an account is fake. This module
//! only turns its answer into the verdict banner and, for Instagram, the
//! fixed criteria table.

use crate::models::{
    is_present, InstagramProfileInfo, PredictResponse, SocialLink, TwitterProfileInfo,
};
use serde::{Deserialize, Serialize};

pub const REAL_MESSAGE: &str = "This account appears to be real.";
pub const FAKE_MESSAGE: &str = "This account shows signs of being fake.";

/// Minimum post count (exclusive) for the "Number of Posts" check.
pub const MIN_POSTS: u64 = 10;
/// Minimum follower count (exclusive) for the "Followers" check.
pub const MIN_FOLLOWERS: u64 = 50;
/// Minimum following count (exclusive) for the "Following" check.
pub const MIN_FOLLOWING: u64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Fail,
    Warning,
}

impl CheckStatus {
    fn pass_if(condition: bool) -> Self {
        if condition {
            CheckStatus::Pass
        } else {
            CheckStatus::Fail
        }
    }
}

/// One row of the criteria table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionCheck {
    pub criterion: String,
    pub description: String,
    pub status: CheckStatus,
}

impl CriterionCheck {
    fn new(criterion: &str, description: impl Into<String>, status: CheckStatus) -> Self {
        Self {
            criterion: criterion.to_string(),
            description: description.into(),
            status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictKind {
    Genuine,
    FakeSuspected,
    /// The platform itself marks the account as verified.
    PlatformVerified,
}

/// Contents of the verdict banner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub kind: VerdictKind,
    pub is_real: bool,
    /// Fake probability as a whole percentage, 0-100.
    pub risk_score: u8,
    pub message: String,
}

impl Verdict {
    pub fn from_prediction(is_fake: bool, fake_probability: f64) -> Self {
        Self {
            kind: if is_fake {
                VerdictKind::FakeSuspected
            } else {
                VerdictKind::Genuine
            },
            is_real: !is_fake,
            risk_score: risk_score(fake_probability),
            message: if is_fake { FAKE_MESSAGE } else { REAL_MESSAGE }.to_string(),
        }
    }

    /// Platform verification overrides the model's judgment in the banner.
    /// The message and probability still reflect the model.
    pub fn with_platform_verified(mut self, verified: bool) -> Self {
        if verified {
            self.kind = VerdictKind::PlatformVerified;
        }
        self
    }
}

/// Converts a 0.0-1.0 probability into a rounded, clamped percentage.
pub fn risk_score(fake_probability: f64) -> u8 {
    if !fake_probability.is_finite() {
        return 0;
    }
    (fake_probability * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Derives the six Instagram criteria rows, in display order.
pub fn instagram_criteria(profile: &InstagramProfileInfo) -> Vec<CriterionCheck> {
    let has_picture = is_present(&profile.profile_pic_url);
    let has_external_url = is_present(&profile.external_url);

    vec![
        CriterionCheck::new(
            "Profile Picture",
            present_or_absent(has_picture),
            CheckStatus::pass_if(has_picture),
        ),
        CriterionCheck::new(
            "Number of Posts",
            profile.num_posts.to_string(),
            CheckStatus::pass_if(profile.num_posts > MIN_POSTS),
        ),
        CriterionCheck::new(
            "Followers",
            profile.num_followers.to_string(),
            CheckStatus::pass_if(profile.num_followers > MIN_FOLLOWERS),
        ),
        CriterionCheck::new(
            "Following",
            profile.num_follows.to_string(),
            CheckStatus::pass_if(profile.num_follows > MIN_FOLLOWING),
        ),
        CriterionCheck::new(
            "External URL",
            present_or_absent(has_external_url),
            CheckStatus::pass_if(has_external_url),
        ),
        CriterionCheck::new(
            "Private Account",
            if profile.is_private { "Yes" } else { "No" },
            if profile.is_private {
                CheckStatus::Warning
            } else {
                CheckStatus::Pass
            },
        ),
    ]
}

fn present_or_absent(present: bool) -> &'static str {
    if present {
        "Present"
    } else {
        "Absent"
    }
}

/// Progress of the second, independent social-links call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "links", rename_all = "snake_case")]
pub enum SocialLinks {
    Loading,
    Loaded(Vec<SocialLink>),
    Failed,
}

impl SocialLinks {
    /// Links to display. Loading and failed lookups show none.
    pub fn links(&self) -> &[SocialLink] {
        match self {
            SocialLinks::Loaded(links) => links,
            SocialLinks::Loading | SocialLinks::Failed => &[],
        }
    }
}

/// A verification result that receives social links after its verdict.
pub trait LinkedProfile {
    fn social_links_mut(&mut self) -> &mut SocialLinks;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstagramVerification {
    pub verdict: Verdict,
    pub details: Vec<CriterionCheck>,
    pub profile_info: InstagramProfileInfo,
    pub social_links: SocialLinks,
}

impl InstagramVerification {
    pub fn from_prediction(prediction: PredictResponse<InstagramProfileInfo>) -> Self {
        Self {
            verdict: Verdict::from_prediction(prediction.is_fake, prediction.fake_probability),
            details: instagram_criteria(&prediction.profile_info),
            profile_info: prediction.profile_info,
            social_links: SocialLinks::Loading,
        }
    }
}

impl LinkedProfile for InstagramVerification {
    fn social_links_mut(&mut self) -> &mut SocialLinks {
        &mut self.social_links
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwitterVerification {
    pub verdict: Verdict,
    pub profile_info: TwitterProfileInfo,
    pub social_links: SocialLinks,
}

impl TwitterVerification {
    pub fn from_prediction(prediction: PredictResponse<TwitterProfileInfo>) -> Self {
        Self {
            verdict: Verdict::from_prediction(prediction.is_fake, prediction.fake_probability)
                .with_platform_verified(prediction.profile_info.verified),
            profile_info: prediction.profile_info,
            social_links: SocialLinks::Loading,
        }
    }
}

impl LinkedProfile for TwitterVerification {
    fn social_links_mut(&mut self) -> &mut SocialLinks {
        &mut self.social_links
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instagram_profile() -> InstagramProfileInfo {
        InstagramProfileInfo {
            username: "someone".to_string(),
            full_name: Some("Some One".to_string()),
            biography: None,
            profile_pic_url: Some("x".to_string()),
            num_posts: 15,
            num_followers: 100,
            num_follows: 10,
            external_url: None,
            is_private: true,
        }
    }

    fn statuses(checks: &[CriterionCheck]) -> Vec<(&str, CheckStatus)> {
        checks
            .iter()
            .map(|c| (c.criterion.as_str(), c.status))
            .collect()
    }

    #[test]
    fn test_instagram_criteria_mixed_profile() {
        let checks = instagram_criteria(&instagram_profile());
        assert_eq!(
            statuses(&checks),
            vec![
                ("Profile Picture", CheckStatus::Pass),
                ("Number of Posts", CheckStatus::Pass),
                ("Followers", CheckStatus::Pass),
                ("Following", CheckStatus::Fail),
                ("External URL", CheckStatus::Fail),
                ("Private Account", CheckStatus::Warning),
            ]
        );
        assert_eq!(checks[0].description, "Present");
        assert_eq!(checks[1].description, "15");
        assert_eq!(checks[4].description, "Absent");
        assert_eq!(checks[5].description, "Yes");
    }

    #[test]
    fn test_instagram_thresholds_are_exclusive() {
        let mut profile = instagram_profile();
        profile.num_posts = MIN_POSTS;
        profile.num_followers = MIN_FOLLOWERS;
        profile.num_follows = MIN_FOLLOWING + 1;
        profile.is_private = false;
        profile.profile_pic_url = Some(String::new());
        profile.external_url = Some("https://example.com".to_string());

        let checks = instagram_criteria(&profile);
        assert_eq!(
            statuses(&checks),
            vec![
                ("Profile Picture", CheckStatus::Fail),
                ("Number of Posts", CheckStatus::Fail),
                ("Followers", CheckStatus::Fail),
                ("Following", CheckStatus::Pass),
                ("External URL", CheckStatus::Pass),
                ("Private Account", CheckStatus::Pass),
            ]
        );
        assert_eq!(checks[5].description, "No");
    }

    #[test]
    fn test_risk_score_rounding() {
        assert_eq!(risk_score(0.12), 12);
        assert_eq!(risk_score(0.125), 13);
        assert_eq!(risk_score(0.0), 0);
        assert_eq!(risk_score(1.0), 100);
        assert_eq!(risk_score(1.7), 100);
        assert_eq!(risk_score(-0.2), 0);
        assert_eq!(risk_score(f64::NAN), 0);
    }

    #[test]
    fn test_verdict_real_and_fake() {
        let real = Verdict::from_prediction(false, 0.12);
        assert_eq!(real.kind, VerdictKind::Genuine);
        assert!(real.is_real);
        assert_eq!(real.risk_score, 12);
        assert_eq!(real.message, REAL_MESSAGE);

        let fake = Verdict::from_prediction(true, 0.91);
        assert_eq!(fake.kind, VerdictKind::FakeSuspected);
        assert!(!fake.is_real);
        assert_eq!(fake.message, FAKE_MESSAGE);
    }

    #[test]
    fn test_platform_verified_overrides_fake_flag() {
        let prediction = PredictResponse {
            is_fake: true,
            fake_probability: 0.8,
            profile_info: TwitterProfileInfo {
                verified: true,
                screen_name: "jack".to_string(),
                name: None,
                location: None,
                description: None,
                url: None,
                followers_count: 0,
                friends_count: 0,
                favorites_count: 0,
                statuses_count: 0,
                created_at: None,
                has_extended_profile: false,
                lang: None,
                status: None,
                tweet_content: None,
            },
        };

        let verification = TwitterVerification::from_prediction(prediction);
        assert_eq!(verification.verdict.kind, VerdictKind::PlatformVerified);
        assert_eq!(verification.verdict.risk_score, 80);
        assert_eq!(verification.social_links, SocialLinks::Loading);
    }

    #[test]
    fn test_social_links_hidden_unless_loaded() {
        let link = SocialLink {
            platform: "GitHub".to_string(),
            url: "https://github.com/someone".to_string(),
        };
        assert!(SocialLinks::Loading.links().is_empty());
        assert!(SocialLinks::Failed.links().is_empty());
        assert_eq!(SocialLinks::Loaded(vec![link.clone()]).links(), &[link]);
    }
}
