use super::{
    banner_style, escape_html, external_link, or_na, page, social_links_panel, status_style,
    yes_no, FieldForm,
};
use crate::forms::ViewState;
use crate::handoff::ReportHandoff;
use crate::verification::{InstagramVerification, TwitterVerification, Verdict};
use chrono::{DateTime, Utc};
use std::fmt::Write;

const TWITTER_TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Renders a Twitter `created_at` value as `YYYY-MM-DD HH:MM UTC`, falling
/// back to the raw text when it is in neither the Twitter nor RFC 3339 format.
pub fn format_created_at(raw: &str) -> String {
    let parsed = DateTime::parse_from_str(raw, TWITTER_TIMESTAMP_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(raw));
    match parsed {
        Ok(ts) => ts
            .with_timezone(&Utc)
            .format("%Y-%m-%d %H:%M UTC")
            .to_string(),
        Err(_) => raw.to_string(),
    }
}

fn verdict_banner(verdict: &Verdict) -> String {
    let style = banner_style(verdict.kind);
    format!(
        r#"<div class="banner {class}">
    <span class="icon">{icon}</span>
    <div>
        <h3>{title}</h3>
        <p class="muted">{message}</p>
        <p class="muted">Probability: {score}%</p>
    </div>
</div>
"#,
        class = style.class,
        icon = style.icon,
        title = style.title,
        message = escape_html(&verdict.message),
        score = verdict.risk_score,
    )
}

fn report_button(handoff: &ReportHandoff) -> String {
    match handoff.to_form() {
        Ok(form) => format!(
            r#"<form method="post" action="/report">
    <input type="hidden" name="platform" value="{}">
    <input type="hidden" name="profile" value="{}">
    <button type="submit" class="danger">Report Account</button>
</form>
"#,
            escape_html(&form.platform),
            escape_html(&form.profile)
        ),
        Err(e) => {
            tracing::error!("Omitting report button: {}", e);
            String::new()
        }
    }
}

fn info_row(html: &mut String, label: &str, value: &str) {
    let _ = writeln!(html, "<div><b>{}:</b> {}</div>", label, value);
}

pub fn instagram_page(input: &str, state: &ViewState<InstagramVerification>) -> String {
    let form = FieldForm {
        action: "/instagram",
        name: "username",
        label: "Instagram Username",
        placeholder: "Enter username",
        value: input,
        idle_text: "Verify",
        busy_text: "Verifying...",
    };

    let mut body = String::from("<h2>Account Verification</h2>\n");
    body.push_str(&form.render(state.phase, state.error.as_ref()));

    if let Some(result) = &state.result {
        body.push_str(&verdict_banner(&result.verdict));

        let profile = &result.profile_info;
        let mut info = String::new();
        info_row(&mut info, "username", &escape_html(&profile.username));
        info_row(&mut info, "full_name", &or_na(&profile.full_name));
        info_row(&mut info, "biography", &or_na(&profile.biography));
        let picture = match profile.profile_pic_url.as_deref() {
            Some(url) if !url.is_empty() => {
                external_link(url, "Click to view profile picture")
            }
            _ => "N/A".to_string(),
        };
        info_row(&mut info, "profile_picture_url", &picture);

        let mut table = String::from(
            "<table>\n<thead><tr><th>Criterion</th><th>Value</th><th>Status</th></tr></thead>\n<tbody>\n",
        );
        for detail in &result.details {
            let style = status_style(detail.status);
            let _ = writeln!(
                table,
                r#"<tr><td>{}</td><td>{}</td><td class="{}">{} {}</td></tr>"#,
                escape_html(&detail.criterion),
                escape_html(&detail.description),
                style.class,
                style.icon,
                style.label
            );
        }
        table.push_str("</tbody>\n</table>\n");

        let _ = write!(
            body,
            r#"<div class="panels">
<div>
<h3>Account Information</h3>
<div class="info">{info}</div>
</div>
<div>
<h3>Verification Details</h3>
{table}</div>
</div>
"#
        );

        body.push_str(&social_links_panel(&result.social_links));
        body.push_str(&report_button(&ReportHandoff::Instagram(profile.clone())));
    }

    page("Instagram Account Verification", &body)
}

pub fn twitter_page(input: &str, state: &ViewState<TwitterVerification>) -> String {
    let form = FieldForm {
        action: "/twitter",
        name: "username",
        label: "Twitter Username",
        placeholder: "Enter username",
        value: input,
        idle_text: "Verify",
        busy_text: "Verifying...",
    };

    let mut body = String::from("<h2>Twitter Account Verification</h2>\n");
    body.push_str(&form.render(state.phase, state.error.as_ref()));

    if let Some(result) = &state.result {
        body.push_str(&verdict_banner(&result.verdict));

        let profile = &result.profile_info;
        let mut info = String::new();
        info_row(&mut info, "Screen Name", &escape_html(&profile.screen_name));
        info_row(&mut info, "Full Name", &or_na(&profile.name));
        info_row(&mut info, "Location", &or_na(&profile.location));
        info_row(&mut info, "Description", &or_na(&profile.description));
        let url = profile.url.as_deref().unwrap_or_default();
        info_row(&mut info, "URL", &external_link(url, url));
        info_row(&mut info, "Followers Count", &profile.followers_count.to_string());
        info_row(&mut info, "Friends Count", &profile.friends_count.to_string());
        info_row(&mut info, "Likes Count", &profile.favorites_count.to_string());
        info_row(&mut info, "Tweets Count", &profile.statuses_count.to_string());
        info_row(
            &mut info,
            "Verified",
            &format!(
                r#"<span class="{}">{}</span>"#,
                if profile.verified { "yes" } else { "no" },
                yes_no(profile.verified)
            ),
        );
        info_row(
            &mut info,
            "Created At",
            &match profile.created_at.as_deref() {
                Some(raw) if !raw.is_empty() => escape_html(&format_created_at(raw)),
                _ => "N/A".to_string(),
            },
        );
        info_row(
            &mut info,
            "Has Extended Profile",
            yes_no(profile.has_extended_profile),
        );
        info_row(&mut info, "Language", &or_na(&profile.lang));
        info_row(&mut info, "Status", &or_na(&profile.status));
        info_row(&mut info, "Tweet Content", &or_na(&profile.tweet_content));

        let _ = write!(
            body,
            "<h3>Account Information</h3>\n<div class=\"info\">{info}</div>\n"
        );

        body.push_str(&social_links_panel(&result.social_links));
        body.push_str(&report_button(&ReportHandoff::Twitter(profile.clone())));
    }

    page("Twitter Account Verification", &body)
}
