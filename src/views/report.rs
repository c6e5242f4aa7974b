use super::{escape_html, external_link, or_na, page};
use crate::handoff::ReportHandoff;
use std::fmt::Write;

/// Confirms the account received through a report hand-off. Submitting the
/// report is handled outside the dashboard.
pub fn report_page(handoff: &ReportHandoff) -> String {
    let platform = handoff.platform();
    let mut body = format!(
        "<h2>Report Account</h2>\n<p class=\"muted\">{} account <b>@{}</b></p>\n<div class=\"info\">",
        platform.label(),
        escape_html(handoff.identity())
    );

    match handoff {
        ReportHandoff::Instagram(profile) => {
            let _ = write!(
                body,
                "<div><b>Full Name:</b> {}</div>\n<div><b>Biography:</b> {}</div>\n<div><b>Posts:</b> {}</div>\n<div><b>Followers:</b> {}</div>\n<div><b>Following:</b> {}</div>\n<div><b>External URL:</b> {}</div>",
                or_na(&profile.full_name),
                or_na(&profile.biography),
                profile.num_posts,
                profile.num_followers,
                profile.num_follows,
                match profile.external_url.as_deref() {
                    Some(url) if !url.is_empty() => external_link(url, url),
                    _ => "N/A".to_string(),
                }
            );
        }
        ReportHandoff::Twitter(profile) => {
            let _ = write!(
                body,
                "<div><b>Full Name:</b> {}</div>\n<div><b>Description:</b> {}</div>\n<div><b>Followers:</b> {}</div>\n<div><b>Tweets:</b> {}</div>\n<div><b>Verified:</b> {}</div>",
                or_na(&profile.name),
                or_na(&profile.description),
                profile.followers_count,
                profile.statuses_count,
                if profile.verified { "Yes" } else { "No" }
            );
        }
    }

    let _ = write!(
        body,
        "</div>\n<p><a href=\"/{}\">Back to {} verification</a></p>\n",
        platform.as_str(),
        platform.label()
    );
    page("Report Account", &body)
}

pub fn report_error_page(message: &str) -> String {
    page(
        "Report Account",
        &format!(
            "<h2>Report Account</h2>\n<p class=\"error\">{}</p>\n<p><a href=\"/\">Back to the dashboard</a></p>\n",
            escape_html(message)
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TwitterProfileInfo;

    #[test]
    fn test_report_page_shows_identity() {
        let handoff = ReportHandoff::Twitter(TwitterProfileInfo {
            verified: false,
            screen_name: "<jack>".to_string(),
            name: Some("Jack".to_string()),
            location: None,
            description: None,
            url: None,
            followers_count: 5,
            friends_count: 0,
            favorites_count: 0,
            statuses_count: 9,
            created_at: None,
            has_extended_profile: false,
            lang: None,
            status: None,
            tweet_content: None,
        });

        let html = report_page(&handoff);
        assert!(html.contains("Twitter account <b>@&lt;jack&gt;</b>"));
        assert!(html.contains("<div><b>Tweets:</b> 9</div>"));
        assert!(html.contains(r#"href="/twitter""#));
    }

    #[test]
    fn test_report_error_page_escapes_message() {
        let html = report_error_page("Bad request: <oops>");
        assert!(html.contains("Bad request: &lt;oops&gt;"));
    }
}
