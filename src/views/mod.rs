//! Server-rendered HTML for the dashboard.
//!
//! Pages are plain strings. Everything that comes from the user or the
//! prediction service goes through [`escape_html`], and upstream URLs only
//! become links through [`safe_href`].

mod report;
mod search;
mod verification;

pub use report::{report_error_page, report_page};
pub use search::search_page;
pub use verification::{format_created_at, instagram_page, twitter_page};

use crate::forms::{FormError, Phase};
use crate::verification::{CheckStatus, SocialLinks, VerdictKind};
use std::fmt::Write;
use url::Url;

const STYLESHEET: &str = r#"
body { font-family: system-ui, sans-serif; background: #f3f4f6; margin: 0; color: #111827; }
nav { background: #4f46e5; padding: 0.75rem 1.5rem; }
nav a { color: #fff; margin-right: 1.25rem; text-decoration: none; font-weight: 600; }
main { max-width: 72rem; margin: 1.5rem auto; background: #fff; border-radius: 0.75rem; padding: 1.5rem; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
h2 { margin-top: 0; }
label { display: block; font-size: 0.875rem; color: #374151; margin-bottom: 0.25rem; }
input[type=text] { width: 100%; padding: 0.5rem; border: 1px solid #d1d5db; border-radius: 0.25rem; box-sizing: border-box; }
button, a.button { background: #4f46e5; color: #fff; border: 0; border-radius: 0.25rem; padding: 0.5rem 1rem; cursor: pointer; text-decoration: none; display: inline-block; }
button:disabled { opacity: 0.5; }
button.danger, a.button.danger { background: #ef4444; }
.field-row { display: grid; grid-template-columns: 1fr auto; gap: 1rem; align-items: end; }
.error { color: #ef4444; font-size: 0.875rem; margin-top: 0.25rem; }
.muted { color: #4b5563; font-size: 0.875rem; }
.banner { padding: 1rem; border-radius: 0.5rem; display: flex; gap: 0.75rem; align-items: center; margin-top: 1.5rem; }
.banner h3 { margin: 0; }
.banner-genuine { background: #f0fdf4; color: #15803d; }
.banner-fake { background: #fef2f2; color: #b91c1c; }
.banner-verified { background: #eff6ff; color: #1d4ed8; }
.icon { font-size: 1.5rem; }
.panels { display: grid; grid-template-columns: 1fr 1fr; gap: 1.5rem; margin-top: 1rem; }
.info { background: #f3f4f6; font-family: monospace; font-size: 0.875rem; padding: 1.5rem; border-radius: 0.25rem; white-space: pre-wrap; word-break: break-word; }
.info b { color: #374151; }
table { width: 100%; border-collapse: collapse; }
th, td { border: 1px solid #e5e7eb; padding: 0.5rem 1rem; text-align: left; font-size: 0.875rem; }
th { background: #f9fafb; }
.status-pass { color: #16a34a; }
.status-fail { color: #dc2626; }
.status-warning { color: #ca8a04; }
.links { display: flex; flex-wrap: wrap; gap: 1rem; }
.links a { background: #dcfce7; color: #1d4ed8; padding: 0.5rem 1rem; border-radius: 0.5rem; text-decoration: none; }
.yes { color: green; font-weight: bold; text-decoration: underline; }
.no { color: red; font-weight: bold; text-decoration: underline; }
"#;

/// How a criterion status is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStyle {
    pub icon: &'static str,
    pub class: &'static str,
    pub label: &'static str,
}

pub fn status_style(status: CheckStatus) -> StatusStyle {
    match status {
        CheckStatus::Pass => StatusStyle {
            icon: "\u{2714}",
            class: "status-pass",
            label: "pass",
        },
        CheckStatus::Fail => StatusStyle {
            icon: "\u{2716}",
            class: "status-fail",
            label: "fail",
        },
        CheckStatus::Warning => StatusStyle {
            icon: "\u{26A0}",
            class: "status-warning",
            label: "warning",
        },
    }
}

/// How the verdict banner is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerStyle {
    pub icon: &'static str,
    pub class: &'static str,
    pub title: &'static str,
}

pub fn banner_style(kind: VerdictKind) -> BannerStyle {
    match kind {
        VerdictKind::Genuine => BannerStyle {
            icon: "\u{2714}",
            class: "banner-genuine",
            title: "Genuine Account",
        },
        VerdictKind::FakeSuspected => BannerStyle {
            icon: "\u{2716}",
            class: "banner-fake",
            title: "Fake Account Suspected",
        },
        VerdictKind::PlatformVerified => BannerStyle {
            icon: "\u{2611}",
            class: "banner-verified",
            title: "Verified Account",
        },
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Returns `raw` as a link target only if it is an absolute http(s) URL.
pub fn safe_href(raw: &str) -> Option<String> {
    let url = Url::parse(raw.trim()).ok()?;
    matches!(url.scheme(), "http" | "https").then(|| url.to_string())
}

/// Anchor opening in a new tab, or plain escaped text when `href` is unsafe.
fn external_link(href: &str, text: &str) -> String {
    match safe_href(href) {
        Some(url) => format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
            escape_html(&url),
            escape_html(text)
        ),
        None => escape_html(text),
    }
}

fn or_na(value: &Option<String>) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => escape_html(v),
        _ => "N/A".to_string(),
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// Wraps `body` in the shared layout.
pub fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{style}</style>
</head>
<body>
    <nav>
        <a href="/">Dashboard</a>
        <a href="/instagram">Instagram</a>
        <a href="/twitter">Twitter</a>
        <a href="/search">Universal Search</a>
    </nav>
    <main>
{body}
    </main>
</body>
</html>
"#,
        title = escape_html(title),
        style = STYLESHEET,
        body = body
    )
}

pub fn index_page() -> String {
    page(
        "Account Verification Dashboard",
        r#"<h2>Account Verification Dashboard</h2>
<p class="muted">Check whether a social-media account looks genuine, or search the web for accounts to analyze.</p>
<ul>
    <li><a href="/instagram">Instagram account verification</a></li>
    <li><a href="/twitter">Twitter account verification</a></li>
    <li><a href="/search">Universal search</a></li>
</ul>"#,
    )
}

pub fn not_found_page(path: &str) -> String {
    page(
        "Not Found",
        &format!(
            r#"<h2>Page not found</h2>
<p class="muted">Nothing lives at <code>{}</code>.</p>
<p><a href="/">Back to the dashboard</a></p>"#,
            escape_html(path)
        ),
    )
}

/// Single text field with its submit button and inline error.
struct FieldForm<'a> {
    action: &'a str,
    name: &'a str,
    label: &'a str,
    placeholder: &'a str,
    value: &'a str,
    idle_text: &'a str,
    busy_text: &'a str,
}

impl FieldForm<'_> {
    fn render(&self, phase: Phase, error: Option<&FormError>) -> String {
        let mut html = String::new();
        let busy = phase == Phase::Requesting;
        let _ = write!(
            html,
            r#"<form method="post" action="{action}" class="field-row">
    <div>
        <label for="{name}">{label}</label>
        <input type="text" id="{name}" name="{name}" value="{value}" placeholder="{placeholder}">
"#,
            action = self.action,
            name = self.name,
            label = self.label,
            value = escape_html(self.value),
            placeholder = self.placeholder,
        );
        if let Some(error) = error {
            let _ = writeln!(
                html,
                r#"        <p class="error">{}</p>"#,
                escape_html(error.message())
            );
        }
        let _ = write!(
            html,
            r#"    </div>
    <button type="submit"{disabled}>{text}</button>
</form>
"#,
            disabled = if busy { " disabled" } else { "" },
            text = if busy { self.busy_text } else { self.idle_text },
        );
        html
    }
}

fn social_links_panel(social_links: &SocialLinks) -> String {
    let mut html =
        String::from("<h3>Accounts with same username on other platforms</h3>\n");
    match social_links {
        SocialLinks::Loading => {
            html.push_str(r#"<p class="muted">Checking for external links...</p>"#);
        }
        links if !links.links().is_empty() => {
            html.push_str(r#"<div class="links">"#);
            for link in links.links() {
                let _ = write!(
                    html,
                    "\n    {}",
                    external_link(&link.url, &format!("{} \u{2197}", link.platform))
                );
            }
            html.push_str("\n</div>");
        }
        _ => {
            html.push_str(r#"<p class="muted">No other social media presence found.</p>"#);
        }
    }
    html.push('\n');
    html
}
