use super::{escape_html, external_link, page, FieldForm};
use crate::forms::{SearchHit, ViewState};
use std::fmt::Write;

pub fn search_page(input: &str, state: &ViewState<Vec<SearchHit>>) -> String {
    let form = FieldForm {
        action: "/search",
        name: "query",
        label: "Search",
        placeholder: "Enter your query",
        value: input,
        idle_text: "Search",
        busy_text: "Searching...",
    };

    let mut body = String::from("<h2>Universal Search</h2>\n");
    body.push_str(&form.render(state.phase, state.error.as_ref()));

    // An empty result set renders nothing at all.
    let hits = state.result.as_deref().unwrap_or_default();
    if !hits.is_empty() {
        body.push_str(
            "<h3>Search Results</h3>\n<table>\n<thead><tr><th>Link</th><th>Analyze</th></tr></thead>\n<tbody>\n",
        );
        for hit in hits {
            let _ = writeln!(
                body,
                r#"<tr class="result-row"><td>{}</td><td><a class="button danger" href="{}">Analyze</a></td></tr>"#,
                external_link(&hit.url, &hit.url),
                escape_html(&hit.analyze_path)
            );
        }
        body.push_str("</tbody>\n</table>\n");
    }

    page("Universal Search", &body)
}
