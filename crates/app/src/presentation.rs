//! Text rendering of workbench state.

use restlab_domain::{ResponseEnvelope, SavedGroups, Tab};
use restlab_infrastructure::{SerializationError, to_json_pretty};

/// Line shown when no requests are saved.
pub const EMPTY_SIDEBAR: &str = "No saved requests yet.";

fn request_label(method: impl std::fmt::Display, url: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        format!("{method} (no URL)")
    } else {
        format!("{method} {url}")
    }
}

/// Joins lines with a trailing newline after each.
fn block(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

/// Renders one line per tab, marking the active one with `*` and
/// in-flight ones with `(sending)`.
#[must_use]
pub fn render_tab_strip(tabs: &[Tab], active: usize) -> String {
    block(
        tabs.iter()
            .enumerate()
            .map(|(index, tab)| {
                let marker = if index == active { '*' } else { ' ' };
                let sending = if tab.busy { " (sending)" } else { "" };
                format!(
                    "{marker} {}. {}{sending}",
                    index + 1,
                    request_label(tab.method, &tab.url)
                )
            })
            .collect(),
    )
}

/// Renders saved groups in order, one `METHOD url` line per snapshot.
#[must_use]
pub fn render_sidebar(groups: &SavedGroups) -> String {
    if groups.is_empty() {
        return block(vec![EMPTY_SIDEBAR.to_string()]);
    }

    let mut lines = Vec::new();
    for (name, snapshots) in groups.iter() {
        lines.push(name.to_string());
        lines.extend(
            snapshots
                .iter()
                .map(|snapshot| format!("  {}", request_label(snapshot.method, &snapshot.url))),
        );
    }
    block(lines)
}

/// Renders an envelope as two-space-indented JSON.
///
/// # Errors
///
/// Returns an error if the envelope cannot be serialized.
pub fn render_envelope(envelope: &ResponseEnvelope) -> Result<String, SerializationError> {
    to_json_pretty(envelope)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use restlab_domain::TabEdit;
    use restlab_domain::request::HttpMethod;
    use serde_json::json;

    #[test]
    fn tab_strip_marks_active_and_busy() {
        let mut first = Tab::new();
        first.apply(TabEdit::Url(" https://api.test/users ".to_string()));
        let mut second = Tab::new();
        second.apply(TabEdit::Method(HttpMethod::Post));
        second.apply(TabEdit::Busy(true));

        let text = render_tab_strip(&[first, second], 1);
        assert_eq!(
            text,
            "  1. GET https://api.test/users\n* 2. POST (no URL) (sending)\n"
        );
    }

    #[test]
    fn sidebar_empty_state() {
        assert_eq!(render_sidebar(&SavedGroups::new()), "No saved requests yet.\n");
    }

    #[test]
    fn sidebar_lists_groups_in_insertion_order() {
        let mut groups = SavedGroups::new();
        let mut tab = Tab::new();
        tab.apply(TabEdit::Url("https://b.test".to_string()));
        groups.insert("zeta", tab.snapshot());
        tab.apply(TabEdit::Method(HttpMethod::Delete));
        groups.insert("alpha", tab.snapshot());

        assert_eq!(
            render_sidebar(&groups),
            "zeta\n  GET https://b.test\nalpha\n  DELETE https://b.test\n"
        );
    }

    #[test]
    fn envelope_is_indented_json() {
        let text = render_envelope(&ResponseEnvelope::error("URL is required.")).unwrap();
        assert_eq!(
            text,
            "{\n  \"status\": \"error\",\n  \"payload\": {\n    \"error\": \"URL is required.\"\n  }\n}"
        );

        let ok = render_envelope(&ResponseEnvelope::success(200, json!([1]))).unwrap();
        assert_eq!(ok, "{\n  \"status\": 200,\n  \"payload\": [\n    1\n  ]\n}");
    }
}
