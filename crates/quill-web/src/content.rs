//! Post bodies are authored HTML and rendered with `inner_html`, so they
//! are cleaned before they reach the page.

/// Strips scripts, event handlers and other unsafe markup, keeping the
/// formatting an editor produces.
pub fn clean_html(raw: &str) -> String {
    ammonia::clean(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripts_and_handlers_are_removed() {
        let cleaned = clean_html(
            r#"<p onclick="steal()">Hi<script>alert(1)</script></p><img src="x" onerror="steal()">"#,
        );
        assert!(!cleaned.contains("script"));
        assert!(!cleaned.contains("onclick"));
        assert!(!cleaned.contains("onerror"));
        assert!(cleaned.contains("<p>Hi</p>"));
    }

    #[test]
    fn formatting_survives() {
        let body = "<h2>Setup</h2><p>Run <code>nmap</code> with <strong>care</strong>.</p><ul><li>one</li></ul>";
        assert_eq!(clean_html(body), body);
    }

    #[test]
    fn javascript_links_lose_their_href() {
        let cleaned = clean_html(r#"<a href="javascript:alert(1)">x</a>"#);
        assert!(!cleaned.contains("javascript"));
    }
}
