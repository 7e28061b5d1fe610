use std::collections::{HashMap, HashSet};

/// Render article markdown to sanitized HTML.
#[must_use]
pub fn markdown_to_html(input: &str) -> String {
    let mut options = pulldown_cmark::Options::empty();
    options.insert(pulldown_cmark::Options::ENABLE_STRIKETHROUGH);
    options.insert(pulldown_cmark::Options::ENABLE_TABLES);
    options.insert(pulldown_cmark::Options::ENABLE_TASKLISTS);

    let parser = pulldown_cmark::Parser::new_ext(input, options);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    sanitize_html(&html)
}

#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "p", "div", "span", "br", "hr", "em", "strong", "del", "b", "i", "code", "pre",
        "blockquote", "ul", "ol", "li", "a", "h1", "h2", "h3", "h4", "h5", "h6", "table",
        "thead", "tbody", "tr", "th", "td",
    ]
    .into_iter()
    .collect();

    let mut attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    attributes.insert("a", ["href", "title"].into_iter().collect());

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(attributes)
        .clean(html)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{markdown_to_html, sanitize_html};

    #[test]
    fn renders_headings_lists_and_code() {
        let html = markdown_to_html("## Big-O\n\n- `O(n)` scan\n- **binary** search\n");
        assert!(html.contains("<h2>Big-O</h2>"), "{html}");
        assert!(html.contains("<code>O(n)</code>"), "{html}");
        assert!(html.contains("<strong>binary</strong>"), "{html}");
    }

    #[test]
    fn markdown_to_html_sanitizes_links() {
        let html = markdown_to_html("[Link](javascript:alert(1))");
        assert!(html.contains("Link"));
        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn sanitize_drops_scripts_and_handlers() {
        let html = sanitize_html("<p onclick=\"x()\">Hi</p><script>alert(1)</script>");
        assert!(html.contains("<p>Hi</p>"), "{html}");
        assert!(!html.contains("script"));
        assert!(!html.contains("onclick"));
    }

    #[test]
    fn tables_survive_sanitizing() {
        let html = markdown_to_html("| op | cost |\n|----|------|\n| push | O(1) |\n");
        assert!(html.contains("<table>"), "{html}");
        assert!(html.contains("<td>O(1)</td>"), "{html}");
    }
}
