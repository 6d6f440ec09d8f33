//! HTML helper functions

/// Escape text for use in HTML content or attribute values
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Generate an anchor tag
///
/// # Examples
/// ```ignore
/// link_to("/blog/hello", "Hello <3") // -> <a href="/blog/hello">Hello &lt;3</a>
/// ```
pub fn link_to(href: &str, text: &str) -> String {
    format!(
        r#"<a href="{}">{}</a>"#,
        escape_html(href),
        escape_html(text)
    )
}

/// Render tag labels as a list of pills, or nothing when there are none
pub fn tag_list(tags: &[String]) -> String {
    if tags.is_empty() {
        return String::new();
    }

    let items: Vec<String> = tags
        .iter()
        .map(|tag| format!(r#"<li class="tag">{}</li>"#, escape_html(tag)))
        .collect();
    format!(r#"<ul class="tags">{}</ul>"#, items.join(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_link_to() {
        assert_eq!(link_to("/blog/a", "A & B"), r#"<a href="/blog/a">A &amp; B</a>"#);
    }

    #[test]
    fn test_tag_list() {
        assert_eq!(tag_list(&[]), "");
        let tags = vec!["rust".to_string(), "<web>".to_string()];
        assert_eq!(
            tag_list(&tags),
            r#"<ul class="tags"><li class="tag">rust</li><li class="tag">&lt;web&gt;</li></ul>"#
        );
    }
}
