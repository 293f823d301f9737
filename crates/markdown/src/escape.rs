/// Escape HTML special characters.
///
/// Every piece of text the writer emits goes through here exactly once.
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    push_escaped(&mut escaped, s);
    escaped
}

pub(crate) fn push_escaped(out: &mut String, s: &str) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

/// Decode the entities produced by [`escape_html`] plus the common `&nbsp;`.
///
/// Used to recover heading text from rendered HTML before slugging.
pub(crate) fn unescape_basic(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
