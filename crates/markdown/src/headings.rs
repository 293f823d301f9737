use regex::{Captures, Regex};
use std::sync::OnceLock;

use crate::escape::{escape_html, unescape_basic};
use crate::slug::Slugger;

fn id_attr_re() -> &'static Regex {
    static ID_ATTR_RE: OnceLock<Regex> = OnceLock::new();
    ID_ATTR_RE.get_or_init(|| {
        Regex::new(r#"(?i)(?:^|\s)id\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#).unwrap()
    })
}

/// Register the `id` of every heading opening tag in `html` with `slugger`.
pub(crate) fn reserve_heading_ids(html: &str, slugger: &mut Slugger) {
    static OPEN_RE: OnceLock<Regex> = OnceLock::new();
    let open_re = OPEN_RE.get_or_init(|| Regex::new(r"(?i)<h[1-6](\s[^>]*)?>").unwrap());

    for caps in open_re.captures_iter(html) {
        if let Some(attrs) = caps.get(1) {
            if let Some(id) = existing_id(attrs.as_str()) {
                slugger.reserve(&id);
            }
        }
    }
}

fn existing_id(attrs: &str) -> Option<String> {
    let caps = id_attr_re().captures(attrs)?;
    let value = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3))?;
    Some(unescape_basic(value.as_str()))
}

/// Add an `id` attribute to every `<h1>`..`<h6>` element that lacks one.
///
/// The id is derived from the heading's text with nested tags removed.
/// Ids already present in `html` are reserved first, so generated ids never
/// repeat them. Heading content and existing attributes are left untouched.
pub(crate) fn inject_heading_ids(html: &str, slugger: &mut Slugger) -> String {
    static HEADING_RE: OnceLock<Regex> = OnceLock::new();
    let heading_re = HEADING_RE
        .get_or_init(|| Regex::new(r"(?is)<h([1-6])(\s[^>]*)?>(.*?)</h([1-6])\s*>").unwrap());

    reserve_heading_ids(html, slugger);

    heading_re
        .replace_all(html, |caps: &Captures| {
            let whole = &caps[0];
            let level = &caps[1];
            let attrs = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            let inner = &caps[3];

            if level != &caps[4] || id_attr_re().is_match(attrs) {
                return whole.to_string();
            }

            let id = slugger.slug(&heading_text(inner));
            format!(
                "<h{level} id=\"{}\"{attrs}>{inner}</h{level}>",
                escape_html(&id)
            )
        })
        .into_owned()
}

/// Plain text of a heading's inner HTML.
fn heading_text(inner_html: &str) -> String {
    static TAG_RE: OnceLock<Regex> = OnceLock::new();
    let tag_re = TAG_RE.get_or_init(|| Regex::new(r"<[^>]*>").unwrap());

    unescape_basic(&tag_re.replace_all(inner_html, ""))
}
