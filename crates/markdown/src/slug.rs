//! Heading slugs for anchor links.

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

const FALLBACK_SLUG: &str = "heading";

/// Normalize heading text into a URL-safe identifier without deduplication.
///
/// Lowercases, trims, drops everything except word characters, whitespace
/// and hyphens, then collapses whitespace runs into single hyphens. Text that
/// normalizes to nothing becomes `heading`.
pub fn base_slug(text: &str) -> String {
    static STRIP_RE: OnceLock<Regex> = OnceLock::new();
    static SPACE_RE: OnceLock<Regex> = OnceLock::new();
    let strip_re = STRIP_RE.get_or_init(|| Regex::new(r"[^\w\s-]").unwrap());
    let space_re = SPACE_RE.get_or_init(|| Regex::new(r"\s+").unwrap());

    let normalized: String = text.nfc().collect::<String>().to_lowercase();
    let stripped = strip_re.replace_all(normalized.trim(), "");
    let slug = space_re.replace_all(stripped.trim(), "-");

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug.into_owned()
    }
}

/// Call-scoped slug registry.
///
/// Hands out unique ids: the first occurrence of a base slug is returned
/// as-is, the Nth occurrence gets a `-N` suffix. Ids registered with
/// [`Slugger::reserve`] are never handed out.
#[derive(Debug, Default)]
pub struct Slugger {
    seen: HashMap<String, usize>,
    taken: HashSet<String>,
}

impl Slugger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slug(&mut self, text: &str) -> String {
        let base = base_slug(text);
        let count = self.seen.entry(base.clone()).or_insert(0);

        let slug = loop {
            *count += 1;
            let candidate = if *count == 1 {
                base.clone()
            } else {
                format!("{}-{}", base, count)
            };
            if self.taken.insert(candidate.clone()) {
                break candidate;
            }
        };
        log::trace!("slug {:?} -> {}", text, slug);
        slug
    }

    /// Mark an id that is already present in the output as used.
    pub fn reserve(&mut self, id: &str) {
        if self.taken.insert(id.to_string()) {
            log::trace!("reserved id {}", id);
        }
    }
}
