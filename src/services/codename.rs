use std::sync::OnceLock;

use regex::Regex;

fn disallowed_re() -> &'static Regex {
    static DISALLOWED_RE: OnceLock<Regex> = OnceLock::new();
    DISALLOWED_RE.get_or_init(|| Regex::new(r"[^a-zA-Z0-9_]").expect("valid codename regex"))
}

/// Derive a codename from free text.
///
/// Anything outside `[A-Za-z0-9_]` is dropped, not replaced, and the rest is
/// lower-cased. The result may be empty; uniqueness is up to the caller.
pub fn to_codename(text: &str) -> String {
    disallowed_re().replace_all(text, "").to_lowercase()
}
