use crate::link::Scheme;
use regex::Regex;
use std::sync::LazyLock;

// Runs up to a comma, whitespace, bracket or angle bracket, and must end on a
// balanced "(word)" group, a non-punctuation character, or a slash.
static HTTP_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bhttp://[^,\s()<>]+(?:\([\w\d]+\)|([^,[:punct:]\s]|/))")
        .expect("static regex must compile")
});
static HTTPS_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bhttps://[^,\s()<>]+(?:\([\w\d]+\)|([^,[:punct:]\s]|/))")
        .expect("static regex must compile")
});

/// Returns the compiled link pattern for a scheme
pub fn link_pattern(scheme: Scheme) -> &'static Regex {
    match scheme {
        Scheme::Http => &HTTP_LINK,
        Scheme::Https => &HTTPS_LINK,
    }
}

/// Iterates over every link of `scheme` in `text`, in order of appearance
pub fn find_links(text: &str, scheme: Scheme) -> impl Iterator<Item = &str> {
    link_pattern(scheme).find_iter(text).map(|m| m.as_str())
}

/// Replaces every occurrence of the link `from` with `to`
///
/// Only whole pattern matches equal to `from` are replaced, so a longer link
/// that merely starts with `from` is left alone.
///
/// # Returns
///
/// The rewritten text and the number of occurrences replaced
pub fn replace_link(text: &str, scheme: Scheme, from: &str, to: &str) -> (String, usize) {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut replaced = 0;

    for m in link_pattern(scheme).find_iter(text) {
        if m.as_str() != from {
            continue;
        }
        out.push_str(&text[last..m.start()]);
        out.push_str(to);
        last = m.end();
        replaced += 1;
    }
    out.push_str(&text[last..]);

    (out, replaced)
}
