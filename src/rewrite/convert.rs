use crate::link::{LinkRecord, Scheme};

/// Returns `url` with a leading `http://` switched to `https://`
///
/// Any other URL is returned unchanged.
pub fn upgrade_url(url: &str) -> String {
    match url.strip_prefix(Scheme::Http.prefix()) {
        Some(rest) => format!("{}{}", Scheme::Https.prefix(), rest),
        None => url.to_string(),
    }
}

/// Returns `url` with a leading `https://` switched back to `http://`
pub fn downgrade_url(url: &str) -> String {
    match url.strip_prefix(Scheme::Https.prefix()) {
        Some(rest) => format!("{}{}", Scheme::Http.prefix(), rest),
        None => url.to_string(),
    }
}

/// Creates unprobed HTTPS counterparts of verified HTTP records
///
/// The input records are not modified; each copy keeps its original's index,
/// source and metadata so it can be joined back after probing.
pub fn convert(records: &[LinkRecord]) -> Vec<LinkRecord> {
    records
        .iter()
        .map(|record| record.with_url(upgrade_url(&record.url)))
        .collect()
}
