//! Good/broken decision rules
//!
//! A plain status-code check reports some working links as broken. The
//! exception rules below match those cases by substring and must stay exact.

use crate::link::LinkRecord;

/// Error text the embed host produces for a handshake it nevertheless serves
pub const EMBED_SSL_ERROR: &str = "Unknown SSL protocol error in connection to www.youtube.com:443 ";

/// Returns true if the probe outcome counts as a working link
///
/// Rules, first match wins:
/// 1. status in `200..307`
/// 2. embedded video, MathML namespace, or empty reply exception
/// 3. otherwise broken
pub fn is_good(record: &LinkRecord) -> bool {
    has_success_status(record)
        || is_embedded_video(record)
        || is_mathml_link(record)
        || is_empty_reply(record)
}

/// Status code in the accepted range
pub fn has_success_status(record: &LinkRecord) -> bool {
    matches!(record.status_code(), Some(200..=306))
}

/// Embedded video links that fail the TLS handshake but play fine
pub fn is_embedded_video(record: &LinkRecord) -> bool {
    record.status_code() == Some(0)
        && record.url.contains("youtub")
        && record.url.contains("embed")
        && record.transport_error() == Some(EMBED_SSL_ERROR)
}

/// Equation markup namespace links, accepted regardless of outcome
pub fn is_mathml_link(record: &LinkRecord) -> bool {
    record.url.contains("MathML") && record.url.contains("w3.org")
}

/// Servers that accept the connection but reply with nothing
pub fn is_empty_reply(record: &LinkRecord) -> bool {
    record
        .transport_error()
        .is_some_and(|e| e.contains("Empty reply from"))
}
