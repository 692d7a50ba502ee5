//! HTTP probe client
//!
//! Builds the shared reqwest client and performs single HEAD probes. Any
//! transport failure is turned into a `ProbeOutcome` rather than an error.

use crate::config::ProbeConfig;
use crate::link::ProbeOutcome;
use reqwest::{redirect::Policy, Client};
use std::error::Error as StdError;
use std::time::Duration;

/// Builds the HTTP client used for every probe of a run
///
/// Certificate validation is off; an untrusted certificate still counts as a response.
///
/// # Example
///
/// ```no_run
/// use link_audit::config::ProbeConfig;
/// use link_audit::probe::build_probe_client;
///
/// let client = build_probe_client(&ProbeConfig::default()).unwrap();
/// ```
pub fn build_probe_client(config: &ProbeConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .use_rustls_tls()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
        .redirect(Policy::limited(config.max_redirects))
        .danger_accept_invalid_certs(true)
        .build()
}

/// Sends one HEAD request and records what happened
///
/// # Returns
///
/// * `ProbeOutcome::response` - with the final status code after redirects
/// * `ProbeOutcome::transport_failure` - with the full error chain as text
pub async fn probe_url(client: &Client, url: &str) -> ProbeOutcome {
    match client.head(url).send().await {
        Ok(response) => ProbeOutcome::response(response.status().as_u16()),
        Err(e) if closed_without_reply(&e) => {
            ProbeOutcome::transport_failure(format!("{}: {}", EMPTY_REPLY_ERROR, describe_error(&e)))
        }
        Err(e) => ProbeOutcome::transport_failure(describe_error(&e)),
    }
}

/// Error text recorded when a server closes the connection without replying
pub const EMPTY_REPLY_ERROR: &str = "Empty reply from server";

/// True if the connection was closed before any response arrived
fn closed_without_reply(error: &(dyn StdError + 'static)) -> bool {
    let mut source = Some(error);
    while let Some(cause) = source {
        if cause
            .downcast_ref::<hyper::Error>()
            .is_some_and(|e| e.is_incomplete_message())
        {
            return true;
        }
        source = cause.source();
    }
    false
}

/// Renders an error with its whole source chain, outermost first
pub fn describe_error(error: &(dyn StdError + 'static)) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.contains(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}
