use serde::Deserialize;

/// Main configuration structure for Link-Audit
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub probe: ProbeConfig,
    pub output: OutputConfig,
}

/// Network probing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeConfig {
    /// Number of links probed concurrently before the next batch starts
    #[serde(rename = "batch-size", default = "default_batch_size")]
    pub batch_size: usize,

    /// Overall per-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout (milliseconds)
    #[serde(rename = "connect-timeout-ms", default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Maximum redirects followed per request
    #[serde(rename = "max-redirects", default = "default_max_redirects")]
    pub max_redirects: usize,

    /// User-Agent header sent with every probe
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_ms: default_connect_timeout_ms(),
            max_redirects: default_max_redirects(),
            user_agent: default_user_agent(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite content database
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// Directory the good/broken link reports are written to
    #[serde(rename = "results-dir")]
    pub results_dir: String,
}

fn default_batch_size() -> usize {
    380
}

fn default_timeout_secs() -> u64 {
    100
}

fn default_connect_timeout_ms() -> u64 {
    500
}

fn default_max_redirects() -> usize {
    5
}

fn default_user_agent() -> String {
    "Mozilla/4.0 (B*U*S)".to_string()
}
