// ── Core error types ──
//
// User-facing errors from pandg-core. Consumers never see HTTP status
// codes or XML decoding failures directly: the `From<pandg_api::Error>`
// impl translates transport-layer errors into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to Panorama at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Panorama request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Query errors ─────────────────────────────────────────────────
    /// A regex-bearing criterion could not be compiled. Fatal for the query.
    #[error("Invalid regex '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Zero or several selection criteria were supplied.
    #[error("Invalid selection: {message}")]
    InvalidCriteria { message: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Cannot read snapshot {path}: {reason}")]
    Snapshot { path: String, reason: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// The Panorama response code (e.g., "7" for a missing node).
        code: Option<String>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<pandg_api::Error> for CoreError {
    fn from(err: pandg_api::Error) -> Self {
        match err {
            pandg_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            pandg_api::Error::MissingApiKey => CoreError::AuthenticationFailed {
                message: "no API key available".into(),
            },
            pandg_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        code: e.status().map(|s| s.as_u16().to_string()),
                    }
                }
            }
            pandg_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            pandg_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            pandg_api::Error::Http { status, body } => CoreError::Api {
                message: format!("HTTP {status}: {body}"),
                code: Some(status.to_string()),
            },
            pandg_api::Error::Api { message, code } => {
                if code.as_deref() == Some("403") {
                    CoreError::AuthenticationFailed { message }
                } else {
                    CoreError::Api { message, code }
                }
            }
            pandg_api::Error::Xml { message, body: _ } => {
                CoreError::Internal(format!("XML decoding error: {message}"))
            }
        }
    }
}
