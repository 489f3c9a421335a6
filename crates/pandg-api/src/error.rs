use thiserror::Error;

/// Top-level error type for the `pandg-api` crate.
///
/// Covers every failure mode of a Panorama XML API exchange:
/// authentication, transport, API envelopes, and XML decoding.
/// `pandg-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Key generation failed (wrong credentials, account locked, etc.)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// A request needing an API key was issued before one was set.
    #[error("No API key available -- call keygen() or set_api_key() first")]
    MissingApiKey,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Non-success HTTP status other than 401/403, outside any envelope.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    // ── API ─────────────────────────────────────────────────────────
    /// `<response status="error">` from the XML API.
    #[error("Panorama API error{}: {message}", code.as_deref().map(|c| format!(" (code {c})")).unwrap_or_default())]
    Api {
        message: String,
        code: Option<String>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// XML decoding failed, with the raw body for debugging.
    #[error("XML decoding error: {message}")]
    Xml { message: String, body: String },
}
