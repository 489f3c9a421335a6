//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use pandg_config::ConfigError;
use pandg_core::CoreError;

/// Process exit codes. Success is 0.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to Panorama at {url}")]
    #[diagnostic(
        code(pandg::connection_failed),
        help(
            "Check that the management interface is reachable.\n\
             URL: {url}\n\
             Self-signed certificate? Try --insecure, or set ca_cert in your profile."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(pandg::auth_failed),
        help(
            "Verify the API key or admin credentials.\n\
             Run: pandg config set-key --profile <name>"
        )
    )]
    AuthFailed { message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(pandg::no_credentials),
        help(
            "Store a key with: pandg config set-key\n\
             Or set PANDG_API_KEY, or PANDG_USERNAME and PANDG_PASSWORD."
        )
    )]
    NoCredentials { profile: String },

    // ── Query input ──────────────────────────────────────────────────

    #[error("Invalid regex '{pattern}'")]
    #[diagnostic(
        code(pandg::invalid_pattern),
        help("{reason}\nPatterns use Rust regex syntax; lookaround and backreferences are not supported.")
    )]
    InvalidPattern { pattern: String, reason: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(pandg::validation))]
    Validation { field: String, reason: String },

    #[error("Could not read snapshot {path}: {reason}")]
    #[diagnostic(
        code(pandg::snapshot),
        help("Snapshots are JSON or YAML: a list of device groups, or {{ device_groups: [...] }}.")
    )]
    Snapshot { path: String, reason: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("Panorama API error ({code}): {message}")]
    #[diagnostic(code(pandg::api_error))]
    ApiError { code: String, message: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(pandg::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Add a [profiles.<name>] table to the config file."
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No Panorama configured")]
    #[diagnostic(
        code(pandg::no_config),
        help(
            "Pass --url (or PANDG_URL), query a snapshot with --from-file,\n\
             or create a profile in: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(pandg::config))]
    Config(Box<figment::Error>),

    #[error("Keyring error: {message}")]
    #[diagnostic(code(pandg::keyring))]
    Keyring { message: String },

    // ── Timeout ──────────────────────────────────────────────────────

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(pandg::timeout),
        help("Increase timeout with --timeout or check Panorama responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── IO / Internal ────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    #[diagnostic(code(pandg::internal))]
    Internal(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::InvalidPattern { .. } | Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::InvalidPattern { pattern, source } => CliError::InvalidPattern {
                pattern,
                reason: source.to_string(),
            },

            CoreError::InvalidCriteria { message } => CliError::Validation {
                field: "query".into(),
                reason: message,
            },

            CoreError::Snapshot { path, reason } => CliError::Snapshot { path, reason },

            CoreError::Api { message, code } => CliError::ApiError {
                code: code.unwrap_or_else(|| "unknown".into()),
                message,
            },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Figment(err) => CliError::Config(err),
            ConfigError::Keyring(err) => CliError::Keyring {
                message: err.to_string(),
            },
            ConfigError::Io(err) => CliError::Io(err),
            ConfigError::Serialization(err) => CliError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_pattern_is_a_usage_error() {
        let source = regex::Regex::new("[unclosed").expect_err("invalid regex");
        let err = CliError::from(CoreError::InvalidPattern {
            pattern: "[unclosed".into(),
            source,
        });
        assert_eq!(err.exit_code(), exit_code::USAGE);
        assert!(err.to_string().contains("[unclosed"));
    }

    #[test]
    fn core_errors_map_to_exit_codes() {
        let cases = [
            (
                CoreError::AuthenticationFailed {
                    message: "Invalid credentials.".into(),
                },
                exit_code::AUTH,
            ),
            (
                CoreError::ConnectionFailed {
                    url: "https://pano.example/".into(),
                    reason: "refused".into(),
                },
                exit_code::CONNECTION,
            ),
            (CoreError::Timeout { timeout_secs: 5 }, exit_code::TIMEOUT),
            (
                CoreError::Api {
                    message: "bad xpath".into(),
                    code: Some("13".into()),
                },
                exit_code::GENERAL,
            ),
        ];
        for (core, code) in cases {
            assert_eq!(CliError::from(core).exit_code(), code);
        }
    }

    #[test]
    fn missing_credentials_exit_with_auth_code() {
        let err = CliError::from(ConfigError::NoCredentials {
            profile: "lab".into(),
        });
        assert_eq!(err.exit_code(), exit_code::AUTH);
    }
}
