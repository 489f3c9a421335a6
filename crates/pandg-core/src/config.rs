// ── Runtime connection configuration ──
//
// These types describe *how* to reach a Panorama appliance. They carry
// credential data and connection tuning, but never touch disk. The CLI
// constructs a `PanoramaConfig` and hands it to `PanoramaSource`.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use pandg_api::{TlsMode, TransportConfig};

/// How to authenticate with Panorama.
#[derive(Debug, Clone)]
pub enum AuthCredentials {
    /// Pre-generated XML API key (preferred).
    ApiKey(SecretString),
    /// Administrator credentials, exchanged for a key via `type=keygen`.
    Credentials {
        username: String,
        password: SecretString,
    },
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed management certificates).
    DangerAcceptInvalid,
}

/// Configuration for connecting to a single Panorama appliance.
#[derive(Debug, Clone)]
pub struct PanoramaConfig {
    /// Management interface URL (e.g., `https://panorama.example.com`).
    pub url: Url,
    /// Authentication method and credentials.
    pub auth: AuthCredentials,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
}

impl PanoramaConfig {
    /// Transport settings for the API client.
    pub fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}
