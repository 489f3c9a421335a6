// HTTP transport settings for the Panorama management interface.
//
// Panorama appliances commonly run with self-signed certificates, so TLS
// trust is configurable per profile: system roots, a pinned CA bundle, or
// no verification at all.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::error::Error;

const USER_AGENT: &str = concat!("pandg/", env!("CARGO_PKG_VERSION"));

/// How the client verifies the appliance certificate.
#[derive(Debug, Clone, Default)]
pub enum TlsMode {
    #[default]
    System,
    /// Trust the PEM certificate(s) at this path in addition to system roots.
    CustomCa(PathBuf),
    DangerAcceptInvalid,
}

impl TlsMode {
    fn apply(&self, builder: reqwest::ClientBuilder) -> Result<reqwest::ClientBuilder, Error> {
        Ok(match self {
            Self::System => builder,
            Self::CustomCa(path) => builder.add_root_certificate(read_ca(path)?),
            Self::DangerAcceptInvalid => {
                debug!("certificate verification disabled");
                builder.danger_accept_invalid_certs(true)
            }
        })
    }
}

fn read_ca(path: &Path) -> Result<reqwest::Certificate, Error> {
    let pem = std::fs::read(path)
        .map_err(|e| Error::Tls(format!("cannot read CA bundle {}: {e}", path.display())))?;
    reqwest::Certificate::from_pem(&pem)
        .map_err(|e| Error::Tls(format!("{} is not a PEM certificate: {e}", path.display())))
}

/// Settings used to build the `reqwest::Client` behind a `PanoramaClient`.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    /// Whole-request timeout, keygen included.
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::default(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let builder = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout);
        self.tls
            .apply(builder)?
            .build()
            .map_err(|e| Error::Tls(format!("cannot initialise HTTP client: {e}")))
    }
}
