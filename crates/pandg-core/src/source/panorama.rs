// Panorama source: device groups read live from the running configuration.
//
// Authenticates on first use (stored API key, or keygen from credentials),
// then reads device groups and shared tags and joins them into records.

use std::time::Duration;

use tracing::{debug, info};

use pandg_api::PanoramaClient;

use crate::config::{AuthCredentials, PanoramaConfig};
use crate::convert;
use crate::error::CoreError;
use crate::model::DeviceGroupRecord;
use crate::source::DeviceGroupSource;

/// Device groups fetched from a Panorama appliance.
pub struct PanoramaSource {
    client: PanoramaClient,
    auth: AuthCredentials,
    timeout: Duration,
}

impl PanoramaSource {
    /// Build a source (and its HTTP client) from connection settings.
    pub fn new(config: PanoramaConfig) -> Result<Self, CoreError> {
        let client = PanoramaClient::new(config.url.clone(), &config.transport())?;
        Ok(Self::with_client(client, config.auth, config.timeout))
    }

    /// Build a source around an existing client.
    pub fn with_client(client: PanoramaClient, auth: AuthCredentials, timeout: Duration) -> Self {
        Self {
            client,
            auth,
            timeout,
        }
    }

    async fn authenticate(&self) -> Result<(), CoreError> {
        if self.client.has_api_key() {
            return Ok(());
        }
        match &self.auth {
            AuthCredentials::ApiKey(key) => self.client.set_api_key(key.clone()),
            AuthCredentials::Credentials { username, password } => {
                info!(username, "generating API key");
                self.client
                    .keygen(username, password)
                    .await
                    .map_err(|e| self.map_error(e))?;
            }
        }
        Ok(())
    }

    /// Translate API errors, filling in the configured timeout.
    fn map_error(&self, err: pandg_api::Error) -> CoreError {
        match CoreError::from(err) {
            CoreError::Timeout { .. } => CoreError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            },
            other => other,
        }
    }
}

impl DeviceGroupSource for PanoramaSource {
    fn describe(&self) -> String {
        self.client.base_url().to_string()
    }

    async fn fetch(&self) -> Result<Vec<DeviceGroupRecord>, CoreError> {
        self.authenticate().await?;

        let groups = self
            .client
            .list_device_groups()
            .await
            .map_err(|e| self.map_error(e))?;
        let shared_tags = self
            .client
            .list_shared_tags()
            .await
            .map_err(|e| self.map_error(e))?;
        debug!(
            groups = groups.len(),
            shared_tags = shared_tags.len(),
            "fetched device-group configuration"
        );

        Ok(convert::device_group_records(groups, &shared_tags))
    }
}
