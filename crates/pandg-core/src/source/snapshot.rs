// Snapshot source: device groups read from a JSON or YAML file.
//
// The file holds either a bare list of records or an object with a
// `device_groups` list. Files ending in `.yaml`/`.yml` are read as YAML,
// anything else as JSON.

use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;

use crate::error::CoreError;
use crate::model::DeviceGroupRecord;
use crate::source::DeviceGroupSource;

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    List(Vec<DeviceGroupRecord>),
    Wrapped { device_groups: Vec<DeviceGroupRecord> },
}

impl SnapshotFile {
    fn into_records(self) -> Vec<DeviceGroupRecord> {
        match self {
            Self::List(records) | Self::Wrapped {
                device_groups: records,
            } => records,
        }
    }
}

/// Device groups loaded from a file on disk.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn is_yaml(&self) -> bool {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
    }

    /// Parse snapshot contents according to the file extension.
    pub fn parse(&self, contents: &str) -> Result<Vec<DeviceGroupRecord>, CoreError> {
        let parsed = if self.is_yaml() {
            serde_yaml::from_str::<SnapshotFile>(contents).map_err(|e| e.to_string())
        } else {
            serde_json::from_str::<SnapshotFile>(contents).map_err(|e| e.to_string())
        };
        parsed
            .map(SnapshotFile::into_records)
            .map_err(|reason| self.error(reason))
    }

    fn error(&self, reason: String) -> CoreError {
        CoreError::Snapshot {
            path: self.path.display().to_string(),
            reason,
        }
    }
}

impl DeviceGroupSource for SnapshotSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<DeviceGroupRecord>, CoreError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| self.error(e.to_string()))?;
        let records = self.parse(&contents)?;
        debug!(path = %self.path.display(), count = records.len(), "loaded snapshot");
        Ok(records)
    }
}
