// ── Device-group sources ──
//
// A source produces the complete record list for one query. The filter
// engine never performs I/O itself.

use std::future::Future;

use crate::error::CoreError;
use crate::model::DeviceGroupRecord;

mod panorama;
mod snapshot;

pub use panorama::PanoramaSource;
pub use snapshot::SnapshotSource;

/// Something that can list every device group for a query.
pub trait DeviceGroupSource {
    /// Human-readable origin (URL or file path), for logs and diagnostics.
    fn describe(&self) -> String;

    /// Fetch the full device-group listing.
    fn fetch(&self) -> impl Future<Output = Result<Vec<DeviceGroupRecord>, CoreError>> + Send;
}
