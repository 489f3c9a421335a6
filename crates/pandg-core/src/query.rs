// ── Query service ──
//
// One query = validate the criterion, fetch from a source, run the
// engine once. The outcome keeps the `changed` / `results` / `objects`
// envelope that automation callers consume.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Value, json};
use tracing::{Instrument, debug, info_span};

use crate::error::CoreError;
use crate::filter::SelectionCriterion;
use crate::model::DeviceGroupFacts;
use crate::source::DeviceGroupSource;

/// Result envelope of a device-group query.
///
/// `objects` is a flat list of matches in source order. `results` holds
/// the attributes of the first match for exact-name queries and is empty
/// for every other mode or when nothing matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryOutcome {
    /// Always `false`: queries never modify the device.
    pub changed: bool,
    pub results: BTreeMap<String, Value>,
    pub objects: Vec<DeviceGroupFacts>,
}

impl QueryOutcome {
    pub fn new(criterion: &SelectionCriterion, objects: Vec<DeviceGroupFacts>) -> Self {
        let mut results = BTreeMap::new();
        if let (SelectionCriterion::ExactName(_), Some(first)) = (criterion, objects.first()) {
            results.insert("name".to_owned(), json!(first.name()));
            results.insert("tag".to_owned(), json!(first.tag_names()));
        }
        Self {
            changed: false,
            results,
            objects,
        }
    }
}

/// Fetch device groups from `source` and select those matching `criterion`.
///
/// Patterns are validated before anything is fetched.
pub async fn query<S: DeviceGroupSource>(
    source: &S,
    criterion: &SelectionCriterion,
) -> Result<QueryOutcome, CoreError> {
    let span = info_span!(
        "device_group_query",
        mode = criterion.mode(),
        source = %source.describe()
    );
    async {
        let matcher = criterion.compile()?;
        let records = source.fetch().await?;
        let objects = matcher.select(&records);
        debug!(records = records.len(), matched = objects.len(), "query complete");
        Ok::<_, CoreError>(QueryOutcome::new(criterion, objects))
    }
    .instrument(span)
    .await
}
