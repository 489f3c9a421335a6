// ── API-to-domain conversions ──
//
// Bridges raw `pandg_api` configuration entries into canonical
// `DeviceGroupRecord`s. Tag references carry only names on the wire, so
// colors are joined in here: a tag defined inside the device group wins
// over a shared tag of the same name.

use std::collections::HashMap;

use pandg_api::{DeviceGroupEntry, TagEntry};

use crate::model::{DeviceGroupRecord, TagRef};

/// Convert device-group entries, resolving tag colors against `shared_tags`.
pub fn device_group_records(
    groups: Vec<DeviceGroupEntry>,
    shared_tags: &[TagEntry],
) -> Vec<DeviceGroupRecord> {
    let shared: HashMap<&str, &TagEntry> =
        shared_tags.iter().map(|t| (t.name.as_str(), t)).collect();
    groups
        .into_iter()
        .map(|group| record_from_entry(group, &shared))
        .collect()
}

fn record_from_entry(entry: DeviceGroupEntry, shared: &HashMap<&str, &TagEntry>) -> DeviceGroupRecord {
    let DeviceGroupEntry {
        name,
        description,
        tags,
        tag_definitions,
        attributes,
    } = entry;

    let color_of = |tag: &str| {
        tag_definitions
            .iter()
            .find(|d| d.name == tag)
            .or_else(|| shared.get(tag).copied())
            .and_then(|d| d.color.clone())
    };

    let tags = tags.map(|names| {
        names
            .into_iter()
            .map(|name| {
                let color = color_of(&name);
                TagRef { name, color }
            })
            .collect()
    });

    DeviceGroupRecord {
        uid: name,
        description,
        tags,
        attributes,
    }
}
