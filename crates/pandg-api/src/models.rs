// Panorama configuration models
//
// Typed views over the `<entry>` elements returned by config reads. Only
// the fields the query tooling needs are modelled explicitly; every other
// child element of a device group lands in `attributes` as JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::xml::XmlNode;

/// Child elements of a device-group entry that are decoded into typed fields.
const MODELLED_DEVICE_GROUP_FIELDS: &[&str] = &["description", "tag"];

// ── Tag ──────────────────────────────────────────────────────────────

/// A tag object definition (`<tag><entry name=".."><color>..`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagEntry {
    pub name: String,
    /// Color code as stored on the device (`color1` .. `color16`).
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
}

impl TagEntry {
    /// Decode a tag `<entry>`; entries without a `name` attribute are skipped.
    pub fn from_xml(entry: &XmlNode) -> Option<Self> {
        let name = entry.attr("name")?.to_owned();
        Some(Self {
            name,
            color: entry.child_text("color").map(str::to_owned),
            comments: entry.child_text("comments").map(str::to_owned),
        })
    }
}

// ── Device group ─────────────────────────────────────────────────────

/// A device-group `<entry>` from the Panorama running configuration.
///
/// `name` and `tags` are optional because the entry is passed on as-is;
/// deciding what to do with incomplete entries is the caller's business.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceGroupEntry {
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Tag references (`<tag><member>`), in configuration order.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Tag objects defined inside this device group (`<tag><entry>`).
    #[serde(default)]
    pub tag_definitions: Vec<TagEntry>,
    /// Remaining child elements, converted to JSON.
    #[serde(default)]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl DeviceGroupEntry {
    pub fn from_xml(entry: &XmlNode) -> Self {
        let tag_node = entry.child("tag");

        let tags = tag_node.map_or_else(
            || Some(Vec::new()),
            |tag| {
                let members = tag.members();
                let has_entries = tag.children_named("entry").next().is_some();
                // A <tag> holding neither members nor definitions is malformed.
                if members.is_empty() && !has_entries && !tag.children.is_empty() {
                    None
                } else {
                    Some(members)
                }
            },
        );

        let tag_definitions = tag_node
            .map(|tag| {
                tag.children_named("entry")
                    .filter_map(TagEntry::from_xml)
                    .collect()
            })
            .unwrap_or_default();

        let attributes = entry
            .children
            .iter()
            .filter(|c| !MODELLED_DEVICE_GROUP_FIELDS.contains(&c.name.as_str()))
            .map(|c| (c.name.clone(), c.to_json()))
            .collect();

        Self {
            name: entry.attr("name").map(str::to_owned),
            description: entry.child_text("description").map(str::to_owned),
            tags,
            tag_definitions,
            attributes,
        }
    }
}
