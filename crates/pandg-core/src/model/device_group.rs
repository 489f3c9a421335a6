// ── Device-group records ──

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A reference from a device group to a tag, with the tag's color code
/// when the source knows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TagRefRepr")]
pub struct TagRef {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl TagRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None,
        }
    }

    pub fn colored(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: Some(color.into()),
        }
    }
}

/// Snapshot files may list tags as bare names or as `{name, color}` objects.
#[derive(Deserialize)]
#[serde(untagged)]
enum TagRefRepr {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        color: Option<String>,
    },
}

impl From<TagRefRepr> for TagRef {
    fn from(repr: TagRefRepr) -> Self {
        match repr {
            TagRefRepr::Name(name) => Self { name, color: None },
            TagRefRepr::Full { name, color } => Self { name, color },
        }
    }
}

/// One device group as fetched from the management plane.
///
/// Immutable input to the filter engine. `uid` and `tags` are optional
/// because sources pass incomplete entries through unchanged. The engine
/// drops records without a `uid`; a record without `tags` can still match
/// by name but never by tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceGroupRecord {
    /// Unique device-group name.
    #[serde(default, alias = "name")]
    pub uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tag references in configuration order.
    #[serde(default, alias = "tag")]
    pub tags: Option<Vec<TagRef>>,
    /// Opaque descriptive attributes, passed through to detail results.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl DeviceGroupRecord {
    /// A well-formed record with the given name and uncolored tags.
    pub fn new<I, S>(uid: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            uid: Some(uid.into()),
            tags: Some(tags.into_iter().map(TagRef::new).collect()),
            ..Self::default()
        }
    }
}
