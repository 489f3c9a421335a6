// ── Query results ──
//
// Name-pattern queries return the full detail projection; every other
// mode returns the name plus the tag list. Callers rely on that split.

use std::collections::BTreeMap;

use serde::Serialize;

use super::color::resolve_color_label;
use super::device_group::{DeviceGroupRecord, TagRef};

/// One matched device group, as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DeviceGroupFacts {
    Summary(DeviceGroupSummary),
    Detail(DeviceGroupDetail),
}

impl DeviceGroupFacts {
    pub fn name(&self) -> &str {
        match self {
            Self::Summary(s) => &s.name,
            Self::Detail(d) => &d.name,
        }
    }

    /// Tag names in configuration order, `None` for an untagged record.
    pub fn tag_names(&self) -> Option<Vec<&str>> {
        match self {
            Self::Summary(s) => Some(s.tag.as_ref()?.iter().map(String::as_str).collect()),
            Self::Detail(d) => Some(d.tag.as_ref()?.iter().map(|t| t.name.as_str()).collect()),
        }
    }
}

/// `{name, tag}` projection used by exact-name, exact-tag and tag-pattern queries.
///
/// `tag` is `None` (serialized as `null`) when the record carried no tag list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceGroupSummary {
    pub name: String,
    pub tag: Option<Vec<String>>,
}

impl DeviceGroupSummary {
    pub(crate) fn project(name: &str, tags: Option<&[TagRef]>) -> Self {
        Self {
            name: name.to_owned(),
            tag: tags.map(|tags| tags.iter().map(|t| t.name.clone()).collect()),
        }
    }
}

/// A tag with its color code resolved to a display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagFacts {
    pub name: String,
    pub color: Option<String>,
}

/// Full projection used by name-pattern queries.
///
/// Serializes as one flat object: the opaque attributes sit next to
/// `name`, `description` and `tag`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceGroupDetail {
    pub name: String,
    pub description: Option<String>,
    pub tag: Option<Vec<TagFacts>>,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl DeviceGroupDetail {
    pub(crate) fn project(name: &str, record: &DeviceGroupRecord) -> Self {
        Self {
            name: name.to_owned(),
            description: record.description.clone(),
            tag: record.tags.as_deref().map(|tags| {
                tags.iter()
                    .map(|t| TagFacts {
                        name: t.name.clone(),
                        color: t.color.as_deref().map(|c| resolve_color_label(c).to_owned()),
                    })
                    .collect()
            }),
            attributes: record.attributes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn detail_attributes_serialize_flat() {
        let mut record = DeviceGroupRecord::new("Prod", ["Prod-Services"]);
        record.attributes.insert("devices".into(), json!(["0001"]));

        let value = serde_json::to_value(DeviceGroupDetail::project("Prod", &record))
            .expect("serializable");
        assert_eq!(
            value,
            json!({
                "name": "Prod",
                "description": null,
                "tag": [{ "name": "Prod-Services", "color": null }],
                "devices": ["0001"]
            })
        );
    }

    #[test]
    fn untagged_records_project_a_null_tag_list() {
        let record = DeviceGroupRecord {
            uid: Some("Orphan".into()),
            ..DeviceGroupRecord::default()
        };
        let summary = DeviceGroupFacts::Summary(DeviceGroupSummary::project("Orphan", None));
        assert_eq!(summary.tag_names(), None);
        assert_eq!(
            serde_json::to_value(&summary).expect("serializable"),
            json!({ "name": "Orphan", "tag": null })
        );

        let detail = DeviceGroupDetail::project("Orphan", &record);
        assert_eq!(detail.tag, None);
    }
}
