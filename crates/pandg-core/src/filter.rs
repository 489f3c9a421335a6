//! The filter-and-project engine.
//!
//! [`select`] runs one [`SelectionCriterion`] over a list of
//! [`DeviceGroupRecord`]s in a single pass. Patterns are compiled once per
//! query and matched with unanchored search, so `Prod` finds `Prod-East`.
//! Results keep input order and each record appears at most once.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::CoreError;
use crate::model::{
    DeviceGroupDetail, DeviceGroupFacts, DeviceGroupRecord, DeviceGroupSummary, TagRef,
};

/// Which device groups a query selects. Exactly one mode per query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum SelectionCriterion {
    /// Device group name equals the value (case-sensitive).
    ExactName(String),
    /// Some tag on the device group equals the value.
    ExactTag(String),
    /// Some tag on the device group contains a match for the regex.
    TagPattern(String),
    /// The device group name contains a match for the regex.
    NamePattern(String),
}

impl SelectionCriterion {
    /// Build a criterion from the four optional query inputs.
    ///
    /// Empty strings count as absent. Exactly one input must remain.
    pub fn from_options(
        name: Option<String>,
        name_regex: Option<String>,
        tag: Option<String>,
        tag_regex: Option<String>,
    ) -> Result<Self, CoreError> {
        let supplied: Vec<(&'static str, Self)> = [
            ("name", name.map(Self::ExactName)),
            ("name_regex", name_regex.map(Self::NamePattern)),
            ("tag", tag.map(Self::ExactTag)),
            ("tag_regex", tag_regex.map(Self::TagPattern)),
        ]
        .into_iter()
        .filter_map(|(field, criterion)| {
            criterion
                .filter(|c| !c.value().is_empty())
                .map(|c| (field, c))
        })
        .collect();

        match <[_; 1]>::try_from(supplied) {
            Ok([(_, criterion)]) => Ok(criterion),
            Err(supplied) if supplied.is_empty() => Err(CoreError::InvalidCriteria {
                message: "one of name, name_regex, tag, tag_regex is required".into(),
            }),
            Err(supplied) => {
                let fields: Vec<&str> = supplied.iter().map(|(field, _)| *field).collect();
                Err(CoreError::InvalidCriteria {
                    message: format!("parameters are mutually exclusive: {}", fields.join(", ")),
                })
            }
        }
    }

    /// Short mode name, used in logs and diagnostics.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::ExactName(_) => "name",
            Self::ExactTag(_) => "tag",
            Self::TagPattern(_) => "tag_regex",
            Self::NamePattern(_) => "name_regex",
        }
    }

    /// The name, tag, or pattern this criterion carries.
    pub fn value(&self) -> &str {
        match self {
            Self::ExactName(v) | Self::ExactTag(v) | Self::TagPattern(v) | Self::NamePattern(v) => {
                v
            }
        }
    }

    /// Compile the criterion, validating any pattern.
    pub fn compile(&self) -> Result<Matcher<'_>, CoreError> {
        let compiled = |pattern: &str| {
            Regex::new(pattern).map_err(|source| CoreError::InvalidPattern {
                pattern: pattern.to_owned(),
                source,
            })
        };
        Ok(match self {
            Self::ExactName(name) => Matcher::Name(name),
            Self::ExactTag(tag) => Matcher::Tag(tag),
            Self::TagPattern(pattern) => Matcher::TagPattern(compiled(pattern)?),
            Self::NamePattern(pattern) => Matcher::NamePattern(compiled(pattern)?),
        })
    }
}

/// A compiled [`SelectionCriterion`], reusable across record lists.
#[derive(Debug)]
pub enum Matcher<'a> {
    Name(&'a str),
    Tag(&'a str),
    TagPattern(Regex),
    NamePattern(Regex),
}

impl Matcher<'_> {
    /// Select and project matching records, preserving input order.
    pub fn select(&self, records: &[DeviceGroupRecord]) -> Vec<DeviceGroupFacts> {
        records.iter().filter_map(|r| self.project(r)).collect()
    }

    /// Project one record, or `None` if it does not match.
    ///
    /// A record without a name never matches. A record without a tag list
    /// can match by name but never by tag.
    fn project(&self, record: &DeviceGroupRecord) -> Option<DeviceGroupFacts> {
        let Some(name) = record.uid.as_deref() else {
            trace!("skipping device group record without a name");
            return None;
        };
        let tags = record.tags.as_deref();

        let matched = match self {
            Self::Name(wanted) => name == *wanted,
            Self::Tag(wanted) => any_tag(name, tags, |tag| tag == *wanted)?,
            Self::TagPattern(re) => any_tag(name, tags, |tag| re.is_match(tag))?,
            Self::NamePattern(re) => {
                return re
                    .is_match(name)
                    .then(|| DeviceGroupFacts::Detail(DeviceGroupDetail::project(name, record)));
            }
        };

        matched.then(|| DeviceGroupFacts::Summary(DeviceGroupSummary::project(name, tags)))
    }
}

/// Whether any tag name satisfies `pred`; `None` when the record has no tag list.
fn any_tag(name: &str, tags: Option<&[TagRef]>, pred: impl Fn(&str) -> bool) -> Option<bool> {
    let Some(tags) = tags else {
        trace!(uid = name, "skipping device group without a tag list");
        return None;
    };
    Some(tags.iter().any(|t| pred(&t.name)))
}

/// Select the device groups matching `criterion`.
///
/// Fails only when a pattern does not compile; nothing is returned then.
pub fn select(
    records: &[DeviceGroupRecord],
    criterion: &SelectionCriterion,
) -> Result<Vec<DeviceGroupFacts>, CoreError> {
    Ok(criterion.compile()?.select(records))
}
