//! Device-group query engine between `pandg-api` and the `pandg` CLI.
//!
//! - **[`select`]** — The filter-and-project engine. Takes an already
//!   fetched list of [`DeviceGroupRecord`]s and a [`SelectionCriterion`]
//!   (exact name, exact tag, tag regex, or name regex) and returns the
//!   matching records as [`DeviceGroupFacts`], in input order.
//!
//! - **[`DeviceGroupSource`]** — Where records come from. [`PanoramaSource`]
//!   reads the running configuration of a Panorama appliance through
//!   `pandg-api`; [`SnapshotSource`] reads a JSON or YAML file.
//!
//! - **[`query`]** — Fetch from a source and run the engine, producing the
//!   [`QueryOutcome`] envelope rendered by the CLI.
//!
//! - **Tag colors** ([`TagColor`]) — The fixed `color1`..`color16` table
//!   used to label tags in name-pattern results.

pub mod config;
pub mod convert;
pub mod error;
pub mod filter;
pub mod model;
pub mod query;
pub mod source;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{AuthCredentials, PanoramaConfig, TlsVerification};
pub use error::CoreError;
pub use filter::{SelectionCriterion, select};
pub use query::{QueryOutcome, query};
pub use source::{DeviceGroupSource, PanoramaSource, SnapshotSource};

pub use model::{
    DeviceGroupDetail, DeviceGroupFacts, DeviceGroupRecord, DeviceGroupSummary, TagColor,
    TagFacts, TagRef, resolve_color_label,
};
