// ── Device-group domain model ──
//
// `DeviceGroupRecord` is what sources produce; `DeviceGroupFacts` is what
// the filter engine hands back to callers. The two never share data: every
// match is projected into fresh owned values.

pub mod color;
pub mod device_group;
pub mod facts;

// ── Re-exports ──────────────────────────────────────────────────────

pub use color::{TagColor, resolve_color_label};
pub use device_group::{DeviceGroupRecord, TagRef};
pub use facts::{DeviceGroupDetail, DeviceGroupFacts, DeviceGroupSummary, TagFacts};
