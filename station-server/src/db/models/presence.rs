//! Presence Model (per-day attendance record)

use super::serde_helpers;
use super::{EmployeeId, StationId};
use serde::{Deserialize, Serialize};
use shared::models::Day;
use surrealdb::RecordId;

pub type PresenceId = RecordId;

/// Attendance of one employee on one day of one ISO week
///
/// A missing record means "not recorded"; `is_present == false` means the
/// employee was marked absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Presence {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<PresenceId>,
    pub week: u32,
    pub day: Day,
    #[serde(default, deserialize_with = "serde_helpers::string_or_empty")]
    pub start_time: String,
    #[serde(default, deserialize_with = "serde_helpers::string_or_empty")]
    pub end_time: String,
    pub year: i32,
    #[serde(with = "serde_helpers::record_id")]
    pub employee: EmployeeId,
    #[serde(with = "serde_helpers::record_id")]
    pub station: StationId,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_present: bool,
}

/// Create presence payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceCreate {
    pub week: u32,
    pub day: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    pub year: i32,
    #[serde(with = "serde_helpers::record_id")]
    pub employee: EmployeeId,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub station: Option<StationId>,
    #[serde(default)]
    pub is_present: bool,
}

/// Update presence payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PresenceUpdate {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub is_present: Option<bool>,
}

/// Fully resolved presence ready to be written
#[derive(Debug, Clone)]
pub struct PresenceDraft {
    pub week: u32,
    pub day: Day,
    pub start_time: String,
    pub end_time: String,
    pub year: i32,
    pub employee: EmployeeId,
    pub station: StationId,
    pub is_present: bool,
}

/// Toggle request: mark one employee present or absent on one day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceToggle {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub employee: Option<EmployeeId>,
    /// Display name (`"{last} {first}"`), used when `employee` is absent
    #[serde(default)]
    pub employee_name: Option<String>,
    pub day: Day,
    pub year: i32,
    pub week: u32,
    pub is_present: bool,
}
