//! Planning Model (weekly shift plan)

use super::serde_helpers;
use super::{EmployeeId, StationId};
use serde::{Deserialize, Serialize};
use shared::models::Day;
use surrealdb::RecordId;

pub type PlanningId = RecordId;

/// One employee's planned shifts for one ISO week
///
/// Each day slot is empty or a `"<start>h-<end>h"` range. `employee_name`
/// is a snapshot of the employee's display name taken when the plan was
/// written; rows imported from the name-linked era may lack `employee`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Planning {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<PlanningId>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub employee: Option<EmployeeId>,
    pub employee_name: String,
    #[serde(default)]
    pub monday: Option<String>,
    #[serde(default)]
    pub tuesday: Option<String>,
    #[serde(default)]
    pub wednesday: Option<String>,
    #[serde(default)]
    pub thursday: Option<String>,
    #[serde(default)]
    pub friday: Option<String>,
    #[serde(default)]
    pub saturday: Option<String>,
    #[serde(default)]
    pub sunday: Option<String>,
    pub year: i32,
    pub week: u32,
    #[serde(with = "serde_helpers::record_id")]
    pub station: StationId,
}

impl Planning {
    /// Raw slot for `day`, `None` when unset or blank
    pub fn slot(&self, day: Day) -> Option<&str> {
        let slot = match day {
            Day::Monday => &self.monday,
            Day::Tuesday => &self.tuesday,
            Day::Wednesday => &self.wednesday,
            Day::Thursday => &self.thursday,
            Day::Friday => &self.friday,
            Day::Saturday => &self.saturday,
            Day::Sunday => &self.sunday,
        };
        slot.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// The seven day slots of a plan payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeekSlots {
    #[serde(default)]
    pub monday: Option<String>,
    #[serde(default)]
    pub tuesday: Option<String>,
    #[serde(default)]
    pub wednesday: Option<String>,
    #[serde(default)]
    pub thursday: Option<String>,
    #[serde(default)]
    pub friday: Option<String>,
    #[serde(default)]
    pub saturday: Option<String>,
    #[serde(default)]
    pub sunday: Option<String>,
}

impl WeekSlots {
    pub fn get(&self, day: Day) -> Option<&str> {
        match day {
            Day::Monday => self.monday.as_deref(),
            Day::Tuesday => self.tuesday.as_deref(),
            Day::Wednesday => self.wednesday.as_deref(),
            Day::Thursday => self.thursday.as_deref(),
            Day::Friday => self.friday.as_deref(),
            Day::Saturday => self.saturday.as_deref(),
            Day::Sunday => self.sunday.as_deref(),
        }
    }

    /// Trimmed copy; blank slots become empty strings
    pub fn normalized(&self) -> WeekSlots {
        let norm = |s: &Option<String>| Some(s.as_deref().unwrap_or("").trim().to_string());
        WeekSlots {
            monday: norm(&self.monday),
            tuesday: norm(&self.tuesday),
            wednesday: norm(&self.wednesday),
            thursday: norm(&self.thursday),
            friday: norm(&self.friday),
            saturday: norm(&self.saturday),
            sunday: norm(&self.sunday),
        }
    }
}

/// Create planning payload
///
/// The employee is named by id; `employee_name` alone is accepted for
/// callers still working from display names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningCreate {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub employee: Option<EmployeeId>,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(flatten)]
    pub slots: WeekSlots,
    pub year: i32,
    pub week: u32,
    /// Only read for admins; scoped callers always write their own station
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub station: Option<StationId>,
}

/// Update planning payload; only the day slots are editable
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanningUpdate {
    #[serde(flatten)]
    pub slots: WeekSlots,
}

/// Fully resolved plan ready to be written
#[derive(Debug, Clone)]
pub struct PlanningDraft {
    pub employee: EmployeeId,
    pub employee_name: String,
    pub slots: WeekSlots,
    pub year: i32,
    pub week: u32,
    pub station: StationId,
}
