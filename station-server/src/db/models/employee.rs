//! Employee Model

use super::serde_helpers;
use super::StationId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::models::Position;
use surrealdb::RecordId;

pub type EmployeeId = RecordId;

/// Station staff member (not a login account)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<EmployeeId>,
    pub last_name: String,
    pub first_name: String,
    #[serde(default, deserialize_with = "serde_helpers::string_or_empty")]
    pub address: String,
    #[serde(default, deserialize_with = "serde_helpers::string_or_empty")]
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub station: Option<StationId>,
    #[serde(default, deserialize_with = "serde_helpers::string_or_empty")]
    pub image: String,
}

impl Employee {
    /// `"{last_name} {first_name}"`, the name plans and the weekly grid show
    pub fn display_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }
}

/// Create employee payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub last_name: String,
    pub first_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub station: Option<StationId>,
    #[serde(default)]
    pub image: String,
}

/// Update employee payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub position: Option<Position>,
    pub start_date: Option<NaiveDate>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub station: Option<StationId>,
    pub image: Option<String>,
}
