//! Station Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

pub type StationId = RecordId;

/// A fuel station; the unit of access scoping for non-admin accounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<StationId>,
    pub name: String,
    #[serde(default, deserialize_with = "serde_helpers::string_or_empty")]
    pub address: String,
    #[serde(default, deserialize_with = "serde_helpers::string_or_empty")]
    pub city: String,
    #[serde(default, deserialize_with = "serde_helpers::string_or_empty")]
    pub phone: String,
    #[serde(default, deserialize_with = "serde_helpers::string_or_empty")]
    pub email: String,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub pump_count: u32,
}

/// Create station payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationCreate {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub pump_count: u32,
}

/// Update station payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pump_count: Option<u32>,
}
