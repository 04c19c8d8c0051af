//! Employee positions

use serde::{Deserialize, Serialize};

/// Job held by an employee at a station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Manager,
    Cashier,
    #[default]
    Attendant,
    Maintenance,
}
