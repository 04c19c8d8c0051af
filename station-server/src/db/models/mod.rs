//! Database Models

pub mod serde_helpers;

pub mod employee;
pub mod planning;
pub mod presence;
pub mod station;
pub mod user;

// Re-exports
pub use employee::{Employee, EmployeeCreate, EmployeeId, EmployeeUpdate};
pub use planning::{Planning, PlanningCreate, PlanningDraft, PlanningId, PlanningUpdate, WeekSlots};
pub use presence::{
    Presence, PresenceCreate, PresenceDraft, PresenceId, PresenceToggle, PresenceUpdate,
};
pub use station::{Station, StationCreate, StationId, StationUpdate};
pub use user::{User, UserCreate, UserId, UserUpdate};
