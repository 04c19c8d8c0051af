//! Domain enums shared between the server and API consumers

pub mod day;
pub mod position;
pub mod role;

pub use day::{Day, UnknownDay};
pub use position::Position;
pub use role::{UnknownRole, UserRole};
