//! Server configuration, shared state and startup
//!
//! - [`Config`] environment configuration
//! - [`ServerState`] handles shared by every request
//! - [`Server`] HTTP listener
//! - [`ServerError`] startup failures

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::{Result, ServerError};
pub use server::{Server, build_app};
pub use state::ServerState;
