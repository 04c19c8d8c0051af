//! Authentication and access control
//!
//! - [`jwt`] token issuing and validation
//! - [`extractor`] `CurrentUser` extractor
//! - [`middleware`] `require_auth` / `require_admin`
//! - [`policy`] per-request station scope

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod policy;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService, TokenSubject};
pub use middleware::{require_admin, require_auth};
pub use policy::AccessScope;
