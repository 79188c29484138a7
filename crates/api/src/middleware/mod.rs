//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the verified identity from a Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the allow-listed administrator.

pub mod auth;
pub mod rbac;
