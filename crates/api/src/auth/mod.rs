//! Authentication primitives.
//!
//! - [`jwt`] -- verification of identity-provider tokens.

pub mod jwt;
