//! Vitrine catalog API server library.
//!
//! Exposes config, state, error handling and routes so integration tests
//! and the binary entrypoints can both access them.

pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod router;
pub mod routes;
pub mod state;
