//! Domain core of the Vitrine catalog service.
//!
//! Pure types and logic with no I/O of their own: products, categories,
//! settings keys, the store abstraction the backends implement, the
//! replace-all synchronizer and the catalog adapter built on top of it.

pub mod auth;
pub mod catalog;
pub mod category;
pub mod error;
pub mod ids;
pub mod product;
pub mod settings;
pub mod slug;
pub mod store;
pub mod sync;
