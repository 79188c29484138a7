//! Row types for the catalog tables.
//!
//! Each row converts into its `vitrine_core` document type.

pub mod category;
pub mod product;
