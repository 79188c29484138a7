//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or any Postgres executor) as the first argument.

pub mod category_repo;
pub mod product_repo;
pub mod setting_repo;

pub use category_repo::CategoryRepo;
pub use product_repo::ProductRepo;
pub use setting_repo::SettingRepo;
