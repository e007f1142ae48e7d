//! Recycle-bin service: soft delete, restore, hard delete and the audit
//! history, implemented over the repository traits of `school-core-db`.

pub mod config;
pub mod recycle_bin_service;
pub mod user_names;

pub use config::ServiceConfig;
pub use recycle_bin_service::RecycleBinServiceImpl;
pub use user_names::UserNameResolver;
