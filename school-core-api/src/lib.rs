//! Shared domain types, errors and the service contract for the school
//! recycle bin and its audit history.

pub mod domain;
pub mod error;
pub mod service;

pub use domain::*;
pub use error::*;
pub use service::*;
