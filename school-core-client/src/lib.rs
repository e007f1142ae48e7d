//! HTTP client for the recycle-bin admin endpoints.
//!
//! List calls are last-request-wins: starting a new listing aborts the one
//! still in flight, which then resolves to [`ClientError::Canceled`].

pub mod api_client;
pub mod error;
pub mod latest;

pub use api_client::RecycleBinClient;
pub use error::ClientError;
pub use latest::LatestRequest;
