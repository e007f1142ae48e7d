use parking_lot::Mutex;
use std::future::Future;
use tokio_util::sync::CancellationToken;

use crate::error::ClientError;

/// Last-request-wins guard for one kind of request.
///
/// Each [`LatestRequest::run`] cancels the call started before it, so a slow
/// stale response can never overwrite a newer one.
#[derive(Debug, Default)]
pub struct LatestRequest {
    current: Mutex<Option<CancellationToken>>,
}

impl LatestRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the in-flight call, if any, and register a new one.
    pub fn begin(&self) -> CancellationToken {
        let token = CancellationToken::new();
        if let Some(previous) = self.current.lock().replace(token.clone()) {
            previous.cancel();
        }
        token
    }

    /// Cancel the in-flight call without starting another.
    pub fn cancel(&self) {
        if let Some(previous) = self.current.lock().take() {
            previous.cancel();
        }
    }

    pub async fn run<T, F>(&self, request: F) -> Result<T, ClientError>
    where
        F: Future<Output = Result<T, ClientError>>,
    {
        let token = self.begin();
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                tracing::debug!("superseded request canceled");
                Err(ClientError::Canceled)
            }
            result = request => result,
        }
    }
}
