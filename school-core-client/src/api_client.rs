use reqwest::Url;
use school_core_api::{
    ActorRef, BatchRequest, HardDeleteResponse, HistoryItem, HistoryQuery, Paginated,
    RecycleBinItem, RecycleBinQuery, RestoreResponse,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ClientError;
use crate::latest::LatestRequest;

/// Error body returned by the server.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

/// Client for the recycle-bin and history endpoints, acting as one user.
pub struct RecycleBinClient {
    http: reqwest::Client,
    base_url: Url,
    actor: ActorRef,
    bin_listing: LatestRequest,
    history_listing: LatestRequest,
}

impl RecycleBinClient {
    pub fn new(base_url: &str, actor: ActorRef) -> Result<Self, ClientError> {
        let mut base_url =
            Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        // Endpoint paths are joined relative to the base, so it must end in `/`.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            actor,
            bin_listing: LatestRequest::new(),
            history_listing: LatestRequest::new(),
        })
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::InvalidUrl(format!("{path}: {e}")))
    }

    fn with_actor(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let mut req = req
            .header("x-actor-id", self.actor.id.to_string())
            .header("x-actor-name", self.actor.name.as_str());
        if let Some(email) = &self.actor.email {
            req = req.header("x-actor-email", email.as_str());
        }
        if let Some(role) = &self.actor.role {
            req = req.header("x-actor-role", role.as_str());
        }
        req
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = self.with_actor(req).send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            let (code, message) = match serde_json::from_str::<ErrorBody>(&body) {
                Ok(err) => (err.code, err.message),
                Err(_) => ("unknown".to_string(), body),
            };
            return Err(ClientError::Api {
                status: status.as_u16(),
                code,
                message,
            });
        }
        serde_json::from_str(&body).map_err(|e| ClientError::Api {
            status: status.as_u16(),
            code: "invalid_response".to_string(),
            message: e.to_string(),
        })
    }

    /// Deleted rows of one type. Supersedes any listing still in flight.
    pub async fn list_deleted(
        &self,
        query: &RecycleBinQuery,
    ) -> Result<Paginated<RecycleBinItem>, ClientError> {
        let url = self.url("api/admin/recycle-bin")?;
        let req = self.http.get(url).query(query);
        self.bin_listing.run(self.send_json(req)).await
    }

    pub async fn restore(&self, request: &BatchRequest) -> Result<RestoreResponse, ClientError> {
        let url = self.url("api/admin/recycle-bin/restore")?;
        self.send_json(self.http.post(url).json(request)).await
    }

    pub async fn hard_delete(
        &self,
        request: &BatchRequest,
    ) -> Result<HardDeleteResponse, ClientError> {
        let url = self.url("api/admin/recycle-bin/hard-delete")?;
        self.send_json(self.http.delete(url).json(request)).await
    }

    /// History page. Supersedes any history query still in flight.
    pub async fn list_history(
        &self,
        query: &HistoryQuery,
    ) -> Result<Paginated<HistoryItem>, ClientError> {
        let url = self.url("api/admin/recycle-history")?;
        let req = self.http.get(url).query(query);
        self.history_listing.run(self.send_json(req)).await
    }
}
