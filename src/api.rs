//! HTTP side of the server contract.

use std::time::Duration;

use reqwest::{Client, Response};

use crate::error::ClientError;
use crate::placement::PlacementRequest;
use crate::protocol::{
    endpoint, ErrorBody, PlacementResponse, PLACE_FLEET_PATH, RESTART_PATH, STATE_PATH,
};
use crate::snapshot::Snapshot;

pub const PLACE_FALLBACK: &str = "Error placing the fleet";
pub const STATE_FALLBACK: &str = "Error fetching server state";
pub const RESTART_FALLBACK: &str = "Error restarting the service";

/// Request/response calls the client makes against the server.
#[async_trait::async_trait]
pub trait GameApi: Send + Sync {
    /// `POST /colocar-flota`.
    async fn place_fleet(&self, request: &PlacementRequest)
        -> Result<PlacementResponse, ClientError>;
    /// `GET /estado`.
    async fn fetch_state(&self) -> Result<Snapshot, ClientError>;
    /// `POST /reiniciar`.
    async fn restart(&self) -> Result<(), ClientError>;
}

/// [`GameApi`] over HTTP with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        endpoint(&self.base_url, path)
    }
}

/// Turn a non-success response into a request error carrying the server's
/// `detail`, or `fallback` when there is none.
async fn rejection(response: Response, fallback: &str) -> ClientError {
    let status = response.status();
    let detail = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.detail_text().map(str::to_owned));
    tracing::warn!(%status, ?detail, "request rejected");
    ClientError::Request(detail.unwrap_or_else(|| fallback.to_owned()))
}

#[async_trait::async_trait]
impl GameApi for HttpApi {
    async fn place_fleet(
        &self,
        request: &PlacementRequest,
    ) -> Result<PlacementResponse, ClientError> {
        let response = self
            .client
            .post(self.url(PLACE_FLEET_PATH))
            .json(request)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(rejection(response, PLACE_FALLBACK).await);
        }
        response
            .json::<PlacementResponse>()
            .await
            .map_err(|e| ClientError::Request(format!("{}: {}", PLACE_FALLBACK, e)))
    }

    async fn fetch_state(&self) -> Result<Snapshot, ClientError> {
        let response = self.client.get(self.url(STATE_PATH)).send().await?;
        if !response.status().is_success() {
            return Err(rejection(response, STATE_FALLBACK).await);
        }
        response
            .json::<Snapshot>()
            .await
            .map_err(|e| ClientError::Request(format!("{}: {}", STATE_FALLBACK, e)))
    }

    async fn restart(&self) -> Result<(), ClientError> {
        let response = self.client.post(self.url(RESTART_PATH)).send().await?;
        if !response.status().is_success() {
            return Err(rejection(response, RESTART_FALLBACK).await);
        }
        Ok(())
    }
}
