// Draft service interface: the capability controllers are built on.
//
// Controllers never talk HTTP directly. They hold an `Arc<dyn DraftApi>`, which
// is `HttpDraftClient` in the binary and a scripted fake in tests.

pub mod client;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;

pub use client::HttpDraftClient;
pub use types::{
    AvailablePlayer, BoardSnapshot, Draft, DraftId, DraftProgress, DraftStatus, Pick,
    PlayerDetail, PlayerId, StartDraftRequest, StartDraftResponse, Team, Year,
};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Why a request to the draft service failed.
///
/// The variants are kept apart for logging only; the controllers collapse all
/// of them into one user-facing message per resource.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not complete (connection refused, reset, ...).
    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    /// The service answered with a non-2xx status. The body is ignored.
    #[error("{url} returned HTTP {status}")]
    Http { url: String, status: u16 },

    /// The body was not the JSON shape we expected.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },
}

impl ApiError {
    /// URL of the request that failed.
    pub fn url(&self) -> &str {
        match self {
            ApiError::Network { url, .. } => url,
            ApiError::Http { url, .. } => url,
            ApiError::Decode { url, .. } => url,
        }
    }
}

// ---------------------------------------------------------------------------
// DraftApi
// ---------------------------------------------------------------------------

/// Operations exposed by the draft service.
#[async_trait]
pub trait DraftApi: Send + Sync {
    /// `GET /draft/years`
    async fn list_years(&self) -> Result<Vec<Year>, ApiError>;

    /// `GET /draft/teams?year={year}`
    async fn list_teams(&self, year: Year) -> Result<Vec<Team>, ApiError>;

    /// `POST /draft/start`
    async fn start_draft(&self, request: &StartDraftRequest) -> Result<Draft, ApiError>;

    /// `GET /draft/{id}/board`
    async fn get_board(&self, draft_id: &str) -> Result<Draft, ApiError>;

    /// `GET /draft/{id}`
    async fn draft_status(&self, draft_id: &str) -> Result<DraftProgress, ApiError>;

    /// `POST /draft/{id}/advance`: simulate picks until the user is on the
    /// clock or the draft completes.
    async fn advance(&self, draft_id: &str) -> Result<DraftProgress, ApiError>;

    /// `POST /draft/{id}/pick/{player_id}`
    async fn pick_player(
        &self,
        draft_id: &str,
        player_id: &PlayerId,
    ) -> Result<DraftProgress, ApiError>;

    /// `GET /draft/{id}/available`
    async fn available_players(&self, draft_id: &str) -> Result<Vec<AvailablePlayer>, ApiError>;

    /// `GET /draft/player/{player_id}`
    async fn player(&self, player_id: &PlayerId) -> Result<PlayerDetail, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_url() {
        let err = ApiError::Http {
            url: "http://localhost:8000/draft/start".into(),
            status: 500,
        };
        assert_eq!(err.to_string(), "http://localhost:8000/draft/start returned HTTP 500");
        assert_eq!(err.url(), "http://localhost:8000/draft/start");

        let err = ApiError::Network {
            url: "http://x/draft/years".into(),
            message: "connection refused".into(),
        };
        assert!(err.to_string().contains("connection refused"));
    }
}
