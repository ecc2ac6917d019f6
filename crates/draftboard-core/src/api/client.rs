// reqwest-backed draft service client.
//
// Every response goes through `decode`: non-2xx statuses fail before the body
// is looked at, and the body is parsed in one shot so a malformed payload
// never yields partial data.

use async_trait::async_trait;
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::types::{
    AvailablePlayer, BoardSnapshot, Draft, DraftProgress, PlayerDetail, PlayerId,
    StartDraftRequest, StartDraftResponse, Team, Year,
};
use super::{ApiError, DraftApi};
use crate::config::{Config, ConfigError};

// ---------------------------------------------------------------------------
// HttpDraftClient
// ---------------------------------------------------------------------------

/// Client for the draft service rooted at a fixed base URL.
///
/// No request timeout is configured: a hung request keeps its resource in
/// `Loading` until the user supersedes it.
#[derive(Debug, Clone)]
pub struct HttpDraftClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpDraftClient {
    /// Create a client for the given base URL (e.g. `http://localhost:8000`).
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let base_url = parse_base_url(base_url)?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    /// Build a client from the application config.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::new(&config.service.base_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL. Segments are percent-encoded, so
    /// draft ids can never escape their position in the path.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<&StartDraftRequest>,
    ) -> Result<T, ApiError> {
        let url_str = url.to_string();
        debug!(%method, url = %url_str, "draft service request");

        let mut builder = self.http.request(method, url);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| ApiError::Network {
            url: url_str.clone(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                url: url_str,
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| ApiError::Network {
            url: url_str.clone(),
            message: e.to_string(),
        })?;
        decode(&url_str, &bytes)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        self.request(Method::GET, url, None).await
    }
}

#[async_trait]
impl DraftApi for HttpDraftClient {
    async fn list_years(&self) -> Result<Vec<Year>, ApiError> {
        self.get(self.endpoint(&["draft", "years"])).await
    }

    async fn list_teams(&self, year: Year) -> Result<Vec<Team>, ApiError> {
        let mut url = self.endpoint(&["draft", "teams"]);
        url.query_pairs_mut().append_pair("year", &year.to_string());
        self.get(url).await
    }

    async fn start_draft(&self, request: &StartDraftRequest) -> Result<Draft, ApiError> {
        let url = self.endpoint(&["draft", "start"]);
        let response: StartDraftResponse = self.request(Method::POST, url, Some(request)).await?;
        // A 2xx means the draft exists, whatever shape the body takes.
        Ok(response.into_draft(request.year))
    }

    async fn get_board(&self, draft_id: &str) -> Result<Draft, ApiError> {
        let snapshot: BoardSnapshot = self.get(self.endpoint(&["draft", draft_id, "board"])).await?;
        Ok(snapshot.into_draft(draft_id.to_string()))
    }

    async fn draft_status(&self, draft_id: &str) -> Result<DraftProgress, ApiError> {
        self.get(self.endpoint(&["draft", draft_id])).await
    }

    async fn advance(&self, draft_id: &str) -> Result<DraftProgress, ApiError> {
        let url = self.endpoint(&["draft", draft_id, "advance"]);
        self.request(Method::POST, url, None).await
    }

    async fn pick_player(
        &self,
        draft_id: &str,
        player_id: &PlayerId,
    ) -> Result<DraftProgress, ApiError> {
        let player = player_id.to_string();
        let url = self.endpoint(&["draft", draft_id, "pick", &player]);
        self.request(Method::POST, url, None).await
    }

    async fn available_players(&self, draft_id: &str) -> Result<Vec<AvailablePlayer>, ApiError> {
        self.get(self.endpoint(&["draft", draft_id, "available"])).await
    }

    async fn player(&self, player_id: &PlayerId) -> Result<PlayerDetail, ApiError> {
        let player = player_id.to_string();
        self.get(self.endpoint(&["draft", "player", &player])).await
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse and normalize a service base URL. Trailing slashes are dropped so
/// endpoint paths join cleanly.
pub(crate) fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|e| ConfigError::ValidationError {
        field: "service.base_url".into(),
        message: format!("invalid URL `{raw}`: {e}"),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::ValidationError {
            field: "service.base_url".into(),
            message: format!("scheme must be http or https, got `{}`", url.scheme()),
        });
    }
    if url.cannot_be_a_base() {
        return Err(ConfigError::ValidationError {
            field: "service.base_url".into(),
            message: format!("`{raw}` cannot carry a path"),
        });
    }
    Ok(url)
}

/// Parse a complete response body.
pub(crate) fn decode<T: DeserializeOwned>(url: &str, bytes: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(bytes).map_err(|source| ApiError::Decode {
        url: url.to_string(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
