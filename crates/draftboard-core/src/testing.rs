// Scriptable in-memory draft service for tests.
//
// Every call is recorded and parked until the test answers it with a JSON
// value or an error, so tests decide exactly when and in which order
// responses arrive. Canned responses can be registered up front for calls the
// test does not want to drive by hand.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::oneshot;

use crate::api::{
    ApiError, AvailablePlayer, BoardSnapshot, Draft, DraftApi, DraftId, DraftProgress,
    PlayerDetail, PlayerId, StartDraftRequest, StartDraftResponse, Team, Year,
};

/// A request as seen by the fake service.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    ListYears,
    ListTeams(Year),
    StartDraft(StartDraftRequest),
    GetBoard(DraftId),
    DraftStatus(DraftId),
    Advance(DraftId),
    PickPlayer(DraftId, PlayerId),
    AvailablePlayers(DraftId),
    Player(PlayerId),
}

impl Request {
    /// Path the real client would hit, used as the error URL.
    pub fn path(&self) -> String {
        match self {
            Request::ListYears => "/draft/years".into(),
            Request::ListTeams(year) => format!("/draft/teams?year={year}"),
            Request::StartDraft(_) => "/draft/start".into(),
            Request::GetBoard(id) => format!("/draft/{id}/board"),
            Request::DraftStatus(id) => format!("/draft/{id}"),
            Request::Advance(id) => format!("/draft/{id}/advance"),
            Request::PickPlayer(id, player) => format!("/draft/{id}/pick/{player}"),
            Request::AvailablePlayers(id) => format!("/draft/{id}/available"),
            Request::Player(player) => format!("/draft/player/{player}"),
        }
    }
}

type Reply = Result<Value, ApiError>;

struct Pending {
    request: Request,
    responder: oneshot::Sender<Reply>,
}

#[derive(Default)]
struct FakeState {
    requests: Vec<Request>,
    pending: VecDeque<Pending>,
    canned: Vec<(Request, Value)>,
}

/// In-memory [`DraftApi`] driven by the test.
#[derive(Default)]
pub struct FakeDraftApi {
    state: Mutex<FakeState>,
}

impl FakeDraftApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().expect("fake draft api mutex poisoned")
    }

    /// Answer every future `request` immediately with `value`.
    pub fn respond_with(&self, request: Request, value: Value) {
        self.lock().canned.push((request, value));
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<Request> {
        self.lock().requests.clone()
    }

    /// How many times `request` has been received.
    pub fn count(&self, request: &Request) -> usize {
        self.lock().requests.iter().filter(|r| *r == request).count()
    }

    /// Requests still waiting for an answer, oldest first.
    pub fn pending(&self) -> Vec<Request> {
        self.lock().pending.iter().map(|p| p.request.clone()).collect()
    }

    /// Answer the oldest pending `request`. Returns `false` if none is parked.
    pub fn resolve(&self, request: &Request, reply: Reply) -> bool {
        let pending = {
            let mut state = self.lock();
            let Some(pos) = state.pending.iter().position(|p| p.request == *request) else {
                return false;
            };
            state.pending.remove(pos)
        };
        match pending {
            Some(p) => {
                let _ = p.responder.send(reply);
                true
            }
            None => false,
        }
    }

    /// Answer the oldest pending `request` with a JSON body.
    pub fn resolve_ok(&self, request: &Request, value: Value) -> bool {
        self.resolve(request, Ok(value))
    }

    /// Answer the oldest pending `request` with an HTTP failure.
    pub fn resolve_status(&self, request: &Request, status: u16) -> bool {
        let url = request.path();
        self.resolve(request, Err(ApiError::Http { url, status }))
    }

    fn register(&self, request: Request) -> oneshot::Receiver<Reply> {
        let (tx, rx) = oneshot::channel();
        let mut state = self.lock();
        state.requests.push(request.clone());
        let canned = state
            .canned
            .iter()
            .find(|(r, _)| *r == request)
            .map(|(_, v)| v.clone());
        match canned {
            Some(value) => {
                let _ = tx.send(Ok(value));
            }
            None => state.pending.push_back(Pending {
                request,
                responder: tx,
            }),
        }
        rx
    }

    async fn call<T: DeserializeOwned>(&self, request: Request) -> Result<T, ApiError> {
        let url = request.path();
        let rx = self.register(request);
        let value = match rx.await {
            Ok(reply) => reply?,
            Err(_) => {
                return Err(ApiError::Network {
                    url,
                    message: "fake responder dropped".into(),
                })
            }
        };
        serde_json::from_value(value).map_err(|source| ApiError::Decode { url, source })
    }
}

#[async_trait]
impl DraftApi for FakeDraftApi {
    async fn list_years(&self) -> Result<Vec<Year>, ApiError> {
        self.call(Request::ListYears).await
    }

    async fn list_teams(&self, year: Year) -> Result<Vec<Team>, ApiError> {
        self.call(Request::ListTeams(year)).await
    }

    async fn start_draft(&self, request: &StartDraftRequest) -> Result<Draft, ApiError> {
        let response: StartDraftResponse =
            self.call(Request::StartDraft(request.clone())).await?;
        Ok(response.into_draft(request.year))
    }

    async fn get_board(&self, draft_id: &str) -> Result<Draft, ApiError> {
        let snapshot: BoardSnapshot = self.call(Request::GetBoard(draft_id.to_string())).await?;
        Ok(snapshot.into_draft(draft_id.to_string()))
    }

    async fn draft_status(&self, draft_id: &str) -> Result<DraftProgress, ApiError> {
        self.call(Request::DraftStatus(draft_id.to_string())).await
    }

    async fn advance(&self, draft_id: &str) -> Result<DraftProgress, ApiError> {
        self.call(Request::Advance(draft_id.to_string())).await
    }

    async fn pick_player(
        &self,
        draft_id: &str,
        player_id: &PlayerId,
    ) -> Result<DraftProgress, ApiError> {
        self.call(Request::PickPlayer(draft_id.to_string(), player_id.clone()))
            .await
    }

    async fn available_players(&self, draft_id: &str) -> Result<Vec<AvailablePlayer>, ApiError> {
        self.call(Request::AvailablePlayers(draft_id.to_string())).await
    }

    async fn player(&self, player_id: &PlayerId) -> Result<PlayerDetail, ApiError> {
        self.call(Request::Player(player_id.clone())).await
    }
}

/// Let spawned tasks run until they block again.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
