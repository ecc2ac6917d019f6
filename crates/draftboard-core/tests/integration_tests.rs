// Integration tests for the draft service client and flow controllers.
//
// A small axum app stands in for the draft service on 127.0.0.1:0, so the
// real `HttpDraftClient` (URL building, status handling, JSON decoding) and
// the controllers on top of it run exactly as they do in the binary.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use draftboard_core::api::{
    ApiError, DraftApi, DraftStatus, HttpDraftClient, PlayerId, StartDraftRequest,
};
use draftboard_core::board::BoardController;
use draftboard_core::resource::{AsyncResource, ResourceState};
use draftboard_core::setup::{SetupController, START_FAILURE};
use draftboard_core::view::{board_rows, PLACEHOLDER};

// ===========================================================================
// Test server
// ===========================================================================

#[derive(Clone, Default)]
struct ServiceState {
    /// "METHOD path?query" of every request, in arrival order.
    log: Arc<Mutex<Vec<String>>>,
    /// Bodies posted to /draft/start.
    starts: Arc<Mutex<Vec<StartDraftRequest>>>,
}

impl ServiceState {
    fn record(&self, line: impl Into<String>) {
        self.log.lock().expect("log lock").push(line.into());
    }

    fn count(&self, line: &str) -> usize {
        self.log
            .lock()
            .expect("log lock")
            .iter()
            .filter(|l| *l == line)
            .count()
    }
}

#[derive(Deserialize)]
struct TeamsQuery {
    year: u32,
}

fn board_body() -> Value {
    json!({
        "year": 2024,
        "current_index": 3,
        "board": [
            {"overall": 1, "round": 1, "pick": 1, "team": "A", "player_id": "p1"},
            {"overall": 2, "round": 1, "pick": 2, "team": "B", "player_id": null}
        ]
    })
}

async fn years(State(state): State<ServiceState>) -> Json<Value> {
    state.record("GET /draft/years");
    Json(json!([2023, 2024]))
}

async fn teams(State(state): State<ServiceState>, Query(query): Query<TeamsQuery>) -> Response {
    state.record(format!("GET /draft/teams?year={}", query.year));
    match query.year {
        2023 => Json(json!(["KC", "SF"])).into_response(),
        2024 => Json(json!(["NE"])).into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({"detail": "no teams"}))).into_response(),
    }
}

async fn start(
    State(state): State<ServiceState>,
    Json(request): Json<StartDraftRequest>,
) -> Response {
    state.record("POST /draft/start");
    let rejected = request.year == 2024;
    state.starts.lock().expect("starts lock").push(request);
    if rejected {
        return (StatusCode::BAD_REQUEST, Json(json!({}))).into_response();
    }
    Json(json!({"draft_id": "d-1"})).into_response()
}

async fn board(State(state): State<ServiceState>, Path(id): Path<String>) -> Response {
    state.record(format!("GET /draft/{id}/board"));
    match id.as_str() {
        "missing" => (StatusCode::NOT_FOUND, Json(json!({}))).into_response(),
        "garbled" => (
            [(header::CONTENT_TYPE, "application/json")],
            r#"{"year": 2024, "current_index": "#,
        )
            .into_response(),
        _ => Json(board_body()).into_response(),
    }
}

async fn status(State(state): State<ServiceState>, Path(id): Path<String>) -> Json<Value> {
    state.record(format!("GET /draft/{id}"));
    Json(json!({"round": 1, "pick": 4, "status": "waiting_for_user", "index": 3}))
}

async fn advance(State(state): State<ServiceState>, Path(id): Path<String>) -> Json<Value> {
    state.record(format!("POST /draft/{id}/advance"));
    Json(json!({"round": 1, "pick": 4, "status": "waiting_for_user"}))
}

async fn pick(
    State(state): State<ServiceState>,
    Path((id, player)): Path<(String, String)>,
) -> Json<Value> {
    state.record(format!("POST /draft/{id}/pick/{player}"));
    Json(json!({"round": 1, "pick": 5, "status": "simulating"}))
}

async fn available(State(state): State<ServiceState>, Path(id): Path<String>) -> Json<Value> {
    state.record(format!("GET /draft/{id}/available"));
    Json(json!([
        {"player_id": 41, "name": "Sam Hart", "position": "QB", "height": 75, "weight": 220, "overall_rank": 1},
        {"player_id": 42, "name": "Ray Cole", "position": "WR", "overall_rank": 2}
    ]))
}

async fn spawn_service() -> (String, ServiceState) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let state = ServiceState::default();
    let app = Router::new()
        .route("/draft/years", get(years))
        .route("/draft/teams", get(teams))
        .route("/draft/start", post(start))
        .route("/draft/:id", get(status))
        .route("/draft/:id/board", get(board))
        .route("/draft/:id/advance", post(advance))
        .route("/draft/:id/pick/:player", post(pick))
        .route("/draft/:id/available", get(available))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), state)
}

/// Wait until the slot is no longer loading and return its state.
async fn settled<T>(resource: &AsyncResource<T>) -> ResourceState<T>
where
    T: Clone + Send + Sync + 'static,
{
    let mut rx = resource.subscribe();
    let state = tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|s| !s.is_loading()))
        .await
        .expect("resource did not settle")
        .expect("resource dropped");
    state.clone()
}

// ===========================================================================
// HttpDraftClient
// ===========================================================================

#[tokio::test]
async fn client_lists_years_and_teams() {
    let (url, service) = spawn_service().await;
    let client = HttpDraftClient::new(&url).unwrap();

    assert_eq!(client.list_years().await.unwrap(), vec![2023, 2024]);
    assert_eq!(client.list_teams(2023).await.unwrap(), vec!["KC", "SF"]);
    assert_eq!(service.count("GET /draft/teams?year=2023"), 1);
}

#[tokio::test]
async fn client_non_2xx_is_http_error() {
    let (url, _service) = spawn_service().await;
    let client = HttpDraftClient::new(&url).unwrap();

    let err = client.list_teams(1999).await.unwrap_err();
    assert!(matches!(err, ApiError::Http { status: 404, .. }), "{err:?}");
    assert!(err.url().ends_with("/draft/teams?year=1999"));

    let err = client.get_board("missing").await.unwrap_err();
    assert!(matches!(err, ApiError::Http { status: 404, .. }), "{err:?}");
}

#[tokio::test]
async fn client_malformed_body_is_decode_error() {
    let (url, _service) = spawn_service().await;
    let client = HttpDraftClient::new(&url).unwrap();

    let err = client.get_board("garbled").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode { .. }), "{err:?}");
}

#[tokio::test]
async fn client_unreachable_service_is_network_error() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpDraftClient::new(&format!("http://{addr}")).unwrap();
    let err = client.list_years().await.unwrap_err();
    assert!(matches!(err, ApiError::Network { .. }), "{err:?}");
}

#[tokio::test]
async fn client_start_posts_selection_and_keeps_handle() {
    let (url, service) = spawn_service().await;
    let client = HttpDraftClient::new(&url).unwrap();

    let request = StartDraftRequest {
        year: 2023,
        user_team: "KC".into(),
    };
    let draft = client.start_draft(&request).await.unwrap();

    assert_eq!(draft.id, "d-1");
    assert_eq!(draft.year, 2023);
    assert!(draft.board.is_empty());
    assert_eq!(*service.starts.lock().unwrap(), vec![request]);
    assert_eq!(service.count("GET /draft/d-1/board"), 0);
}

#[tokio::test]
async fn client_board_preserves_order_and_null_player() {
    let (url, _service) = spawn_service().await;
    let client = HttpDraftClient::new(&url).unwrap();

    let draft = client.get_board("d-1").await.unwrap();
    assert_eq!(draft.id, "d-1");
    assert_eq!(draft.current_index, 3);

    let rows = board_rows(&draft);
    let cells: Vec<(u32, &str, &str)> = rows
        .iter()
        .map(|r| (r.overall, r.team.as_str(), r.player.as_str()))
        .collect();
    assert_eq!(cells, vec![(1, "A", "p1"), (2, "B", PLACEHOLDER)]);
}

#[tokio::test]
async fn client_draft_lifecycle_endpoints() {
    let (url, service) = spawn_service().await;
    let client = HttpDraftClient::new(&url).unwrap();

    let progress = client.draft_status("d-1").await.unwrap();
    assert_eq!(progress.status, DraftStatus::WaitingForUser);
    assert_eq!(progress.index, Some(3));

    let progress = client.advance("d-1").await.unwrap();
    assert_eq!(progress.index, None);

    let progress = client.pick_player("d-1", &PlayerId::from(41)).await.unwrap();
    assert_eq!(progress.status, DraftStatus::Simulating);
    assert_eq!(service.count("POST /draft/d-1/pick/41"), 1);

    let players = client.available_players("d-1").await.unwrap();
    assert_eq!(players.len(), 2);
    assert_eq!(players[0].player_id, PlayerId::from(41));
    assert_eq!(players[0].position.as_deref(), Some("QB"));
}

// ===========================================================================
// Controllers over HTTP
// ===========================================================================

#[tokio::test]
async fn setup_flow_end_to_end() {
    let (url, service) = spawn_service().await;
    let api = Arc::new(HttpDraftClient::new(&url).unwrap());
    let setup = SetupController::new(api);

    assert_eq!(settled(setup.years()).await, ResourceState::Success(vec![2023, 2024]));

    setup.set_year(Some(2023));
    assert_eq!(
        settled(setup.teams()).await,
        ResourceState::Success(vec!["KC".to_string(), "SF".to_string()])
    );
    assert!(setup.set_team(Some("SF".into())));

    assert!(setup.start_draft());
    let draft = settled(setup.start()).await;
    assert_eq!(draft.data().map(|d| d.id.as_str()), Some("d-1"));
    assert_eq!(service.count("GET /draft/years"), 1);
    assert_eq!(service.count("POST /draft/start"), 1);
}

#[tokio::test]
async fn setup_start_rejected_with_empty_body() {
    let (url, service) = spawn_service().await;
    let api = Arc::new(HttpDraftClient::new(&url).unwrap());
    let setup = SetupController::new(api);
    settled(setup.years()).await;

    setup.set_year(Some(2024));
    settled(setup.teams()).await;
    assert!(setup.set_team(Some("NE".into())));

    assert!(setup.start_draft());
    assert_eq!(
        settled(setup.start()).await,
        ResourceState::Error(START_FAILURE.into())
    );
    assert!(setup.can_start());
    assert_eq!(service.count("POST /draft/start"), 1);
    assert_eq!(service.count("GET /draft/d-1/board"), 0);
}

#[tokio::test]
async fn board_flow_end_to_end() {
    let (url, service) = spawn_service().await;
    let api = Arc::new(HttpDraftClient::new(&url).unwrap());
    let board = BoardController::new(api);

    assert!(board.activate("d-1"));
    let state = settled(board.board()).await;
    assert_eq!(state.data().map(|d| d.board.len()), Some(2));
    let players = settled(board.available()).await;
    assert_eq!(players.data().map(Vec::len), Some(2));

    assert!(board.advance());
    let progress = settled(board.progress()).await;
    assert_eq!(progress.data().map(|p| p.status), Some(DraftStatus::WaitingForUser));
    settled(board.board()).await;
    settled(board.available()).await;
    assert_eq!(service.count("GET /draft/d-1/board"), 2);
    assert_eq!(service.count("GET /draft/d-1/available"), 2);

    board.teardown();
    assert_eq!(board.board().state(), ResourceState::Idle);
}

#[tokio::test]
async fn board_flow_missing_draft_shows_error() {
    let (url, _service) = spawn_service().await;
    let api = Arc::new(HttpDraftClient::new(&url).unwrap());
    let board = BoardController::new(api);

    board.activate("missing");
    assert_eq!(
        settled(board.board()).await,
        ResourceState::Error("Failed to load draft board".into())
    );
}
