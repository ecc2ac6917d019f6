// Terminal host: routes, controller lifecycle, input dispatch, rendering.
//
// `App` owns the controllers and the current route. Each render tick copies
// controller snapshots into `ViewState`, which is all the widgets ever read.
// Navigation is the only place controllers are created or torn down.

pub mod input;
pub mod layout;
pub mod widgets;

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::Frame;
use tracing::{debug, info};

use draftboard_core::api::{DraftApi, DraftId, PlayerId, Team, Year};
use draftboard_core::board::{BoardController, BoardFlowSnapshot};
use draftboard_core::route::Route;
use draftboard_core::setup::{SetupController, SetupSnapshot};
use draftboard_core::view::SetupView;

use layout::build_layout;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Which setup control receives list navigation and Enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SetupFocus {
    #[default]
    Year,
    Team,
    Start,
}

impl SetupFocus {
    pub fn next(self) -> Self {
        match self {
            SetupFocus::Year => SetupFocus::Team,
            SetupFocus::Team => SetupFocus::Start,
            SetupFocus::Start => SetupFocus::Year,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            SetupFocus::Year => SetupFocus::Start,
            SetupFocus::Team => SetupFocus::Year,
            SetupFocus::Start => SetupFocus::Team,
        }
    }
}

/// Everything the widgets draw from. Refreshed from the controllers on every
/// render tick; cursors and focus are local to the terminal.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub route: Route,
    pub setup: Option<SetupSnapshot>,
    pub board: Option<BoardFlowSnapshot>,
    pub focus: SetupFocus,
    pub year_cursor: usize,
    pub team_cursor: usize,
    pub player_cursor: usize,
}

impl ViewState {
    /// Setup screen projection, if the setup flow is active.
    pub fn setup_view(&self) -> Option<SetupView> {
        self.setup.as_ref().map(SetupView::from_snapshot)
    }

    /// Id of the draft created on the setup screen, once it exists.
    pub fn started_draft_id(&self) -> Option<DraftId> {
        self.setup
            .as_ref()
            .and_then(|s| s.start.data())
            .map(|draft| draft.id.clone())
    }

    /// Available player under the cursor on the board screen.
    pub fn selected_player(&self) -> Option<PlayerId> {
        self.board
            .as_ref()
            .and_then(|b| b.available.data())
            .and_then(|players| players.get(self.player_cursor))
            .map(|p| p.player_id.clone())
    }

    /// Keep every cursor inside its list.
    fn clamp_cursors(&mut self) {
        if let Some(view) = self.setup_view() {
            self.year_cursor = clamp(self.year_cursor, view.year.options.len());
            self.team_cursor = clamp(self.team_cursor, view.team.options.len());
        }
        let players = self
            .board
            .as_ref()
            .and_then(|b| b.available.data())
            .map_or(0, Vec::len);
        self.player_cursor = clamp(self.player_cursor, players);
    }
}

fn clamp(cursor: usize, len: usize) -> usize {
    cursor.min(len.saturating_sub(1))
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// Something the user asked for that the controllers or the router carry out.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    SelectYear(Option<Year>),
    SelectTeam(Option<Team>),
    StartDraft,
    Navigate(Route),
    Reload,
    Advance,
    CheckStatus,
    Pick(PlayerId),
    ShowPlayer(PlayerId),
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    api: Arc<dyn DraftApi>,
    setup: Option<SetupController>,
    board: BoardController,
    pub view: ViewState,
}

impl App {
    /// Create the app and enter `route`. Must be called within a tokio runtime.
    pub fn new(api: Arc<dyn DraftApi>, route: Route) -> Self {
        let board = BoardController::new(Arc::clone(&api));
        let mut app = Self {
            api,
            setup: None,
            board,
            view: ViewState::default(),
        };
        app.enter(route);
        app.refresh();
        app
    }

    pub fn route(&self) -> &Route {
        &self.view.route
    }

    /// Move to `route`, tearing down the flow being left.
    pub fn navigate(&mut self, route: Route) {
        if route == self.view.route {
            return;
        }
        info!(from = %self.view.route, to = %route, "Navigating");
        match (&self.view.route, &route) {
            (Route::Board { .. }, Route::Board { draft_id }) => {
                self.board.activate(draft_id.clone());
                self.view.player_cursor = 0;
                self.view.route = route;
            }
            _ => {
                self.leave();
                self.enter(route);
            }
        }
        self.refresh();
    }

    fn enter(&mut self, route: Route) {
        match &route {
            Route::Setup => {
                self.setup = Some(SetupController::new(Arc::clone(&self.api)));
                self.view.focus = SetupFocus::Year;
                self.view.year_cursor = 0;
                self.view.team_cursor = 0;
            }
            Route::Board { draft_id } => {
                self.board.activate(draft_id.clone());
                self.view.player_cursor = 0;
            }
        }
        self.view.route = route;
    }

    fn leave(&mut self) {
        match self.view.route {
            Route::Setup => {
                if let Some(setup) = self.setup.take() {
                    setup.teardown();
                }
            }
            Route::Board { .. } => self.board.teardown(),
        }
    }

    /// Pull fresh snapshots from the active controllers.
    pub fn refresh(&mut self) {
        self.view.setup = self.setup.as_ref().map(SetupController::snapshot);
        self.view.board = match self.view.route {
            Route::Board { .. } => Some(self.board.snapshot()),
            Route::Setup => None,
        };
        self.view.clamp_cursors();
    }

    /// Carry out an action. Returns `false` when the app should exit.
    pub fn dispatch(&mut self, action: Action) -> bool {
        debug!(?action, "dispatch");
        match action {
            Action::Quit => return false,
            Action::SelectYear(year) => {
                if let Some(setup) = &self.setup {
                    setup.set_year(year);
                    self.view.team_cursor = 0;
                }
            }
            Action::SelectTeam(team) => {
                if let Some(setup) = &self.setup {
                    setup.set_team(team);
                }
            }
            Action::StartDraft => {
                if let Some(setup) = &self.setup {
                    setup.start_draft();
                }
            }
            Action::Navigate(route) => self.navigate(route),
            Action::Reload => {
                self.board.reload();
                self.board.load_available();
            }
            Action::Advance => {
                self.board.advance();
            }
            Action::CheckStatus => {
                self.board.check_status();
            }
            Action::Pick(player_id) => {
                self.board.pick_player(player_id);
            }
            Action::ShowPlayer(player_id) => {
                self.board.show_player(player_id);
            }
        }
        self.refresh();
        true
    }

    /// Leave whatever flow is active.
    pub fn shutdown(&mut self) {
        self.leave();
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete frame for the current route.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    match state.route {
        Route::Setup => widgets::setup::render(frame, layout.body, state),
        Route::Board { .. } => {
            let board_layout = layout::build_board_layout(layout.body);
            widgets::board::render(frame, board_layout.board, state);
            widgets::available::render(frame, board_layout.available, state);
            widgets::player::render(frame, board_layout.player, state);
        }
    }
    widgets::help_bar::render(frame, layout.help_bar, state);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop until the user quits.
///
/// Initializes the terminal, installs a panic hook that restores it, then
/// selects over keyboard input and a ~30 fps render tick.
pub async fn run(api: Arc<dyn DraftApi>, route: Route) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut app = App::new(api, route);
    let mut event_stream = EventStream::new();
    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result = loop {
        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(action) = input::handle_key(key_event, &mut app.view) {
                            if !app.dispatch(action) {
                                break Ok(());
                            }
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => break Err(anyhow::Error::from(e).context("terminal input failed")),
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                app.refresh();
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &app.view)) {
                    break Err(anyhow::Error::from(e).context("failed to draw frame"));
                }
            }
        }
    };

    app.shutdown();
    ratatui::restore();
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use draftboard_core::resource::ResourceStatus;
    use draftboard_core::testing::{settle, FakeDraftApi, Request};
    use serde_json::json;

    fn board_json() -> serde_json::Value {
        json!({
            "year": 2024,
            "current_index": 1,
            "board": [
                {"overall": 1, "round": 1, "pick": 1, "team": "A", "player_id": "p1"},
                {"overall": 2, "round": 1, "pick": 2, "team": "B", "player_id": null}
            ]
        })
    }

    async fn app_at(route: Route) -> (Arc<FakeDraftApi>, App) {
        let fake = Arc::new(FakeDraftApi::new());
        let app = App::new(fake.clone(), route);
        settle().await;
        (fake, app)
    }

    #[test]
    fn focus_cycles_both_ways() {
        assert_eq!(SetupFocus::Year.next(), SetupFocus::Team);
        assert_eq!(SetupFocus::Start.next(), SetupFocus::Year);
        assert_eq!(SetupFocus::Year.prev(), SetupFocus::Start);
        assert_eq!(SetupFocus::Team.prev(), SetupFocus::Year);
    }

    #[tokio::test]
    async fn setup_route_starts_setup_flow() {
        let (fake, app) = app_at(Route::Setup).await;
        assert_eq!(fake.requests(), vec![Request::ListYears]);
        assert!(app.view.setup.is_some());
        assert!(app.view.board.is_none());
    }

    #[tokio::test]
    async fn board_route_activates_board() {
        let (fake, app) = app_at(Route::board("d-1")).await;
        assert_eq!(
            fake.requests(),
            vec![
                Request::GetBoard("d-1".into()),
                Request::AvailablePlayers("d-1".into())
            ]
        );
        assert!(app.view.setup.is_none());
        assert_eq!(
            app.view.board.as_ref().map(|b| b.board.status()),
            Some(ResourceStatus::Loading)
        );
    }

    #[tokio::test]
    async fn leaving_setup_discards_its_results() {
        let (fake, mut app) = app_at(Route::Setup).await;
        app.navigate(Route::board("d-1"));
        fake.resolve_ok(&Request::ListYears, json!([2023]));
        settle().await;
        app.refresh();
        assert!(app.view.setup.is_none());

        app.navigate(Route::Setup);
        settle().await;
        assert_eq!(fake.count(&Request::ListYears), 2);
        assert_eq!(
            app.view.setup.as_ref().map(|s| s.years.status()),
            Some(ResourceStatus::Loading)
        );
    }

    #[tokio::test]
    async fn leaving_board_before_load_never_shows_it() {
        let (fake, mut app) = app_at(Route::board("d-1")).await;
        app.navigate(Route::Setup);
        app.navigate(Route::board("d-2"));
        settle().await;

        fake.resolve_ok(&Request::GetBoard("d-1".into()), board_json());
        settle().await;
        app.refresh();
        assert_eq!(
            app.view.board.as_ref().map(|b| b.board.status()),
            Some(ResourceStatus::Loading)
        );

        fake.resolve_ok(&Request::GetBoard("d-2".into()), board_json());
        settle().await;
        app.refresh();
        let board = app.view.board.as_ref().and_then(|b| b.board.data().cloned());
        assert_eq!(board.map(|d| d.id), Some("d-2".to_string()));
    }

    #[tokio::test]
    async fn board_to_board_switches_draft() {
        let (fake, mut app) = app_at(Route::board("d-1")).await;
        app.navigate(Route::board("d-2"));
        settle().await;
        assert_eq!(fake.count(&Request::GetBoard("d-2".into())), 1);
        assert_eq!(app.route(), &Route::board("d-2"));
    }

    #[tokio::test]
    async fn navigating_to_current_route_is_noop() {
        let (fake, mut app) = app_at(Route::Setup).await;
        app.navigate(Route::Setup);
        settle().await;
        assert_eq!(fake.count(&Request::ListYears), 1);
    }

    #[tokio::test]
    async fn dispatch_drives_setup_controller() {
        let (fake, mut app) = app_at(Route::Setup).await;
        fake.resolve_ok(&Request::ListYears, json!([2023, 2024]));
        settle().await;

        assert!(app.dispatch(Action::SelectYear(Some(2024))));
        settle().await;
        assert_eq!(fake.count(&Request::ListTeams(2024)), 1);
        fake.resolve_ok(&Request::ListTeams(2024), json!(["NE"]));
        settle().await;

        app.dispatch(Action::SelectTeam(Some("NE".into())));
        app.dispatch(Action::StartDraft);
        settle().await;
        fake.resolve_ok(
            &Request::StartDraft(draftboard_core::api::StartDraftRequest {
                year: 2024,
                user_team: "NE".into(),
            }),
            json!({"draft_id": "d-9"}),
        );
        settle().await;
        app.refresh();

        assert_eq!(app.view.started_draft_id(), Some("d-9".to_string()));
        assert_eq!(app.route(), &Route::Setup);
    }

    #[tokio::test]
    async fn quit_stops_the_app() {
        let (_fake, mut app) = app_at(Route::Setup).await;
        assert!(!app.dispatch(Action::Quit));
    }

    #[tokio::test]
    async fn player_cursor_is_clamped_to_list() {
        let (fake, mut app) = app_at(Route::board("d-1")).await;
        app.view.player_cursor = 10;
        fake.resolve_ok(
            &Request::AvailablePlayers("d-1".into()),
            json!([{"player_id": 1, "name": "A"}, {"player_id": 2, "name": "B"}]),
        );
        settle().await;
        app.refresh();
        assert_eq!(app.view.player_cursor, 1);
        assert_eq!(app.view.selected_player(), Some(PlayerId::from(2)));
    }

    #[test]
    fn render_frame_does_not_panic_on_defaults() {
        let backend = ratatui::backend::TestBackend::new(100, 30);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render_frame(frame, &state))
            .unwrap();

        let state = ViewState {
            route: Route::board("d-1"),
            ..ViewState::default()
        };
        terminal
            .draw(|frame| render_frame(frame, &state))
            .unwrap();
    }
}
