// Draft setup flow: year/team selection and draft start.
//
// `set_year` is the single mutation point for the year -> teams cascade: it
// clears the team, and either starts a teams load for the new year or resets
// the teams slot when the year is cleared. Superseded teams loads are
// discarded by the slot's token, so a slow response for an old year can never
// land on the new one.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::api::{Draft, DraftApi, StartDraftRequest, Team, Year};
use crate::resource::{AsyncResource, ResourceState};

pub const YEARS_FAILURE: &str = "Failed to load years";
pub const TEAMS_FAILURE: &str = "Failed to load teams";
pub const START_FAILURE: &str = "Failed to start draft";

/// The user's current choices. `selected_team` is always a member of the
/// team list loaded for `selected_year`, or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub selected_year: Option<Year>,
    pub selected_team: Option<Team>,
}

/// Everything a setup view needs to render, captured at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct SetupSnapshot {
    pub selection: SelectionState,
    pub years: ResourceState<Vec<Year>>,
    pub teams: ResourceState<Vec<Team>>,
    pub start: ResourceState<Draft>,
}

impl SetupSnapshot {
    /// Whether the start button is enabled.
    pub fn can_start(&self) -> bool {
        self.selection.selected_year.is_some()
            && self.selection.selected_team.is_some()
            && !self.start.is_loading()
    }
}

/// Controller for the setup flow. One instance lives as long as the flow.
pub struct SetupController {
    api: Arc<dyn DraftApi>,
    selection: watch::Sender<SelectionState>,
    years: AsyncResource<Vec<Year>>,
    teams: AsyncResource<Vec<Team>>,
    start: AsyncResource<Draft>,
}

impl SetupController {
    /// Create the controller and kick off the years load.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(api: Arc<dyn DraftApi>) -> Self {
        let (selection, _) = watch::channel(SelectionState::default());
        let controller = Self {
            api,
            selection,
            years: AsyncResource::new("years", YEARS_FAILURE),
            teams: AsyncResource::new("teams", TEAMS_FAILURE),
            start: AsyncResource::new("start_draft", START_FAILURE),
        };

        let api = Arc::clone(&controller.api);
        controller
            .years
            .trigger(async move { api.list_years().await });
        info!("Setup flow started");
        controller
    }

    /// Select a year (or clear it with `None`).
    ///
    /// Always clears the team. A non-empty year starts a teams load that
    /// supersedes any earlier one, even if the same year is selected again.
    pub fn set_year(&self, year: Option<Year>) {
        self.selection.send_modify(|selection| {
            selection.selected_year = year;
            selection.selected_team = None;
        });

        match year {
            Some(year) => {
                let api = Arc::clone(&self.api);
                let token = self
                    .teams
                    .trigger(async move { api.list_teams(year).await });
                info!(year, token, "Loading teams");
            }
            None => self.teams.reset(),
        }
    }

    /// Select a team (or clear it with `None`).
    ///
    /// Only teams from the list loaded for the selected year are accepted;
    /// anything else is ignored and `false` is returned.
    pub fn set_team(&self, team: Option<Team>) -> bool {
        let Some(team) = team else {
            self.selection
                .send_modify(|selection| selection.selected_team = None);
            return true;
        };

        let known = self
            .teams
            .state()
            .data()
            .is_some_and(|teams| teams.contains(&team));
        if !known {
            warn!(team = %team, "Ignoring team not in the loaded team list");
            return false;
        }

        self.selection
            .send_modify(|selection| selection.selected_team = Some(team));
        true
    }

    /// Whether `start_draft` would issue a request right now.
    pub fn can_start(&self) -> bool {
        let selection = self.selection.borrow();
        selection.selected_year.is_some()
            && selection.selected_team.is_some()
            && !self.start.is_loading()
    }

    /// Submit the current selection to start a draft.
    ///
    /// No-op (returns `false`) unless both year and team are selected and no
    /// start request is already in flight. On success the draft is held in
    /// the start slot; nothing navigates.
    pub fn start_draft(&self) -> bool {
        if !self.can_start() {
            return false;
        }
        let request = {
            let selection = self.selection.borrow();
            match (selection.selected_year, selection.selected_team.clone()) {
                (Some(year), Some(user_team)) => StartDraftRequest { year, user_team },
                _ => return false,
            }
        };

        info!(year = request.year, team = %request.user_team, "Starting draft");
        let api = Arc::clone(&self.api);
        self.start.trigger_then(
            async move { api.start_draft(&request).await },
            |draft: &Draft| {
                info!(draft_id = %draft.id, picks = draft.board.len(), "Draft started");
            },
        );
        true
    }

    pub fn selection(&self) -> SelectionState {
        self.selection.borrow().clone()
    }

    pub fn subscribe_selection(&self) -> watch::Receiver<SelectionState> {
        self.selection.subscribe()
    }

    pub fn years(&self) -> &AsyncResource<Vec<Year>> {
        &self.years
    }

    pub fn teams(&self) -> &AsyncResource<Vec<Team>> {
        &self.teams
    }

    pub fn start(&self) -> &AsyncResource<Draft> {
        &self.start
    }

    /// Draft created by the last successful start, if any.
    pub fn started_draft(&self) -> Option<Draft> {
        self.start.state().data().cloned()
    }

    pub fn snapshot(&self) -> SetupSnapshot {
        SetupSnapshot {
            selection: self.selection(),
            years: self.years.state(),
            teams: self.teams.state(),
            start: self.start.state(),
        }
    }

    /// Leave the flow: nothing still in flight may touch this controller.
    pub fn teardown(&self) {
        self.years.cancel();
        self.teams.cancel();
        self.start.cancel();
        info!("Setup flow left");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
