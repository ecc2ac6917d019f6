// UI-agnostic projections of controller state: what each screen shows,
// independent of how it is drawn.

use crate::api::{Draft, Year};
use crate::resource::ResourceState;
use crate::setup::SetupSnapshot;

/// Shown in place of a player on a pick that has not been made.
pub const PLACEHOLDER: &str = "-";

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// One rendered row of the draft board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardRow {
    /// Row identity. Taken from `overall`, which the service keeps unique.
    pub key: u32,
    pub overall: u32,
    pub round: u32,
    pub pick: u32,
    pub team: String,
    pub player: String,
    pub is_current: bool,
}

/// Rows in exactly the order the service returned them.
pub fn board_rows(draft: &Draft) -> Vec<BoardRow> {
    draft
        .board
        .iter()
        .enumerate()
        .map(|(index, pick)| BoardRow {
            key: pick.overall,
            overall: pick.overall,
            round: pick.round,
            pick: pick.pick,
            team: pick.team.clone(),
            player: pick
                .player_id
                .as_ref()
                .map_or_else(|| PLACEHOLDER.to_string(), ToString::to_string),
            is_current: index == draft.current_index,
        })
        .collect()
}

/// Board heading lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardHeading {
    pub title: String,
    pub current_pick: String,
}

impl BoardHeading {
    pub fn from_draft(draft: &Draft) -> Self {
        Self {
            title: format!("Draft Board {}", draft.year),
            current_pick: format!("Current Pick Index: {}", draft.current_index),
        }
    }
}

// ---------------------------------------------------------------------------
// Setup
// ---------------------------------------------------------------------------

/// A dropdown: the prompt line, the choices, and whether it accepts input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectView<T> {
    pub prompt: &'static str,
    pub options: Vec<T>,
    pub selected: Option<T>,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub label: &'static str,
    pub enabled: bool,
}

/// Everything the setup screen draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupView {
    pub year: SelectView<Year>,
    pub team: SelectView<String>,
    pub start: ButtonView,
    /// One line per failed slot, in screen order.
    pub errors: Vec<String>,
}

impl SetupView {
    pub fn from_snapshot(snapshot: &SetupSnapshot) -> Self {
        let selection = &snapshot.selection;

        let years_loading = snapshot.years.is_loading();
        let year = SelectView {
            prompt: if years_loading {
                "Loading years..."
            } else {
                "Select a year"
            },
            options: if years_loading {
                Vec::new()
            } else {
                loaded(&snapshot.years)
            },
            selected: selection.selected_year,
            enabled: !years_loading,
        };

        let teams_loading = snapshot.teams.is_loading();
        let team = match selection.selected_year {
            None => SelectView {
                prompt: "Select a year first",
                options: Vec::new(),
                selected: None,
                enabled: false,
            },
            Some(_) if teams_loading => SelectView {
                prompt: "Loading teams...",
                options: Vec::new(),
                selected: None,
                enabled: false,
            },
            Some(_) => SelectView {
                prompt: "Select a team",
                options: loaded(&snapshot.teams),
                selected: selection.selected_team.clone(),
                enabled: true,
            },
        };

        let start = ButtonView {
            label: if snapshot.start.is_loading() {
                "Starting..."
            } else {
                "Start Draft"
            },
            enabled: snapshot.can_start(),
        };

        let errors = [
            snapshot.years.error_message(),
            snapshot.teams.error_message(),
            snapshot.start.error_message(),
        ]
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect();

        Self {
            year,
            team,
            start,
            errors,
        }
    }
}

fn loaded<T: Clone>(state: &ResourceState<Vec<T>>) -> Vec<T> {
    state.data().cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
