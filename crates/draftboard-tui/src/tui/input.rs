// Keyboard input handling.
//
// Translates crossterm key events into `Action`s for the app, or into local
// `ViewState` changes (focus, cursors). Which keys mean what depends on the
// current route.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use draftboard_core::route::Route;

use super::{Action, SetupFocus, ViewState};

/// Handle a keyboard event.
///
/// Returns `Some(Action)` when the key press needs the controllers or the
/// router, `None` when it was handled locally (or ignored).
pub fn handle_key(key_event: KeyEvent, state: &mut ViewState) -> Option<Action> {
    // crossterm reports Press and Release separately on some platforms.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(Action::Quit);
    }
    if key_event.code == KeyCode::Char('q') {
        return Some(Action::Quit);
    }

    match state.route {
        Route::Setup => handle_setup_key(key_event, state),
        Route::Board { .. } => handle_board_key(key_event, state),
    }
}

// ---------------------------------------------------------------------------
// Setup screen
// ---------------------------------------------------------------------------

fn handle_setup_key(key_event: KeyEvent, state: &mut ViewState) -> Option<Action> {
    let view = state.setup_view()?;

    match key_event.code {
        KeyCode::Tab => {
            state.focus = state.focus.next();
            None
        }
        KeyCode::BackTab => {
            state.focus = state.focus.prev();
            None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            match state.focus {
                SetupFocus::Year => state.year_cursor = state.year_cursor.saturating_sub(1),
                SetupFocus::Team => state.team_cursor = state.team_cursor.saturating_sub(1),
                SetupFocus::Start => {}
            }
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            match state.focus {
                SetupFocus::Year => {
                    state.year_cursor = step_down(state.year_cursor, view.year.options.len())
                }
                SetupFocus::Team => {
                    state.team_cursor = step_down(state.team_cursor, view.team.options.len())
                }
                SetupFocus::Start => {}
            }
            None
        }
        KeyCode::Enter => match state.focus {
            SetupFocus::Year if view.year.enabled => {
                let year = view.year.options.get(state.year_cursor).copied()?;
                state.team_cursor = 0;
                state.focus = SetupFocus::Team;
                Some(Action::SelectYear(Some(year)))
            }
            SetupFocus::Team if view.team.enabled => {
                let team = view.team.options.get(state.team_cursor).cloned()?;
                state.focus = SetupFocus::Start;
                Some(Action::SelectTeam(Some(team)))
            }
            SetupFocus::Start if view.start.enabled => Some(Action::StartDraft),
            _ => None,
        },
        KeyCode::Backspace | KeyCode::Delete => match state.focus {
            SetupFocus::Year if view.year.enabled => Some(Action::SelectYear(None)),
            SetupFocus::Team if view.team.enabled => Some(Action::SelectTeam(None)),
            _ => None,
        },
        KeyCode::Char('b') => state
            .started_draft_id()
            .map(|draft_id| Action::Navigate(Route::board(draft_id))),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Board screen
// ---------------------------------------------------------------------------

fn handle_board_key(key_event: KeyEvent, state: &mut ViewState) -> Option<Action> {
    match key_event.code {
        KeyCode::Esc => Some(Action::Navigate(Route::Setup)),
        KeyCode::Char('r') => Some(Action::Reload),
        KeyCode::Char('a') => Some(Action::Advance),
        KeyCode::Char('s') => Some(Action::CheckStatus),
        KeyCode::Up | KeyCode::Char('k') => {
            state.player_cursor = state.player_cursor.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let len = state
                .board
                .as_ref()
                .and_then(|b| b.available.data())
                .map_or(0, Vec::len);
            state.player_cursor = step_down(state.player_cursor, len);
            None
        }
        KeyCode::Char('p') | KeyCode::Enter => state.selected_player().map(Action::Pick),
        KeyCode::Char('i') => state.selected_player().map(Action::ShowPlayer),
        _ => None,
    }
}

fn step_down(cursor: usize, len: usize) -> usize {
    if cursor + 1 < len {
        cursor + 1
    } else {
        cursor
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
