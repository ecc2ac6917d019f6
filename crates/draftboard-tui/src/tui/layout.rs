// Screen layout: panel arrangement and sizing.
//
// Every screen shares the outer frame:
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Body (fill)                                       |
// +--------------------------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+
//
// The board screen splits its body further:
//
// +---------------------------+----------------------+
// | Board (60%)               | Available (65%)      |
// |                           +----------------------+
// |                           | Player (35%)         |
// +---------------------------+----------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas shared by every route.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: route and draft clock.
    pub status_bar: Rect,
    /// Route-specific content.
    pub body: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Areas of the board screen body.
#[derive(Debug, Clone)]
pub struct BoardLayout {
    pub board: Rect,
    pub available: Rect,
    pub player: Rect,
}

/// Areas of the setup screen body.
#[derive(Debug, Clone)]
pub struct SetupLayout {
    pub years: Rect,
    pub teams: Rect,
    pub start: Rect,
    pub messages: Rect,
}

pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(5),    // body
            Constraint::Length(1), // help bar
        ])
        .split(area);

    AppLayout {
        status_bar: vertical[0],
        body: vertical[1],
        help_bar: vertical[2],
    }
}

pub fn build_board_layout(body: Rect) -> BoardLayout {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(body);

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(horizontal[1]);

    BoardLayout {
        board: horizontal[0],
        available: sidebar[0],
        player: sidebar[1],
    }
}

/// Years and teams side by side, the start button and messages below.
pub fn build_setup_layout(body: Rect) -> SetupLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(4),    // selects
            Constraint::Length(3), // start button
            Constraint::Length(4), // messages
        ])
        .split(body);

    let selects = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(vertical[0]);

    SetupLayout {
        years: selects[0],
        teams: selects[1],
        start: vertical[1],
        messages: vertical[2],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
