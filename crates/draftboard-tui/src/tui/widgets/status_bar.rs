// Status bar widget: current route and the draft clock.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use draftboard_core::resource::ResourceState;
use draftboard_core::route::Route;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = vec![Span::styled(
        format!(" {} ", screen_label(&state.route)),
        Style::default().fg(Color::White),
    )];

    if let Some((text, color)) = clock_text(state) {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(text, Style::default().fg(color)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

pub fn screen_label(route: &Route) -> String {
    match route {
        Route::Setup => "Draft Setup".to_string(),
        Route::Board { draft_id } => format!("Draft {draft_id}"),
    }
}

/// Draft clock from the progress slot, if the board flow has one.
pub fn clock_text(state: &ViewState) -> Option<(String, Color)> {
    let board = state.board.as_ref()?;
    match &board.progress {
        ResourceState::Idle => None,
        ResourceState::Loading => Some(("Updating draft...".to_string(), Color::Yellow)),
        ResourceState::Success(progress) => Some((
            format!(
                "Round {} Pick {} ({})",
                progress.round,
                progress.pick,
                progress.status.label()
            ),
            Color::Green,
        )),
        ResourceState::Error(message) => Some((message.clone(), Color::Red)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
