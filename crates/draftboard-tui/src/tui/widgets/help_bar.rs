// Help bar widget: key hints for the current screen.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use draftboard_core::route::Route;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        hints(state),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

pub fn hints(state: &ViewState) -> &'static str {
    match state.route {
        Route::Setup if state.started_draft_id().is_some() => {
            " q:Quit | Tab:Focus | Up/Down:Move | Enter:Select | b:Open Board"
        }
        Route::Setup => " q:Quit | Tab:Focus | Up/Down:Move | Enter:Select | Bksp:Clear",
        Route::Board { .. } => {
            " q:Quit | Esc:Setup | r:Reload | a:Advance | s:Status | p:Pick | i:Player"
        }
    }
}
