// Setup screen widget: year and team pickers, start button, messages.

use std::fmt::Display;

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use draftboard_core::view::{ButtonView, SelectView, SetupView};

use crate::tui::layout::build_setup_layout;
use crate::tui::{SetupFocus, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(view) = state.setup_view() else {
        frame.render_widget(Paragraph::new("Setup is not active."), area);
        return;
    };
    let layout = build_setup_layout(area);

    render_select(
        frame,
        layout.years,
        "Year",
        &view.year,
        state.year_cursor,
        state.focus == SetupFocus::Year,
    );
    render_select(
        frame,
        layout.teams,
        "Team",
        &view.team,
        state.team_cursor,
        state.focus == SetupFocus::Team,
    );
    render_button(frame, layout.start, &view.start, state.focus == SetupFocus::Start);
    render_messages(frame, layout.messages, &view, state);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

/// Lines of a picker: the prompt, then one line per option. The option under
/// the cursor gets `>` while focused, the selected option gets `*`.
pub fn select_lines<T: Display + PartialEq>(
    select: &SelectView<T>,
    cursor: usize,
    focused: bool,
) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        select.prompt,
        Style::default().fg(Color::DarkGray),
    ))];

    for (i, option) in select.options.iter().enumerate() {
        let marker = if focused && i == cursor { ">" } else { " " };
        let chosen = select.selected.as_ref() == Some(option);
        let style = if chosen {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let check = if chosen { "*" } else { " " };
        lines.push(Line::from(Span::styled(
            format!("{marker}{check} {option}"),
            style,
        )));
    }
    lines
}

fn render_select<T: Display + PartialEq>(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    select: &SelectView<T>,
    cursor: usize,
    focused: bool,
) {
    let visible = (area.height as usize).saturating_sub(3);
    let scroll = cursor.saturating_sub(visible.saturating_sub(1));
    let style = if select.enabled {
        Style::default()
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };

    let paragraph = Paragraph::new(select_lines(select, cursor, focused))
        .style(style)
        .scroll((scroll as u16, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_style(focused))
                .title(title.to_string()),
        );
    frame.render_widget(paragraph, area);
}

fn render_button(frame: &mut Frame, area: Rect, button: &ButtonView, focused: bool) {
    let style = if button.enabled {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let paragraph = Paragraph::new(Span::styled(format!("[ {} ]", button.label), style))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_style(focused)),
        );
    frame.render_widget(paragraph, area);
}

fn render_messages(frame: &mut Frame, area: Rect, view: &SetupView, state: &ViewState) {
    let mut lines: Vec<Line> = view
        .errors
        .iter()
        .map(|e| Line::from(Span::styled(e.clone(), Style::default().fg(Color::Red))))
        .collect();

    if let Some(draft_id) = state.started_draft_id() {
        lines.push(Line::from(Span::styled(
            format!("Draft {draft_id} started. Press b to open the board."),
            Style::default().fg(Color::Green),
        )));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::render_to_text;
    use draftboard_core::api::Draft;
    use draftboard_core::resource::ResourceState;
    use draftboard_core::route::Route;
    use draftboard_core::setup::{SelectionState, SetupSnapshot};

    fn state(snapshot: SetupSnapshot) -> ViewState {
        ViewState {
            route: Route::Setup,
            setup: Some(snapshot),
            ..ViewState::default()
        }
    }

    fn snapshot() -> SetupSnapshot {
        SetupSnapshot {
            selection: SelectionState::default(),
            years: ResourceState::Success(vec![2023, 2024]),
            teams: ResourceState::Idle,
            start: ResourceState::Idle,
        }
    }

    fn draw(state: &ViewState) -> String {
        render_to_text(80, 24, |frame| render(frame, frame.area(), state))
    }

    #[test]
    fn select_lines_mark_cursor_and_selection() {
        let select = SelectView {
            prompt: "Select a year",
            options: vec![2023, 2024],
            selected: Some(2024),
            enabled: true,
        };
        let text: Vec<String> = select_lines(&select, 0, true)
            .iter()
            .map(|l| l.to_string())
            .collect();
        assert_eq!(text, vec!["Select a year", ">  2023", " * 2024"]);
    }

    #[test]
    fn unfocused_select_has_no_cursor() {
        let select = SelectView {
            prompt: "Select a team",
            options: vec!["KC".to_string()],
            selected: None,
            enabled: true,
        };
        let lines = select_lines(&select, 0, false);
        assert_eq!(lines[1].to_string(), "   KC");
    }

    #[test]
    fn renders_loading_prompts() {
        let mut snap = snapshot();
        snap.years = ResourceState::Loading;
        let text = draw(&state(snap));
        assert!(text.contains("Loading years..."));
        assert!(text.contains("Select a year first"));
        assert!(text.contains("[ Start Draft ]"));
    }

    #[test]
    fn renders_years_and_team_prompt() {
        let mut snap = snapshot();
        snap.selection.selected_year = Some(2023);
        snap.teams = ResourceState::Success(vec!["KC".into(), "SF".into()]);
        let text = draw(&state(snap));
        assert!(text.contains("2023"));
        assert!(text.contains("2024"));
        assert!(text.contains("Select a team"));
        assert!(text.contains("SF"));
    }

    #[test]
    fn renders_errors_and_starting_label() {
        let mut snap = snapshot();
        snap.selection = SelectionState {
            selected_year: Some(2023),
            selected_team: Some("KC".into()),
        };
        snap.teams = ResourceState::Error("Failed to load teams".into());
        snap.start = ResourceState::Loading;
        let text = draw(&state(snap));
        assert!(text.contains("Failed to load teams"));
        assert!(text.contains("[ Starting... ]"));
    }

    #[test]
    fn renders_started_draft_hint() {
        let mut snap = snapshot();
        snap.start = ResourceState::Success(Draft {
            id: "d-3".into(),
            year: 2023,
            current_index: 0,
            board: vec![],
            status: None,
        });
        let text = draw(&state(snap));
        assert!(text.contains("Draft d-3 started. Press b to open the board."));
    }

    #[test]
    fn render_without_setup_does_not_panic() {
        let text = draw(&ViewState::default());
        assert!(text.contains("Setup is not active."));
    }
}
