// Draft board widget: heading plus the pick table in service order.
//
// Columns: Overall, Round, Pick, Team, Player ID. The pick on the clock is
// highlighted and kept in view.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use draftboard_core::api::Draft;
use draftboard_core::resource::ResourceState;
use draftboard_core::view::{board_rows, BoardHeading};

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let board = state.board.as_ref().map(|b| &b.board);
    let message = match board {
        None | Some(ResourceState::Idle) => Some(("No draft loaded.".to_string(), Color::DarkGray)),
        Some(ResourceState::Loading) => Some(("Loading draft board...".to_string(), Color::Yellow)),
        Some(ResourceState::Error(message)) => Some((message.clone(), Color::Red)),
        Some(ResourceState::Success(_)) => None,
    };

    if let Some((text, color)) = message {
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(color))
            .block(Block::default().borders(Borders::ALL).title("Draft Board"));
        frame.render_widget(paragraph, area);
        return;
    }

    if let Some(ResourceState::Success(draft)) = board {
        render_draft(frame, area, draft);
    }
}

fn render_draft(frame: &mut Frame, area: Rect, draft: &Draft) {
    let heading = BoardHeading::from_draft(draft);

    let header = Row::new(vec![
        Cell::from("Overall"),
        Cell::from("Round"),
        Cell::from("Pick"),
        Cell::from("Team"),
        Cell::from("Player ID"),
    ])
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = board_rows(draft)
        .into_iter()
        .map(|row| {
            let style = if row.is_current {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(row.overall.to_string()),
                Cell::from(row.round.to_string()),
                Cell::from(row.pick.to_string()),
                Cell::from(row.team),
                Cell::from(row.player),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(8),
        Constraint::Length(6),
        Constraint::Length(5),
        Constraint::Min(8),
        Constraint::Min(10),
    ];

    let title = Line::from(format!("{} | {}", heading.title, heading.current_pick));
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));

    // Selecting the current pick scrolls it into view.
    let mut table_state = TableState::default();
    if draft.current_index < draft.board.len() {
        table_state.select(Some(draft.current_index));
    }
    frame.render_stateful_widget(table, area, &mut table_state);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
