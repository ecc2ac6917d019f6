// Available players widget: undrafted players with the pick cursor.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use draftboard_core::api::AvailablePlayer;
use draftboard_core::resource::ResourceState;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = Block::default().borders(Borders::ALL);
    let available = state.board.as_ref().map(|b| &b.available);

    let players = match available {
        Some(ResourceState::Success(players)) => players,
        Some(ResourceState::Loading) => {
            let paragraph = Paragraph::new("Loading players...")
                .style(Style::default().fg(Color::Yellow))
                .block(block.title("Available Players"));
            frame.render_widget(paragraph, area);
            return;
        }
        Some(ResourceState::Error(message)) => {
            let paragraph = Paragraph::new(message.clone())
                .style(Style::default().fg(Color::Red))
                .block(block.title("Available Players"));
            frame.render_widget(paragraph, area);
            return;
        }
        None | Some(ResourceState::Idle) => {
            let paragraph = Paragraph::new("")
                .block(block.title("Available Players"));
            frame.render_widget(paragraph, area);
            return;
        }
    };

    let header = Row::new(vec![
        Cell::from("Rank"),
        Cell::from("Name"),
        Cell::from("Pos"),
        Cell::from("ID"),
    ])
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = players.iter().map(player_row).collect();
    let widths = [
        Constraint::Length(5),
        Constraint::Min(12),
        Constraint::Length(5),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block.title(format!("Available Players ({})", players.len())))
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol(">> ");

    let mut table_state = TableState::default();
    if !players.is_empty() {
        table_state.select(Some(state.player_cursor.min(players.len() - 1)));
    }
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn player_row(player: &AvailablePlayer) -> Row<'static> {
    Row::new(vec![
        Cell::from(
            player
                .overall_rank
                .map_or_else(|| "--".to_string(), |r| r.to_string()),
        ),
        Cell::from(player.name.clone()),
        Cell::from(player.position.clone().unwrap_or_else(|| "--".to_string())),
        Cell::from(player.player_id.to_string()),
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
