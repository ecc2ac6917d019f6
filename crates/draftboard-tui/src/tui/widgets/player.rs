// Player detail widget: scouting profile of the last inspected player.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use serde_json::Value;

use draftboard_core::api::PlayerDetail;
use draftboard_core::resource::ResourceState;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let lines = match state.board.as_ref().map(|b| &b.player) {
        Some(ResourceState::Success(detail)) => detail_lines(detail),
        Some(ResourceState::Loading) => vec![Line::from(Span::styled(
            "Loading player...",
            Style::default().fg(Color::Yellow),
        ))],
        Some(ResourceState::Error(message)) => vec![Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red),
        ))],
        None | Some(ResourceState::Idle) => vec![Line::from(Span::styled(
            "Press i on a player for details.",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Player"));
    frame.render_widget(paragraph, area);
}

pub fn detail_lines(detail: &PlayerDetail) -> Vec<Line<'static>> {
    let name = detail
        .name
        .clone()
        .unwrap_or_else(|| detail.player_id.to_string());
    let mut lines = vec![Line::from(Span::styled(
        name,
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    let facts = [
        ("Pos", detail.position.clone()),
        ("Team", detail.team.clone()),
        ("College", detail.college.clone()),
        ("Rank", detail.overall_rank.map(|r| format!("{r:.0}"))),
    ];
    for (label, value) in facts {
        if let Some(value) = value {
            lines.push(Line::from(format!("{label}: {value}")));
        }
    }

    for (key, value) in detail.profile.iter().chain(detail.stats.iter()) {
        if value.is_null() {
            continue;
        }
        lines.push(Line::from(format!("{key}: {}", format_value(value))));
    }
    lines
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() != 0.0 => format!("{f:.2}"),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}
