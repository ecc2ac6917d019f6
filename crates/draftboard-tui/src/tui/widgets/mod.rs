// TUI widget modules, one per screen panel.

pub mod available;
pub mod board;
pub mod help_bar;
pub mod player;
pub mod setup;
pub mod status_bar;

/// Render with `draw` into a `width` x `height` test terminal and return the
/// screen as text, one line per row.
#[cfg(test)]
pub(crate) fn render_to_text(
    width: u16,
    height: u16,
    draw: impl FnOnce(&mut ratatui::Frame),
) -> String {
    let backend = ratatui::backend::TestBackend::new(width, height);
    let mut terminal = ratatui::Terminal::new(backend).unwrap();
    terminal.draw(draw).unwrap();

    let buffer = terminal.backend().buffer();
    buffer
        .content()
        .chunks(width as usize)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
