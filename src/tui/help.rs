use ratatui::{
    layout::Rect,
    style::Color,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn key_line(key: &str, pad: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(key.to_string(), Style::default().fg(Color::Magenta)),
        Span::raw(pad.to_string()),
        Span::raw(desc.to_string()),
    ])
}

pub fn draw_help(area: Rect, f: &mut Frame) {
    let p = Paragraph::new(vec![
        Line::from("Keybinds:"),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("q", Style::default().fg(Color::Magenta)),
            Span::raw(" / "),
            Span::styled("Ctrl-C", Style::default().fg(Color::Magenta)),
            Span::raw("  Quit"),
        ]),
        key_line("tab", "         ", "Switch tabs"),
        key_line("?", "           ", "Show this help"),
        key_line("Ctrl-L", "      ", "Log out"),
        Line::from(""),
        Line::from("Calculate tab:"),
        key_line("0-9", "         ", "Type into the active field"),
        key_line("↑/↓", "         ", "Switch field"),
        key_line("enter", "       ", "Start the calculation"),
        key_line("space", "       ", "Play / pause"),
        key_line("←/→", "         ", "Previous / next step (pauses)"),
        key_line("1 / 2 / 3", "   ", "Speed 0.5x / 1x / 2x"),
        key_line("r", "           ", "New calculation"),
        key_line("e", "           ", "Export result as JSON"),
        key_line("y", "           ", "Copy exported path to clipboard"),
        Line::from(""),
        Line::from("History tab:"),
        key_line("↑/↓ or j/k", "  ", "Navigate"),
        key_line("enter", "       ", "Open selected in the visualizer"),
        key_line("d", "           ", "Delete selected"),
        key_line("r", "           ", "Refresh history"),
        key_line("e", "           ", "Export selected as JSON"),
        Line::from(""),
        Line::from("Theory tab:"),
        key_line("←/→", "         ", "Switch section"),
        key_line("↑/↓", "         ", "Scroll"),
    ])
    .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(p, area);
}
