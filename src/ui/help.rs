use crate::ui::theme::Theme;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, theme: &Theme) {
    let area = centered_rect(62, 26, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(Span::styled(" dplot keybindings (? or Esc to close) ", theme.title));

    let lines = vec![
        key_line(theme, "Session", ""),
        key_line(theme, "  q / Ctrl-C",    "Quit"),
        key_line(theme, "  p / Space",     "Pause / resume sampling"),
        key_line(theme, "  r",             "Reset: clear data, markers and start time"),
        key_line(theme, "  d",             "Cycle monitored volume"),
        key_line(theme, "  c",             "Cycle matching container"),
        key_line(theme, "  t",             "Cycle color theme"),
        Line::from(""),
        key_line(theme, "View", ""),
        key_line(theme, "  + / =",         "Zoom in"),
        key_line(theme, "  -",             "Zoom out"),
        key_line(theme, "  0",             "Fit all history"),
        key_line(theme, "  ← → / h l",     "Pan (leaving the live edge)"),
        key_line(theme, "  End",           "Jump back to the live edge"),
        Line::from(""),
        key_line(theme, "Mouse", ""),
        key_line(theme, "  Click",         "Add marker (T1..T5) or remove one"),
        key_line(theme, "  Hover",         "Time / usage readout"),
        key_line(theme, "  Scroll",        "Zoom in / out"),
        Line::from(""),
        key_line(theme, "Files", ""),
        key_line(theme, "  Config  ~/.config/dplot/dplot.toml", ""),
        key_line(theme, "  Log     ~/.local/share/dplot/dplot.log", ""),
    ];

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn key_line<'a>(theme: &Theme, key: &'a str, desc: &'a str) -> Line<'a> {
    if desc.is_empty() {
        Line::from(vec![Span::styled(key, theme.title)])
    } else {
        Line::from(vec![
            Span::styled(format!("{:<16}", key), theme.footer_key),
            Span::styled(desc, theme.text_dim),
        ])
    }
}

/// Centered Rect of the given size, capped at the available area.
fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let w = width.min(r.width);
    let h = height.min(r.height);
    let x = r.x + (r.width.saturating_sub(w)) / 2;
    let y = r.y + (r.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
