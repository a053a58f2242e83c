use crate::models::session::RunState;
use crate::ui::theme::Theme;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const KEYS: &[(&str, &str)] = &[
    ("q", "Quit"), ("p", "Pause"), ("r", "Reset"), ("+/-", "Zoom"),
    ("←→", "Pan"), ("0", "Fit"), ("d", "Drive"), ("c", "Container"),
    ("t", "Theme"), ("?", "Help"),
];

pub fn render_footer(
    f: &mut Frame,
    area: Rect,
    state: RunState,
    following: bool,
    zoomed: bool,
    theme: &Theme,
) {
    let mut spans: Vec<Span> = vec![Span::styled(" ", theme.footer_bg)];

    for (key, desc) in KEYS {
        let desc = match (*key, state) {
            ("p", RunState::Paused) => "Resume",
            _ => *desc,
        };
        spans.push(Span::styled(format!(" {} ", key), theme.footer_key));
        spans.push(Span::styled(format!("{}  ", desc), theme.footer_text));
    }

    let hint = match (following, zoomed) {
        (false, _)    => "End back to live  0 fit all",
        (true, true)  => "0 fit all  \u{2190}\u{2192} pan",
        (true, false) => "click plot: toggle marker  scroll: zoom",
    };
    spans.push(Span::styled("  \u{2502}  ", theme.footer_text));
    spans.push(Span::styled(hint, theme.footer_text));

    let para = Paragraph::new(Line::from(spans)).style(theme.footer_bg);
    f.render_widget(para, area);
}
