use crate::models::marker::{ReferenceMarker, MAX_MARKERS};
use crate::models::sample::Channel;
use crate::models::session::Session;
use crate::models::units::TimeUnit;
use crate::ui::theme::Theme;
use crate::util::human::{fmt_elapsed, fmt_gb};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Legend entry: "T1: 3.2m  Sys:120.4GB  Doc:0.5GB". Channels without a value
/// at the marker's time are left out.
pub fn legend_entry(marker: &ReferenceMarker, unit: TimeUnit) -> String {
    let mut s = format!("{}: {}", marker.label(), fmt_elapsed(marker.x, unit));
    for ch in Channel::ALL {
        if let Some(v) = marker.value(ch) {
            s.push_str(&format!("  {}:{}", ch.short(), fmt_gb(v)));
        }
    }
    s
}

pub fn render_markers(f: &mut Frame, area: Rect, session: &Session, theme: &Theme) {
    let markers = session.markers();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(Span::styled(format!(" Markers {}/{} ", markers.len(), MAX_MARKERS), theme.title));

    let lines: Vec<Line> = if markers.is_empty() {
        vec![Line::from(Span::styled("Click the plot to place a marker", theme.text_dim))]
    } else {
        markers.iter()
            .map(|m| Line::from(Span::styled(
                legend_entry(m, session.time_unit()),
                theme.marker_style(m.index),
            )))
            .collect()
    };

    f.render_widget(Paragraph::new(lines).block(block), area);
}
