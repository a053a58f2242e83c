use crate::app::App;
use crate::models::marker::MAX_MARKERS;
use crate::models::session::Session;
use crate::models::usage::info_line;
use crate::ui::theme::Theme;
use crate::ui::{chart::render_chart, footer::render_footer, markers_panel::render_markers};
use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame, app: &mut App) {
    let area  = f.area();
    let theme = app.theme.clone();

    // ── Root: header | info | chart | markers | footer ─────────────
    let marker_rows = app.session.markers().len().max(1) as u16 + 2;
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(marker_rows.min(MAX_MARKERS as u16 + 2)),
            Constraint::Length(1),
        ])
        .split(area);

    // ── Header: title + run state + status flash + clock ───────────
    let now   = Local::now().format("%H:%M:%S").to_string();
    let left  = format!(" dplot: {} ", app.theme_variant.name());
    let state = app.session.state();
    let state_label = format!(" {} ", state.label());
    let state_style = if app.session.is_paused() { theme.warn } else { theme.ok };
    let target = match app.docker_target() {
        Some(t) => format!("  {}  container {}  ", app.system_path, t),
        None    => format!("  {}  ", app.system_path),
    };
    let flash = app.status().map(|s| format!("  {}  ", s)).unwrap_or_default();
    let right = format!(" {} ", now);

    let used = left.len() + state_label.len() + target.chars().count()
        + flash.chars().count() + right.len();
    let pad = (area.width as usize).saturating_sub(used);

    let header = Line::from(vec![
        Span::styled(left, theme.header),
        Span::styled(state_label, state_style),
        Span::styled(target, theme.text_dim),
        Span::styled(" ".repeat(pad), theme.text),
        Span::styled(flash, theme.warn),
        Span::styled(right, theme.text_dim),
    ]);
    f.render_widget(Paragraph::new(header), root[0]);

    // ── Info line ───────────────────────────────────────────────────
    let info = info_row(&app.session, app.docker_enabled(), &theme);
    f.render_widget(Paragraph::new(info), root[1]);

    // ── Plot + markers ──────────────────────────────────────────────
    app.plot_geometry = render_chart(f, root[2], app, &theme);
    render_markers(f, root[3], &app.session, &theme);

    render_footer(
        f,
        root[4],
        state,
        app.viewport.is_following(),
        app.viewport.is_zoomed(),
        &theme,
    );
}

fn info_row(session: &Session, docker_enabled: bool, theme: &Theme) -> Line<'static> {
    match session.latest() {
        Some(r) => {
            let text = info_line(&r.system, docker_enabled, r.docker.as_ref());
            Line::from(Span::styled(format!(" {}", text), theme.text))
        }
        None if session.has_started() => {
            Line::from(Span::styled(" Target changed, waiting for next sample…", theme.text_dim))
        }
        None => Line::from(Span::styled(" Waiting for first sample…", theme.text_dim)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::Readings;
    use crate::models::units::TimeUnit;
    use crate::models::usage::DiskUsage;
    use std::time::Instant;

    #[test]
    fn info_line_style_does_not_track_usage() {
        let theme = Theme::default();
        for free_gb in [400.0, 10.0, 1.0] {
            let mut s = Session::new(TimeUnit::Seconds, None);
            let r = Readings { system: DiskUsage::from_gb(500.0, free_gb), docker: None };
            s.record(Instant::now(), r).unwrap();
            let line = info_row(&s, false, &theme);
            assert!(line.spans.iter().all(|sp| sp.style == theme.text));
        }
    }

    #[test]
    fn info_line_before_first_sample() {
        let theme = Theme::default();
        let s = Session::new(TimeUnit::Seconds, None);
        let line = info_row(&s, true, &theme);
        assert!(line.spans[0].content.contains("Waiting for first sample"));
    }
}
