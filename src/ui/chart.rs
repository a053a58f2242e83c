use crate::app::App;
use crate::models::marker::ReferenceMarker;
use crate::models::sample::Channel;
use crate::ui::cursor::CursorReadout;
use crate::ui::plot::{choose_step, gb_ticks, ticks, PlotGeometry};
use crate::ui::surface::{render_plot, PlotSurface};
use crate::ui::theme::Theme;
use crate::util::human::fmt_tick;
use ratatui::{
    layout::Rect,
    style::Style,
    symbols,
    text::Line,
    widgets::{Axis, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph},
    Frame,
};

/// [`PlotSurface`] on a ratatui braille [`Chart`]. Collects the frame's
/// primitives, then draws them in one pass with [`ChartSurface::finish`].
pub struct ChartSurface<'t> {
    theme:    &'t Theme,
    geometry: PlotGeometry,
    lines:    Vec<(Vec<(f64, f64)>, Style)>,
    labels:   Vec<(u16, String, Style)>,
    tooltip:  Option<(u16, u16, String)>,
}

impl<'t> ChartSurface<'t> {
    pub fn new(theme: &'t Theme, geometry: PlotGeometry) -> Self {
        Self { theme, geometry, lines: Vec::new(), labels: Vec::new(), tooltip: None }
    }

    fn vertical(&mut self, x: f64, style: Style) {
        let [_, top] = self.geometry.y_bounds;
        self.lines.push((vec![(x, 0.0), (x, top)], style));
    }

    pub fn finish(self, f: &mut Frame) {
        let g = self.geometry;
        let datasets: Vec<Dataset> = self.lines.iter()
            .map(|(pts, style)| {
                Dataset::default()
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(*style)
                    .data(pts)
            })
            .collect();

        // No axis labels or block: the chart's graph area is exactly `g.area`
        let chart = Chart::new(datasets)
            .x_axis(Axis::default().bounds(g.x_bounds))
            .y_axis(Axis::default().bounds(g.y_bounds));
        f.render_widget(chart, g.area);

        for (col, text, style) in &self.labels {
            put(f, g.area, *col, g.area.y, text, *style);
        }

        if let Some((col, row, text)) = &self.tooltip {
            render_tooltip(f, g.area, *col, *row, text, self.theme);
        }
    }
}

impl PlotSurface for ChartSurface<'_> {
    fn draw_series(&mut self, channel: Channel, points: Vec<(f64, f64)>) {
        self.lines.push((points, self.theme.series_style(channel)));
    }

    fn draw_capacity(&mut self, _channel: Channel, capacity_gb: f64) {
        let [lo, hi] = self.geometry.x_bounds;
        self.lines.push((vec![(lo, capacity_gb), (hi, capacity_gb)], self.theme.capacity_line));
    }

    fn draw_marker(&mut self, marker: &ReferenceMarker) {
        let style = self.theme.marker_style(marker.index);
        self.vertical(marker.x, style);
        if let Some(col) = self.geometry.column_for(marker.x) {
            self.labels.push((col, marker.label(), style));
        }
    }

    fn show_tooltip(&mut self, readout: &CursorReadout, text: &str) {
        self.vertical(readout.sample.time, self.theme.cursor);
        self.tooltip = Some((readout.column, readout.row, text.to_string()));
    }
}

/// Bordered plot panel with hand-placed tick labels. Returns where the graph
/// itself was drawn so pointer events can be mapped back to data.
pub fn render_chart(f: &mut Frame, area: Rect, app: &App, theme: &Theme) -> Option<PlotGeometry> {
    let unit = app.session.time_unit();
    let title = format!(" Disk Usage (GB): {} ", app.system_path);
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(Line::styled(title, theme.title))
        .title_bottom(Line::styled(format!(" {} ", unit.axis_title()), theme.text_dim).centered());
    if app.session.is_paused() {
        block = block.title(Line::styled(" PAUSED ", theme.warn).right_aligned());
    }
    let inner = block.inner(area);
    f.render_widget(block, area);

    let y_bounds = app.y_axis.bounds();
    let y_ticks  = gb_ticks(y_bounds[1], (inner.height as usize / 3).clamp(2, 6));
    let gutter   = y_ticks.iter().map(|v| fmt_tick(*v).len()).max().unwrap_or(1) as u16 + 1;

    if inner.width <= gutter + 4 || inner.height < 4 {
        return None;
    }
    let graph = Rect::new(inner.x + gutter, inner.y, inner.width - gutter, inner.height - 1);
    let geometry = PlotGeometry { area: graph, x_bounds: app.x_bounds(), y_bounds };

    // Y labels
    let span = (y_bounds[1] - y_bounds[0]).max(f64::EPSILON);
    let bottom = graph.y + graph.height - 1;
    for v in &y_ticks {
        let frac = (v - y_bounds[0]) / span;
        let row  = bottom.saturating_sub((frac * (graph.height - 1) as f64).round() as u16);
        let text = format!("{:>w$}", fmt_tick(*v), w = gutter as usize - 1);
        put(f, inner, inner.x, row, &text, theme.text_dim);
    }

    // X labels, skipping any that would collide with the previous one
    let [lo, hi] = geometry.x_bounds;
    let step = choose_step(hi - lo, unit.tick_steps(), (graph.width as usize / 10).max(2));
    let label_row = graph.y + graph.height;
    let mut next_free = inner.x;
    for v in ticks(lo, hi, step) {
        let Some(col) = geometry.column_for(v) else { continue };
        let text  = fmt_tick(v);
        let start = col.saturating_sub(text.len() as u16 / 2).max(inner.x);
        if start < next_free { continue; }
        put(f, inner, start, label_row, &text, theme.text_dim);
        next_free = start + text.len() as u16 + 1;
    }

    let mut surface = ChartSurface::new(theme, geometry);
    render_plot(&mut surface, &app.session, geometry.x_bounds, app.cursor.readout(), unit);
    surface.finish(f);

    Some(geometry)
}

fn render_tooltip(f: &mut Frame, bounds: Rect, col: u16, row: u16, text: &str, theme: &Theme) {
    let w = text.lines().map(|l| l.chars().count()).max().unwrap_or(0) as u16 + 2;
    let h = text.lines().count() as u16 + 2;
    if w > bounds.width || h > bounds.height { return; }

    let right = bounds.x + bounds.width;
    let x = if col + 2 + w <= right { col + 2 } else { col.saturating_sub(w + 1).max(bounds.x) };
    let y = row.min(bounds.y + bounds.height - h).max(bounds.y);
    let rect = Rect::new(x, y, w, h);

    f.render_widget(Clear, rect);
    f.render_widget(
        Paragraph::new(text.to_string())
            .style(theme.tooltip)
            .block(Block::default().borders(Borders::ALL).border_style(theme.tooltip)),
        rect,
    );
}

/// Single-line text at (x, y), clipped to `bounds`.
fn put(f: &mut Frame, bounds: Rect, x: u16, y: u16, text: &str, style: Style) {
    let rect = Rect::new(x, y, text.chars().count() as u16, 1).intersection(bounds);
    if rect.is_empty() { return; }
    f.render_widget(Paragraph::new(text.to_string()).style(style), rect);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn geometry() -> PlotGeometry {
        PlotGeometry {
            area:     Rect::new(0, 0, 40, 10),
            x_bounds: [0.0, 10.0],
            y_bounds: [0.0, 10.0],
        }
    }

    fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buf = terminal.backend().buffer();
        (0..buf.area.width).map(|x| buf[(x, y)].symbol().to_string()).collect()
    }

    #[test]
    fn marker_label_sits_on_top_row() {
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        let marker = ReferenceMarker { index: 2, x: 5.0, values: Default::default() };
        terminal.draw(|f| {
            let mut s = ChartSurface::new(&theme, geometry());
            s.draw_series(Channel::System, vec![(0.0, 1.0), (10.0, 2.0)]);
            s.draw_marker(&marker);
            s.finish(f);
        }).unwrap();
        assert!(row_text(&terminal, 0).contains("T2"));
    }

    #[test]
    fn tooltip_flips_left_near_right_edge() {
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        let readout = CursorReadout {
            sample: crate::models::sample::Sample { time: 9.5, value: 1.0 },
            column: 38,
            row: 2,
        };
        terminal.draw(|f| {
            let mut s = ChartSurface::new(&theme, geometry());
            s.show_tooltip(&readout, "Time: 9.5m\nUsage: 1.0GB");
            s.finish(f);
        }).unwrap();
        let line = row_text(&terminal, 3);
        let at = line.find("Time: 9.5m").unwrap();
        assert!(at < 38);
    }
}
