use crate::models::marker::ReferenceMarker;
use crate::models::sample::Channel;
use crate::models::session::Session;
use crate::models::units::TimeUnit;
use crate::ui::cursor::{tooltip_text, CursorReadout};

/// What the plot needs from a drawing backend.
pub trait PlotSurface {
    fn draw_series(&mut self, channel: Channel, points: Vec<(f64, f64)>);
    /// Horizontal reference line at a channel's total size.
    fn draw_capacity(&mut self, channel: Channel, capacity_gb: f64);
    fn draw_marker(&mut self, marker: &ReferenceMarker);
    fn show_tooltip(&mut self, readout: &CursorReadout, text: &str);
}

/// Draw one frame of the session onto `surface` for the window `x_bounds`.
///
/// The System line is always drawn; the Docker line only once it has samples,
/// and its capacity line only while the container is available. The System
/// capacity is the top of the Y range and gets no line of its own.
pub fn render_plot(
    surface:  &mut dyn PlotSurface,
    session:  &Session,
    x_bounds: [f64; 2],
    cursor:   Option<&CursorReadout>,
    unit:     TimeUnit,
) {
    surface.draw_series(Channel::System, session.series(Channel::System).points_in(x_bounds));

    let docker = session.series(Channel::Docker);
    if !docker.is_empty() {
        surface.draw_series(Channel::Docker, docker.points_in(x_bounds));
    }
    if let Some(cap) = session.capacity(Channel::Docker) {
        surface.draw_capacity(Channel::Docker, cap);
    }

    let [lo, hi] = x_bounds;
    for m in session.markers().iter().filter(|m| m.x >= lo && m.x <= hi) {
        surface.draw_marker(m);
    }

    if let Some(r) = cursor {
        surface.show_tooltip(r, &tooltip_text(r, unit));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample::Sample;
    use crate::models::session::Readings;
    use crate::models::usage::{DiskUsage, DockerUsage};
    use std::time::{Duration, Instant};

    #[derive(Debug, PartialEq)]
    enum Call {
        Series(Channel, usize),
        Capacity(Channel, f64),
        Marker(String),
        Tooltip(String),
    }

    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<Call>,
    }

    impl PlotSurface for RecordingSurface {
        fn draw_series(&mut self, channel: Channel, points: Vec<(f64, f64)>) {
            self.calls.push(Call::Series(channel, points.len()));
        }
        fn draw_capacity(&mut self, channel: Channel, capacity_gb: f64) {
            self.calls.push(Call::Capacity(channel, capacity_gb));
        }
        fn draw_marker(&mut self, marker: &ReferenceMarker) {
            self.calls.push(Call::Marker(marker.label()));
        }
        fn show_tooltip(&mut self, _readout: &CursorReadout, text: &str) {
            self.calls.push(Call::Tooltip(text.to_string()));
        }
    }

    fn session(docker: Option<(f64, f64)>, n: u64) -> Session {
        let mut s = Session::new(TimeUnit::Seconds, None);
        let t0 = Instant::now();
        for i in 0..n {
            let r = Readings {
                system: DiskUsage::from_gb(500.0, 300.0),
                docker: docker.map(|(total_gb, used_gb)| DockerUsage { total_gb, used_gb }),
            };
            s.record(t0 + Duration::from_secs(i), r).unwrap();
        }
        s
    }

    #[test]
    fn system_only_session_draws_one_line() {
        let s = session(None, 3);
        let mut surf = RecordingSurface::default();
        render_plot(&mut surf, &s, [0.0, 10.0], None, TimeUnit::Seconds);
        assert_eq!(surf.calls, vec![Call::Series(Channel::System, 3)]);
    }

    #[test]
    fn available_container_adds_line_and_capacity() {
        let s = session(Some((1.0, 0.5)), 2);
        let mut surf = RecordingSurface::default();
        render_plot(&mut surf, &s, [0.0, 10.0], None, TimeUnit::Seconds);
        assert_eq!(surf.calls, vec![
            Call::Series(Channel::System, 2),
            Call::Series(Channel::Docker, 2),
            Call::Capacity(Channel::Docker, 1.0),
        ]);
    }

    #[test]
    fn only_visible_markers_are_drawn() {
        let mut s = session(None, 10);
        s.toggle_marker(1.0, 0.05);
        s.toggle_marker(8.0, 0.05);
        let mut surf = RecordingSurface::default();
        render_plot(&mut surf, &s, [5.0, 10.0], None, TimeUnit::Seconds);
        assert!(surf.calls.contains(&Call::Marker("T2".into())));
        assert!(!surf.calls.contains(&Call::Marker("T1".into())));
    }

    #[test]
    fn cursor_readout_becomes_tooltip() {
        let s = session(None, 2);
        let readout = CursorReadout {
            sample: Sample { time: 1.0, value: 200.0 },
            column: 5,
            row: 2,
        };
        let mut surf = RecordingSurface::default();
        render_plot(&mut surf, &s, [0.0, 10.0], Some(&readout), TimeUnit::Seconds);
        assert_eq!(
            surf.calls.last(),
            Some(&Call::Tooltip("Time: 1.0s\nUsage: 200.0GB".into()))
        );
    }
}
