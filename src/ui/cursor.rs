use crate::models::sample::Sample;
use crate::models::session::Session;
use crate::models::units::TimeUnit;
use crate::ui::plot::PlotGeometry;
use crate::util::human::{fmt_elapsed, fmt_gb};
use std::time::{Duration, Instant};

/// Rate limiter for pointer-driven redraws.
#[derive(Debug, Clone)]
pub struct Throttle {
    min_gap: Duration,
    last:    Option<Instant>,
}

impl Throttle {
    pub fn per_second(rate: u32) -> Self {
        let rate = rate.max(1);
        Self { min_gap: Duration::from_secs(1) / rate, last: None }
    }

    /// `true` when at least one period has passed since the last allowed call.
    pub fn allow(&mut self, now: Instant) -> bool {
        match self.last {
            Some(prev) if now.saturating_duration_since(prev) < self.min_gap => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorReadout {
    /// Nearest System sample
    pub sample: Sample,
    pub column: u16,
    pub row:    u16,
}

/// Hover state over the plot.
#[derive(Debug, Clone)]
pub struct Cursor {
    throttle: Throttle,
    readout:  Option<CursorReadout>,
}

impl Cursor {
    pub fn new(rate_hz: u32) -> Self {
        Self { throttle: Throttle::per_second(rate_hz), readout: None }
    }

    /// Track a pointer move. Leaving the plot or the data domain hides the
    /// readout at once; showing or moving it is rate limited.
    /// Returns `true` when a redraw is needed.
    pub fn on_move(
        &mut self,
        now:      Instant,
        session:  &Session,
        geometry: Option<&PlotGeometry>,
        column:   u16,
        row:      u16,
    ) -> bool {
        let hit = geometry
            .and_then(|g| g.x_at(column, row))
            .and_then(|x| session.sample_near(x));

        let Some(sample) = hit else {
            return self.hide();
        };
        if !self.throttle.allow(now) {
            return false;
        }
        self.readout = Some(CursorReadout { sample, column, row });
        true
    }

    pub fn hide(&mut self) -> bool {
        self.readout.take().is_some()
    }

    pub fn readout(&self) -> Option<&CursorReadout> {
        self.readout.as_ref()
    }
}

pub fn tooltip_text(readout: &CursorReadout, unit: TimeUnit) -> String {
    format!(
        "Time: {}\nUsage: {}",
        fmt_elapsed(readout.sample.time, unit),
        fmt_gb(readout.sample.value)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::Readings;
    use crate::models::usage::DiskUsage;
    use ratatui::layout::Rect;

    fn session() -> Session {
        let mut s = Session::new(TimeUnit::Seconds, None);
        let t0 = Instant::now();
        for i in 0..5u64 {
            let r = Readings { system: DiskUsage::from_gb(500.0, 400.0 - i as f64), docker: None };
            s.record(t0 + Duration::from_secs(i), r).unwrap();
        }
        s
    }

    fn geometry() -> PlotGeometry {
        PlotGeometry {
            area:     Rect::new(0, 0, 100, 10),
            x_bounds: [0.0, 10.0],
            y_bounds: [0.0, 525.0],
        }
    }

    #[test]
    fn throttle_limits_rate() {
        let mut t = Throttle::per_second(30);
        let t0 = Instant::now();
        assert!(t.allow(t0));
        assert!(!t.allow(t0 + Duration::from_millis(10)));
        assert!(t.allow(t0 + Duration::from_millis(40)));
    }

    #[test]
    fn shows_nearest_sample_inside_domain() {
        let s = session();
        let g = geometry();
        let mut c = Cursor::new(30);
        // column 22 → x = 2.25 → nearest sample t=2
        assert!(c.on_move(Instant::now(), &s, Some(&g), 22, 3));
        let r = c.readout().unwrap();
        assert_eq!(r.sample.time, 2.0);
        assert_eq!(r.sample.value, 102.0);
        assert_eq!(tooltip_text(r, TimeUnit::Seconds), "Time: 2.0s\nUsage: 102.0GB");
    }

    #[test]
    fn hides_outside_plot_or_data() {
        let s = session();
        let g = geometry();
        let mut c = Cursor::new(30);
        let t0 = Instant::now();
        c.on_move(t0, &s, Some(&g), 10, 3);
        assert!(c.readout().is_some());

        // x = 6.05, past the last sample: hidden immediately, not throttled
        assert!(c.on_move(t0, &s, Some(&g), 60, 3));
        assert!(c.readout().is_none());

        c.on_move(t0 + Duration::from_secs(1), &s, Some(&g), 10, 3);
        assert!(c.on_move(t0 + Duration::from_secs(1), &s, Some(&g), 10, 20));
        assert!(c.readout().is_none());
        assert!(!c.on_move(t0, &s, None, 10, 3));
    }

    #[test]
    fn rapid_moves_are_coalesced() {
        let s = session();
        let g = geometry();
        let mut c = Cursor::new(30);
        let t0 = Instant::now();
        assert!(c.on_move(t0, &s, Some(&g), 10, 3));
        assert!(!c.on_move(t0 + Duration::from_millis(5), &s, Some(&g), 30, 3));
        assert_eq!(c.readout().unwrap().sample.time, 1.0);
        assert!(c.on_move(t0 + Duration::from_millis(50), &s, Some(&g), 30, 3));
        assert_eq!(c.readout().unwrap().sample.time, 3.0);
    }
}
