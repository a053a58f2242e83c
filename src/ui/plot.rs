//! Plot state that does not depend on the drawing backend: the visible time
//! window, the fixed Y range, tick selection and screen ↔ data mapping.

use ratatui::layout::Rect;

/// Headroom above the largest capacity.
pub const Y_PADDING: f64 = 0.05;
/// Y range used before any capacity is known.
const Y_FALLBACK: f64 = 1.0;

const GB_STEPS: &[f64] = &[1.0, 5.0, 10.0, 50.0, 100.0, 250.0, 500.0, 1000.0];

/// Fraction of the visible width moved by one pan step.
const PAN_FRACTION: f64 = 0.25;

// ── Ticks ─────────────────────────────────────────────────────────────

/// Smallest step in `steps` that yields at most `max_ticks` intervals over
/// `range`. Ranges beyond the table use a multiple of its largest step.
pub fn choose_step(range: f64, steps: &[f64], max_ticks: usize) -> f64 {
    let max_ticks = max_ticks.max(1) as f64;
    let range = if range.is_finite() && range > 0.0 { range } else { 0.0 };
    if let Some(step) = steps.iter().copied().find(|s| range / s <= max_ticks) {
        return step;
    }
    let largest = steps.last().copied().unwrap_or(1.0);
    largest * (range / (largest * max_ticks)).ceil()
}

/// Multiples of `step` within `[lo, hi]`.
pub fn ticks(lo: f64, hi: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0) || !(hi >= lo) { return Vec::new(); }
    let eps = step * 1e-9;
    let mut out = Vec::new();
    let mut k = (lo / step).ceil();
    loop {
        let v = k * step;
        if v > hi + eps || out.len() > 64 { break; }
        out.push(v);
        k += 1.0;
    }
    out
}

pub fn gb_ticks(max: f64, max_ticks: usize) -> Vec<f64> {
    ticks(0.0, max, choose_step(max, GB_STEPS, max_ticks))
}

// ── Y axis ────────────────────────────────────────────────────────────

/// Y range `[0, capacity × 1.05]`. Only changes when the capacity does; it is
/// never fitted to the data.
#[derive(Debug, Clone, PartialEq)]
pub struct YAxis {
    capacity: Option<f64>,
    max:      f64,
}

impl YAxis {
    pub fn new() -> Self {
        Self { capacity: None, max: Y_FALLBACK }
    }

    /// Returns `true` when the range was recomputed.
    pub fn update(&mut self, capacity: Option<f64>) -> bool {
        if capacity == self.capacity { return false; }
        self.capacity = capacity;
        self.max = capacity
            .filter(|c| c.is_finite() && *c > 0.0)
            .map(|c| c * (1.0 + Y_PADDING))
            .unwrap_or(Y_FALLBACK);
        true
    }

    pub fn bounds(&self) -> [f64; 2] { [0.0, self.max] }
}

impl Default for YAxis {
    fn default() -> Self { Self::new() }
}

// ── Viewport ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    Left,
    Right,
}

/// Visible time window. While `follow` is set the right edge tracks the newest
/// sample; panning away from the live edge stops that until the user zooms
/// out to everything, resets the zoom or pans back to the edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// `None` shows the whole session.
    width:      Option<f64>,
    right:      f64,
    follow:     bool,
    pad:        f64,
    min_width:  f64,
}

impl Viewport {
    pub fn new(pad: f64, min_width: f64) -> Self {
        Self { width: None, right: pad, follow: true, pad, min_width }
    }

    pub fn is_following(&self) -> bool { self.follow }
    pub fn is_zoomed(&self) -> bool { self.width.is_some() }

    fn live_edge(&self, latest: f64) -> f64 {
        latest.max(0.0) + self.pad
    }

    /// Keep up with a new sample at `latest` while following.
    pub fn observe(&mut self, latest: f64) {
        if self.follow {
            self.right = self.live_edge(latest);
        }
    }

    pub fn bounds(&self, latest: f64) -> [f64; 2] {
        let right = if self.follow { self.live_edge(latest) } else { self.right };
        match self.width {
            None    => [0.0, right.max(self.pad)],
            Some(w) => {
                let right = right.max(w);
                [(right - w).max(0.0), right]
            }
        }
    }

    pub fn visible_width(&self, latest: f64) -> f64 {
        let [l, r] = self.bounds(latest);
        r - l
    }

    pub fn pan(&mut self, dir: PanDirection, latest: f64) {
        let Some(w) = self.width else { return };
        let [_, right] = self.bounds(latest);
        let step = w * PAN_FRACTION;
        match dir {
            PanDirection::Left => {
                self.follow = false;
                self.right = (right - step).max(w);
            }
            PanDirection::Right => {
                let edge = self.live_edge(latest);
                if right + step >= edge {
                    self.follow_live(latest);
                } else {
                    self.right = right + step;
                }
            }
        }
    }

    pub fn zoom_in(&mut self, latest: f64) {
        let [l, r] = self.bounds(latest);
        let w = ((r - l) / 2.0).max(self.min_width);
        if !self.follow {
            // Zoom around the centre of the current window
            self.right = ((l + r) / 2.0 + w / 2.0).max(w);
        }
        self.width = Some(w);
    }

    pub fn zoom_out(&mut self, latest: f64) {
        let Some(w) = self.width else { return };
        let w = w * 2.0;
        if w >= self.live_edge(latest) {
            self.reset_zoom(latest);
            return;
        }
        if !self.follow {
            let [l, r] = self.bounds(latest);
            let centre = (l + r) / 2.0;
            self.right = (centre + w / 2.0).min(self.live_edge(latest)).max(w);
        }
        self.width = Some(w);
    }

    pub fn reset_zoom(&mut self, latest: f64) {
        self.width = None;
        self.follow_live(latest);
    }

    /// Jump back to the live edge and resume auto-scrolling.
    pub fn follow_live(&mut self, latest: f64) {
        self.follow = true;
        self.right = self.live_edge(latest);
    }
}

// ── Geometry ──────────────────────────────────────────────────────────

/// Where the plot was last drawn, for mapping pointer cells to data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotGeometry {
    pub area:     Rect,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl PlotGeometry {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.area.x
            && column < self.area.x + self.area.width
            && row >= self.area.y
            && row < self.area.y + self.area.height
    }

    /// Data x at the centre of the cell under the pointer.
    pub fn x_at(&self, column: u16, row: u16) -> Option<f64> {
        if !self.contains(column, row) { return None; }
        let [l, r] = self.x_bounds;
        let frac = ((column - self.area.x) as f64 + 0.5) / self.area.width as f64;
        Some(l + frac * (r - l))
    }

    /// Column holding data x, if it is visible.
    pub fn column_for(&self, x: f64) -> Option<u16> {
        let [l, r] = self.x_bounds;
        if self.area.width == 0 || !(l..=r).contains(&x) || r <= l { return None; }
        let offset = ((x - l) / (r - l) * self.area.width as f64).floor() as u16;
        Some(self.area.x + offset.min(self.area.width - 1))
    }
}
