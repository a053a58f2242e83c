use crate::models::marker::{MarkerSet, MarkerToggle};
use crate::models::sample::{Channel, Sample};
use crate::models::series::Series;
use crate::models::units::TimeUnit;
use crate::models::usage::{DiskUsage, DockerUsage};
use anyhow::Result;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
}

impl RunState {
    pub fn toggled(self) -> Self {
        match self {
            RunState::Running => RunState::Paused,
            RunState::Paused  => RunState::Running,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RunState::Running => "Running",
            RunState::Paused  => "Paused",
        }
    }
}

/// One tick's worth of sampler output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Readings {
    pub system: DiskUsage,
    pub docker: Option<DockerUsage>,
}

/// Everything the plot shows: series, markers, capacities and run state.
#[derive(Debug, Clone)]
pub struct Session {
    time_unit:  TimeUnit,
    start_time: Option<Instant>,
    system:     Series,
    docker:     Series,
    markers:    MarkerSet,
    system_capacity: Option<f64>,
    docker_capacity: Option<f64>,
    latest:     Option<Readings>,
    state:      RunState,
}

impl Session {
    pub fn new(time_unit: TimeUnit, max_samples: Option<usize>) -> Self {
        Self {
            time_unit,
            start_time: None,
            system:     Series::new(Channel::System, max_samples),
            docker:     Series::new(Channel::Docker, max_samples),
            markers:    MarkerSet::new(),
            system_capacity: None,
            docker_capacity: None,
            latest:     None,
            state:      RunState::Running,
        }
    }

    /// Append one tick of readings at `now`. The first recorded sample fixes
    /// the session start. Returns `Ok(false)` while paused.
    pub fn record(&mut self, now: Instant, readings: Readings) -> Result<bool> {
        if self.state == RunState::Paused {
            return Ok(false);
        }
        let start = *self.start_time.get_or_insert(now);
        let t = self.time_unit.from_duration(now.saturating_duration_since(start));

        self.system.append(t, readings.system.used_gb)?;
        self.system_capacity = Some(readings.system.total_gb).filter(|c| *c > 0.0);

        match readings.docker {
            Some(d) => {
                self.docker.append(t, d.used_gb)?;
                self.docker_capacity = Some(d.total_gb).filter(|c| *c > 0.0);
            }
            None => self.docker_capacity = None,
        }

        self.latest = Some(readings);
        Ok(true)
    }

    /// Clear samples, markers, capacities and the start time.
    pub fn reset(&mut self) {
        self.clear_data();
        self.markers.clear();
        self.start_time = None;
    }

    /// Switch to a different volume or container: history is dropped and
    /// capacities are re-read on the next sample. Markers and the elapsed-time
    /// origin are kept.
    pub fn retarget(&mut self) {
        self.clear_data();
    }

    fn clear_data(&mut self) {
        self.system.clear();
        self.docker.clear();
        self.system_capacity = None;
        self.docker_capacity = None;
        self.latest = None;
    }

    pub fn toggle_pause(&mut self) -> RunState {
        self.state = self.state.toggled();
        self.state
    }

    pub fn toggle_marker(&mut self, x: f64, tolerance: f64) -> MarkerToggle {
        self.markers.toggle_at(x, tolerance, &self.system, &[&self.docker])
    }

    /// Nearest system sample to `x`, only when `x` lies within the data domain.
    pub fn sample_near(&self, x: f64) -> Option<Sample> {
        let max = self.max_time()?;
        if !(0.0..=max).contains(&x) { return None; }
        self.system.nearest(x)
    }

    pub fn series(&self, channel: Channel) -> &Series {
        match channel {
            Channel::System => &self.system,
            Channel::Docker => &self.docker,
        }
    }

    pub fn capacity(&self, channel: Channel) -> Option<f64> {
        match channel {
            Channel::System => self.system_capacity,
            Channel::Docker => self.docker_capacity,
        }
    }

    /// Largest known capacity across channels; fixes the Y range.
    pub fn max_capacity(&self) -> Option<f64> {
        Channel::ALL.iter()
            .filter_map(|c| self.capacity(*c))
            .fold(None, |acc: Option<f64>, c| Some(acc.map_or(c, |a| a.max(c))))
    }

    pub fn max_time(&self) -> Option<f64> { self.system.max_time() }
    pub fn markers(&self) -> &MarkerSet { &self.markers }
    pub fn latest(&self) -> Option<&Readings> { self.latest.as_ref() }
    pub fn state(&self) -> RunState { self.state }
    pub fn is_paused(&self) -> bool { self.state == RunState::Paused }
    pub fn time_unit(&self) -> TimeUnit { self.time_unit }
    pub fn has_started(&self) -> bool { self.start_time.is_some() }
}
