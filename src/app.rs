use crate::collectors::docker::{self, DockerCli};
use crate::collectors::docker_worker::DockerWorker;
use crate::collectors::{disk, mounts};
use crate::config::Config;
use crate::input::{handle_key, Action};
use crate::models::marker::{tolerance_for, MarkerToggle, MAX_MARKERS};
use crate::models::session::{Readings, RunState, Session};
use crate::ui::cursor::Cursor;
use crate::ui::plot::{PanDirection, PlotGeometry, Viewport, YAxis};
use crate::ui::theme::{Theme, ThemeVariant};
use crate::ui::{dashboard, help};
use anyhow::Result;
use crossterm::event::{self, Event, MouseButton, MouseEventKind};
use log::{debug, info, warn};
use std::sync::mpsc;
use std::time::{Duration, Instant};

/// Event poll granularity; also bounds hover latency.
const POLL_TIMEOUT: Duration = Duration::from_millis(33);
const STATUS_TTL:   Duration = Duration::from_secs(3);

pub struct App {
    pub config:        Config,
    pub theme:         Theme,
    pub theme_variant: ThemeVariant,
    pub show_help:     bool,

    pub session:  Session,
    pub viewport: Viewport,
    pub y_axis:   YAxis,
    pub cursor:   Cursor,
    /// Where the plot was last drawn; set by the renderer
    pub plot_geometry: Option<PlotGeometry>,

    /// Mount point whose filesystem is sampled
    pub system_path: String,
    docker:          Option<DockerWorker>,

    tick:      Duration,
    last_tick: Option<Instant>,

    // Background container listing for `c`
    containers_tx:      mpsc::Sender<Vec<String>>,
    containers_rx:      mpsc::Receiver<Vec<String>>,
    containers_pending: bool,

    status:      Option<(String, Instant)>,
    dirty:       bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, initial_theme: ThemeVariant) -> Result<Self> {
        let (containers_tx, containers_rx) = mpsc::channel();
        let unit = config.plot.time_unit;

        let docker = if config.docker_enabled() {
            Some(spawn_worker(&config, config.docker.container_filter.clone())?)
        } else {
            info!("docker channel disabled");
            None
        };

        Ok(Self {
            theme:         Theme::for_variant(initial_theme),
            theme_variant: initial_theme,
            show_help:     false,
            session:       Session::new(unit, config.max_samples()),
            viewport:      Viewport::new(unit.live_pad(), unit.min_window()),
            y_axis:        YAxis::new(),
            cursor:        Cursor::new(config.plot.hover_rate_hz),
            plot_geometry: None,
            system_path:   config.general.path.clone(),
            docker,
            tick:          config.tick(),
            last_tick:     None,
            containers_tx,
            containers_rx,
            containers_pending: false,
            status:        None,
            dirty:         true,
            should_quit:   false,
            config,
        })
    }

    // ── Main event loop ───────────────────────────────────────────────

    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut ratatui::Terminal<B>,
    ) -> Result<()> {
        loop {
            self.consume_container_list();

            let now = Instant::now();
            if self.last_tick.map_or(true, |t| now.saturating_duration_since(t) >= self.tick) {
                self.last_tick = Some(now);
                if let Err(e) = self.sample(now) {
                    warn!("sample dropped: {:#}", e);
                }
                self.dirty = true;
            }

            if self.status.as_ref().is_some_and(|(_, at)| at.elapsed() >= STATUS_TTL) {
                self.status = None;
                self.dirty = true;
            }

            if self.dirty {
                let show_help  = self.show_help;
                let theme_snap = self.theme.clone();
                terminal.draw(|f| {
                    dashboard::render(f, self);
                    if show_help {
                        help::render(f, &theme_snap);
                    }
                })?;
                self.dirty = false;
            }

            if event::poll(POLL_TIMEOUT)? {
                match event::read()? {
                    Event::Key(key) => {
                        let action = handle_key(key);
                        self.handle_action(action);
                    }
                    Event::Mouse(me) => match me.kind {
                        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                            self.handle_pointer(Instant::now(), me.column, me.row);
                        }
                        MouseEventKind::Down(MouseButton::Left) => {
                            self.handle_click(me.column, me.row);
                        }
                        MouseEventKind::ScrollUp   => self.handle_action(Action::ZoomIn),
                        MouseEventKind::ScrollDown => self.handle_action(Action::ZoomOut),
                        _ => {}
                    },
                    Event::Resize(_, _) => {
                        self.cursor.hide();
                        self.dirty = true;
                    }
                    _ => {}
                }
            }

            if self.should_quit { break; }
        }
        Ok(())
    }

    // ── Sampling ──────────────────────────────────────────────────────

    /// One timer tick: read both channels and append them to the session.
    pub fn sample(&mut self, now: Instant) -> Result<()> {
        let readings = Readings {
            system: disk::read_system_usage(&self.system_path, self.config.general.units),
            docker: self.docker.as_ref().and_then(DockerWorker::latest),
        };
        let recorded = self.session.record(now, readings);

        if self.y_axis.update(self.session.max_capacity()) {
            debug!("y range now {:?}", self.y_axis.bounds());
        }
        self.viewport.observe(self.latest_time());
        recorded.map(|_| ())
    }

    pub fn latest_time(&self) -> f64 {
        self.session.max_time().unwrap_or(0.0)
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        self.viewport.bounds(self.latest_time())
    }

    pub fn docker_enabled(&self) -> bool {
        self.docker.is_some()
    }

    pub fn docker_target(&self) -> Option<&str> {
        self.docker.as_ref().map(DockerWorker::target)
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_ref().map(|(s, _)| s.as_str())
    }

    fn flash(&mut self, msg: impl Into<String>) {
        self.status = Some((msg.into(), Instant::now()));
    }

    // ── Input dispatch ────────────────────────────────────────────────

    pub fn handle_action(&mut self, action: Action) {
        self.dirty = true;
        if self.show_help {
            match action {
                Action::Quit     => self.should_quit = true,
                Action::ShowHelp | Action::Back => { self.show_help = false; }
                _ => {}
            }
            return;
        }

        let latest = self.latest_time();
        // Zoom and pan move the x mapping under the pointer
        if matches!(
            action,
            Action::ZoomIn | Action::ZoomOut | Action::ZoomReset
                | Action::PanLeft | Action::PanRight | Action::JumpLive
        ) {
            self.cursor.hide();
        }
        match action {
            Action::Quit => self.should_quit = true,

            Action::TogglePause => {
                let state = self.session.toggle_pause();
                info!("sampling {}", state.label().to_lowercase());
                if state == RunState::Running {
                    self.last_tick = None;
                }
            }

            Action::Reset => {
                self.session.reset();
                self.y_axis.update(None);
                self.viewport.reset_zoom(0.0);
                self.cursor.hide();
                self.last_tick = None;
                info!("session reset");
            }

            Action::ZoomIn    => self.viewport.zoom_in(latest),
            Action::ZoomOut   => self.viewport.zoom_out(latest),
            Action::ZoomReset => self.viewport.reset_zoom(latest),
            Action::PanLeft   => self.viewport.pan(PanDirection::Left, latest),
            Action::PanRight  => self.viewport.pan(PanDirection::Right, latest),
            Action::JumpLive  => self.viewport.follow_live(latest),

            Action::CycleDrive     => self.cycle_drive(),
            Action::CycleContainer => self.request_container_list(),

            Action::CycleTheme => {
                self.theme_variant = self.theme_variant.next();
                self.theme = Theme::for_variant(self.theme_variant);
            }

            Action::ShowHelp => self.show_help = true,
            Action::Back     => { self.cursor.hide(); }
            Action::None     => { self.dirty = false; }
        }
    }

    // ── Mouse ─────────────────────────────────────────────────────────

    pub fn handle_pointer(&mut self, now: Instant, col: u16, row: u16) {
        if self.cursor.on_move(now, &self.session, self.plot_geometry.as_ref(), col, row) {
            self.dirty = true;
        }
    }

    pub fn handle_click(&mut self, col: u16, row: u16) {
        if self.show_help { return; }
        let Some(x) = self.plot_geometry.and_then(|g| g.x_at(col, row)) else { return };

        let tolerance = tolerance_for(self.viewport.visible_width(self.latest_time()));
        match self.session.toggle_marker(x, tolerance) {
            MarkerToggle::Added(i)   => debug!("marker T{} added at {:.3}", i, x),
            MarkerToggle::Removed(i) => debug!("marker T{} removed", i),
            MarkerToggle::Ignored if self.session.markers().len() >= MAX_MARKERS => {
                self.flash(format!("At most {} markers; click one to remove it", MAX_MARKERS));
            }
            MarkerToggle::Ignored => {}
        }
        self.dirty = true;
    }

    // ── Target selection ──────────────────────────────────────────────

    fn cycle_drive(&mut self) {
        let mounts = mounts::list_mounts();
        match next_after(&mounts, &self.system_path) {
            Some(next) if *next != self.system_path => {
                info!("monitoring {} (was {})", next, self.system_path);
                self.system_path = next.clone();
                self.flash(format!("Volume: {}", next));
                self.retarget();
            }
            _ => self.flash("No other volume mounted"),
        }
    }

    fn request_container_list(&mut self) {
        if !self.docker_enabled() {
            self.flash("Docker channel disabled (set docker.container_filter)");
            return;
        }
        if self.containers_pending { return; }
        self.containers_pending = true;

        let tx     = self.containers_tx.clone();
        let binary = self.config.docker.binary.clone();
        let filter = self.config.docker.container_filter.clone();
        std::thread::spawn(move || {
            let names = docker::list_matching(&DockerCli::new(binary), &filter);
            let _ = tx.send(names);
        });
    }

    fn consume_container_list(&mut self) {
        while let Ok(names) = self.containers_rx.try_recv() {
            self.containers_pending = false;
            self.dirty = true;
            // The worker may hold the filter substring; compare by the
            // container it actually samples.
            let target  = self.docker_target().unwrap_or_default().to_string();
            let current = docker::resolve(&names, &target).cloned().unwrap_or(target);
            match next_after(&names, &current) {
                None => self.flash(format!(
                    "No running container matches '{}'", self.config.docker.container_filter
                )),
                Some(next) if *next == current => self.flash("No other matching container"),
                Some(next) => {
                    let next = next.clone();
                    if let Err(e) = self.switch_container(next) {
                        warn!("container switch failed: {:#}", e);
                        self.flash("Container switch failed (see log)");
                    }
                }
            }
        }
    }

    fn switch_container(&mut self, name: String) -> Result<()> {
        // Stop the old poller before starting the new one
        self.docker = None;
        self.docker = Some(spawn_worker(&self.config, name.clone())?);
        info!("docker channel now follows {}", name);
        self.flash(format!("Container: {}", name));
        self.retarget();
        Ok(())
    }

    fn retarget(&mut self) {
        self.session.retarget();
        self.y_axis.update(None);
        self.cursor.hide();
        self.last_tick = None;
    }
}

fn spawn_worker(config: &Config, target: String) -> Result<DockerWorker> {
    DockerWorker::spawn(
        DockerCli::new(config.docker.binary.clone()),
        target,
        config.docker.units,
        config.docker_interval(),
    )
}

/// Entry following `current` in `items`, wrapping; the first entry when
/// `current` is not listed.
fn next_after<'a>(items: &'a [String], current: &str) -> Option<&'a String> {
    match items.iter().position(|s| s == current) {
        Some(i) => items.get((i + 1) % items.len()),
        None    => items.first(),
    }
}
