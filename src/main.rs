mod app;
mod collectors;
mod config;
mod input;
mod models;
mod ui;
mod util;

use app::App;
use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use config::Config;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, warn};
use models::units::TimeUnit;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::panic;

#[derive(Parser, Debug)]
#[command(name = "dplot", about = "Live terminal plot of disk and Docker container usage", version)]
struct Cli {
    /// Sampling interval in milliseconds
    #[arg(short, long)]
    interval: Option<u64>,

    /// Path whose filesystem is monitored
    #[arg(short, long)]
    path: Option<String>,

    /// Follow the first running container whose name contains this (case-insensitive)
    #[arg(long)]
    container: Option<String>,

    /// Disable the Docker channel
    #[arg(long)]
    no_docker: bool,

    /// Samples kept per series (0 = whole session)
    #[arg(long)]
    max_samples: Option<usize>,

    /// Use seconds instead of minutes on the time axis
    #[arg(long)]
    seconds: bool,

    /// Color theme: default, dracula, gruvbox, nord
    #[arg(short = 't', long)]
    theme: Option<String>,

    /// Log level for the log file: error, warn, info, debug, trace, off
    #[arg(long)]
    log_level: Option<String>,

    /// Print a one-shot JSON snapshot of current usage and exit
    #[arg(long)]
    json: bool,

    /// Print config file path and effective values, then exit
    #[arg(long)]
    config: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

impl Cli {
    /// Flags take precedence over the config file.
    fn apply(&self, cfg: &mut Config) {
        if let Some(ms) = self.interval        { cfg.general.update_interval_ms = ms; }
        if let Some(p)  = &self.path           { cfg.general.path = p.clone(); }
        if let Some(c)  = &self.container      { cfg.docker.container_filter = c.clone(); }
        if self.no_docker                      { cfg.docker.enabled = false; }
        if let Some(n)  = self.max_samples     { cfg.plot.max_samples = n; }
        if self.seconds                        { cfg.plot.time_unit = TimeUnit::Seconds; }
        if let Some(t)  = &self.theme          { cfg.plot.theme = t.clone(); }
        if let Some(l)  = &self.log_level      { cfg.general.log_level = l.clone(); }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "dplot", &mut io::stdout());
        return Ok(());
    }

    let mut cfg = Config::load().context("loading config (fix or delete the file to use defaults)")?;
    cli.apply(&mut cfg);

    if cli.json {
        return run_json_snapshot(&cfg);
    }
    if cli.config {
        return run_print_config(&cfg);
    }

    // The TUI owns stdout, so logs go to a file; failing to open it is not fatal
    match util::logging::init(util::logging::parse_level(&cfg.general.log_level)) {
        Ok(path) => info!("dplot {} starting, logging to {}", env!("CARGO_PKG_VERSION"), path.display()),
        Err(e)   => eprintln!("dplot: logging disabled: {:#}", e),
    }

    let initial_theme = ui::theme::ThemeVariant::from_name(&cfg.plot.theme);

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    let result = run(cfg, initial_theme);
    restore_terminal()?;
    if let Err(e) = &result {
        warn!("exiting with error: {:#}", e);
    }
    result
}

fn run_json_snapshot(cfg: &Config) -> Result<()> {
    use collectors::{disk, docker};
    use serde_json::json;

    let system = disk::read_system_usage(&cfg.general.path, cfg.general.units);
    let container = if cfg.docker_enabled() {
        let runtime = docker::DockerCli::new(cfg.docker.binary.clone());
        let name    = docker::find_container(&runtime, &cfg.docker.container_filter);
        let usage   = name.as_deref()
            .and_then(|n| docker::read_docker_usage(&runtime, n, cfg.docker.units));
        Some(json!({
            "filter":    cfg.docker.container_filter,
            "container": name,
            "available": usage.is_some(),
            "total_gb":  usage.map(|u| u.total_gb),
            "used_gb":   usage.map(|u| u.used_gb),
            "percent":   usage.map(|u| u.percent()),
        }))
    } else {
        None
    };

    let snapshot = json!({
        "dplot_version": env!("CARGO_PKG_VERSION"),
        "timestamp":     chrono::Local::now().to_rfc3339(),
        "path":          cfg.general.path,
        "units":         cfg.general.units.label(),
        "system":        system,
        "docker":        container,
    });

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn run_print_config(cfg: &Config) -> Result<()> {
    let path = Config::config_path()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    let log = util::logging::log_path()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    println!("Config: {}", path);
    println!("Log:    {}", log);
    println!();
    println!("[general]");
    println!("  update_interval_ms = {}", cfg.general.update_interval_ms);
    println!("  path               = {}", cfg.general.path);
    println!("  units              = {}", cfg.general.units.label());
    println!("  log_level          = {}", cfg.general.log_level);
    println!();
    println!("[plot]");
    println!("  time_unit     = {:?}", cfg.plot.time_unit);
    match cfg.max_samples() {
        Some(n) => println!("  max_samples   = {}", n),
        None    => println!("  max_samples   = 0 (whole session)"),
    }
    println!("  theme         = {}", cfg.plot.theme);
    println!("  hover_rate_hz = {}", cfg.plot.hover_rate_hz);
    println!();
    println!("[docker]");
    println!("  enabled          = {}", cfg.docker.enabled);
    println!("  binary           = {}", cfg.docker.binary);
    let filter = if cfg.docker.container_filter.is_empty() { "(not set: channel off)" } else { cfg.docker.container_filter.as_str() };
    println!("  container_filter = {}", filter);
    println!("  interval_ms      = {}", cfg.docker.interval_ms);
    println!("  units            = {}", cfg.docker.units.label());
    Ok(())
}

fn run(cfg: Config, initial_theme: ui::theme::ThemeVariant) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut term = Terminal::new(backend)?;

    let mut app = App::new(cfg, initial_theme)?;
    app.run(&mut term)?;

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}
