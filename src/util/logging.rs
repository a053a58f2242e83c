use anyhow::{Context, Result};
use log::LevelFilter;
use std::fs;
use std::path::PathBuf;

/// The TUI owns stdout, so log lines go to ~/.local/share/dplot/dplot.log.
pub fn log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("dplot").join("dplot.log"))
}

pub fn init(level: LevelFilter) -> Result<PathBuf> {
    let path = log_path().context("no data dir")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} {:<5} {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(fern::log_file(&path).with_context(|| format!("open {}", path.display()))?)
        .apply()?;
    Ok(path)
}

/// "debug", "WARN", "off" … ; anything unrecognised falls back to info.
pub fn parse_level(name: &str) -> LevelFilter {
    name.trim().parse().unwrap_or(LevelFilter::Info)
}
