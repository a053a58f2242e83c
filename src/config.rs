use crate::models::units::{ByteBase, TimeUnit};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub plot: PlotConfig,

    #[serde(default)]
    pub docker: DockerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Sampling tick in milliseconds
    pub update_interval_ms: u64,
    /// Path whose filesystem is monitored
    pub path: String,
    /// Byte → GB divisor for the system volume
    pub units: ByteBase,
    /// Log level written to the log file: error, warn, info, debug, trace, off
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Elapsed-time axis unit: "seconds" or "minutes"
    pub time_unit: TimeUnit,
    /// Samples kept per series. 0 = keep the whole session.
    pub max_samples: usize,
    /// Color theme: default, dracula, gruvbox, nord
    pub theme: String,
    /// Maximum cursor readout updates per second
    pub hover_rate_hz: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DockerConfig {
    pub enabled: bool,
    /// Container runtime CLI (docker, podman, …)
    pub binary: String,
    /// Case-insensitive substring of the container name. Empty = Docker channel off.
    pub container_filter: String,
    /// Docker poll interval in milliseconds; independent of the UI tick
    pub interval_ms: u64,
    /// KB → GB divisor for `df -k` output inside the container
    pub units: ByteBase,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: 1000,
            path:               "/".into(),
            units:              ByteBase::Binary,
            log_level:          "info".into(),
        }
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            time_unit:     TimeUnit::Minutes,
            max_samples:   0,
            theme:         "default".into(),
            hover_rate_hz: 30,
        }
    }
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            enabled:          true,
            binary:           "docker".into(),
            container_filter: String::new(),
            interval_ms:      1000,
            units:            ByteBase::Binary,
        }
    }
}

// ── Derived values ───────────────────────────────────────────────────

impl Config {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.general.update_interval_ms.max(100))
    }

    pub fn docker_interval(&self) -> Duration {
        Duration::from_millis(self.docker.interval_ms.max(250))
    }

    pub fn max_samples(&self) -> Option<usize> {
        Some(self.plot.max_samples).filter(|n| *n > 0)
    }

    pub fn docker_enabled(&self) -> bool {
        self.docker.enabled && !self.docker.container_filter.trim().is_empty()
    }
}

// ── Load / Save ───────────────────────────────────────────────────────

impl Config {
    /// Load the user config. Only a missing file falls back to the defaults
    /// (and writes them out); an unreadable or malformed file is an error.
    pub fn load() -> Result<Self> {
        match Config::config_path() {
            Some(path) => Config::load_from(&path),
            None       => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Config::from_toml(&text)
                .with_context(|| format!("invalid config file {}", path.display())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                // Write defaults on first run (best-effort)
                let _ = try_write_defaults(path);
                Ok(Config::default())
            }
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dplot").join("dplot.toml"))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

fn try_write_defaults(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = toml::to_string_pretty(&Config::default())?;
    fs::write(path, format!("# dplot configuration\n# Generated on first run, edit freely\n\n{}", text))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip_through_toml() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        let cfg = Config::from_toml(&text).unwrap();
        assert_eq!(cfg.general.update_interval_ms, 1000);
        assert_eq!(cfg.plot.time_unit, TimeUnit::Minutes);
        assert_eq!(cfg.docker.units, ByteBase::Binary);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let cfg = Config::from_toml(
            "[plot]\nmax_samples = 600\ntime_unit = \"seconds\"\n\n\
             [docker]\ncontainer_filter = \"prokit_database\"\nunits = \"decimal\"\n",
        ).unwrap();
        assert_eq!(cfg.max_samples(), Some(600));
        assert_eq!(cfg.plot.time_unit, TimeUnit::Seconds);
        assert_eq!(cfg.plot.hover_rate_hz, 30);
        assert_eq!(cfg.general.path, "/");
        assert_eq!(cfg.docker.units, ByteBase::Decimal);
        assert!(cfg.docker_enabled());
    }

    #[test]
    fn docker_needs_a_filter() {
        let mut cfg = Config::default();
        assert!(!cfg.docker_enabled());
        cfg.docker.container_filter = "db".into();
        assert!(cfg.docker_enabled());
        cfg.docker.enabled = false;
        assert!(!cfg.docker_enabled());
    }

    #[test]
    fn zero_max_samples_means_unbounded() {
        assert_eq!(Config::default().max_samples(), None);
    }

    #[test]
    fn intervals_are_clamped() {
        let mut cfg = Config::default();
        cfg.general.update_interval_ms = 1;
        cfg.docker.interval_ms = 1;
        assert_eq!(cfg.tick(), Duration::from_millis(100));
        assert_eq!(cfg.docker_interval(), Duration::from_millis(250));
    }

    #[test]
    fn unknown_unit_is_rejected() {
        assert!(Config::from_toml("[general]\nunits = \"octal\"\n").is_err());
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("dplot-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn malformed_file_is_reported_not_replaced() {
        let dir  = scratch_dir("bad-config");
        let path = dir.join("dplot.toml");
        fs::create_dir_all(&dir).unwrap();
        let text = "[general]\nunits = \"octal\"\npath = \"/home\"\n\n[docker]\ncontainer_filter = \"db\"\n";
        fs::write(&path, text).unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("dplot.toml"));
        // The user's file is left alone
        assert_eq!(fs::read_to_string(&path).unwrap(), text);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_writes_and_returns_defaults() {
        let dir  = scratch_dir("first-run");
        let path = dir.join("dplot.toml");

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.general.path, "/");
        let written = Config::load_from(&path).unwrap();
        assert_eq!(written.plot.hover_rate_hz, 30);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn valid_file_is_loaded() {
        let dir  = scratch_dir("good-config");
        let path = dir.join("dplot.toml");
        fs::create_dir_all(&dir).unwrap();
        fs::write(&path, "[general]\npath = \"/home\"\n\n[docker]\ncontainer_filter = \"db\"\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.general.path, "/home");
        assert!(cfg.docker_enabled());
        let _ = fs::remove_dir_all(&dir);
    }
}
