use crate::models::units::ByteBase;
use crate::util::human::{fmt_pct, fmt_used_total};
use serde::Serialize;

/// Usage of the monitored volume, in GB.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DiskUsage {
    pub total_gb:     f64,
    pub used_gb:      f64,
    pub available_gb: f64,
    pub percent:      f64,
}

impl DiskUsage {
    /// used = total − available; percent is 0 for an empty volume.
    pub fn from_gb(total_gb: f64, available_gb: f64) -> Self {
        let used_gb = (total_gb - available_gb).max(0.0);
        let percent = if total_gb > 0.0 { used_gb / total_gb * 100.0 } else { 0.0 };
        Self { total_gb, used_gb, available_gb, percent }
    }

    pub fn from_bytes(total: u64, available: u64, base: ByteBase) -> Self {
        Self::from_gb(base.gb_from_bytes(total), base.gb_from_bytes(available))
    }
}

/// Root filesystem usage inside the tracked container, in GB.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DockerUsage {
    pub total_gb: f64,
    pub used_gb:  f64,
}

impl DockerUsage {
    pub fn percent(&self) -> f64 {
        if self.total_gb > 0.0 { self.used_gb / self.total_gb * 100.0 } else { 0.0 }
    }
}

/// One-line status shown above the plot.
///
/// `docker` is only consulted when the Docker channel is enabled; a missing
/// reading renders as "Not Available".
pub fn info_line(system: &DiskUsage, docker_enabled: bool, docker: Option<&DockerUsage>) -> String {
    let mut s = format!(
        "System: {} ({})",
        fmt_used_total(system.used_gb, system.total_gb),
        fmt_pct(system.percent)
    );
    if docker_enabled {
        match docker {
            Some(d) => s.push_str(&format!(
                "  •  Docker: {} ({})",
                fmt_used_total(d.used_gb, d.total_gb),
                fmt_pct(d.percent())
            )),
            None => s.push_str("  •  Docker: Not Available"),
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn used_and_percent_derive_from_total_and_available() {
        let u = DiskUsage::from_gb(500.0, 200.0);
        assert_eq!(u.used_gb, 300.0);
        assert!((u.percent - 60.0).abs() < 1e-9);
        assert_eq!(u.available_gb, 200.0);
    }

    #[test]
    fn byte_conversion_keeps_invariants() {
        let total = 512u64 << 30;
        let avail = 128u64 << 30;
        let u = DiskUsage::from_bytes(total, avail, ByteBase::Binary);
        assert!((u.total_gb - 512.0).abs() < 1e-9);
        assert!((u.used_gb - (u.total_gb - u.available_gb)).abs() < 1e-9);
        assert!((u.percent - u.used_gb / u.total_gb * 100.0).abs() < 1e-9);
    }

    #[test]
    fn empty_volume_has_zero_percent() {
        let u = DiskUsage::from_gb(0.0, 0.0);
        assert_eq!(u, DiskUsage::default());
    }

    #[test]
    fn info_line_reports_docker_when_available() {
        let sys = DiskUsage::from_gb(500.0, 200.0);
        let doc = DockerUsage { total_gb: 1.0, used_gb: 0.5 };
        let line = info_line(&sys, true, Some(&doc));
        assert_eq!(
            line,
            "System: 300.0/500.0GB (60.0%)  •  Docker: 0.5/1.0GB (50.0%)"
        );
    }

    #[test]
    fn info_line_marks_missing_docker_as_not_available() {
        let sys = DiskUsage::from_gb(500.0, 200.0);
        let line = info_line(&sys, true, None);
        assert!(line.contains("Docker: Not Available"));
    }

    #[test]
    fn info_line_omits_disabled_docker() {
        let sys = DiskUsage::from_gb(500.0, 200.0);
        assert!(!info_line(&sys, false, None).contains("Docker"));
    }
}
