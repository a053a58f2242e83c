use crate::models::units::TimeUnit;

/// Format a gigabyte value with one decimal: "120.4GB"
pub fn fmt_gb(gb: f64) -> String {
    format!("{:.1}GB", gb)
}

/// Format "used/total" in gigabytes: "300.0/500.0GB"
pub fn fmt_used_total(used_gb: f64, total_gb: f64) -> String {
    format!("{:.1}/{:.1}GB", used_gb, total_gb)
}

/// Format a percentage with one decimal: "84.5%"
pub fn fmt_pct(pct: f64) -> String {
    format!("{:.1}%", pct)
}

/// Format an elapsed-time coordinate in the session's unit: "3.2m", "45.0s"
pub fn fmt_elapsed(t: f64, unit: TimeUnit) -> String {
    format!("{:.1}{}", t, unit.suffix())
}

/// Short axis label; drops the decimal when the value is whole.
pub fn fmt_tick(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 {
        format!("{:.0}", v)
    } else if (v * 10.0 - (v * 10.0).round()).abs() < 1e-9 {
        format!("{:.1}", v)
    } else {
        format!("{:.2}", v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_match_info_line_style() {
        assert_eq!(fmt_gb(120.44), "120.4GB");
        assert_eq!(fmt_used_total(300.0, 500.0), "300.0/500.0GB");
        assert_eq!(fmt_pct(60.0), "60.0%");
        assert_eq!(fmt_elapsed(3.24, TimeUnit::Minutes), "3.2m");
        assert_eq!(fmt_elapsed(45.0, TimeUnit::Seconds), "45.0s");
    }

    #[test]
    fn tick_labels_trim_trailing_zeros() {
        assert_eq!(fmt_tick(50.0), "50");
        assert_eq!(fmt_tick(0.5), "0.5");
        assert_eq!(fmt_tick(0.25), "0.25");
    }
}
