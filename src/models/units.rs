use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Divisor family for converting raw sizes to "GB".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteBase {
    /// 1 GB = 1024³ bytes
    #[default]
    Binary,
    /// 1 GB = 1000³ bytes
    Decimal,
}

impl ByteBase {
    fn step(self) -> f64 {
        match self {
            ByteBase::Binary  => 1024.0,
            ByteBase::Decimal => 1000.0,
        }
    }

    pub fn gb_from_bytes(self, bytes: u64) -> f64 {
        bytes as f64 / self.step().powi(3)
    }

    /// `df -k` reports 1K blocks; the same base is applied to the remaining two steps.
    pub fn gb_from_kb(self, kb: f64) -> f64 {
        kb / self.step().powi(2)
    }

    pub fn label(self) -> &'static str {
        match self {
            ByteBase::Binary  => "binary",
            ByteBase::Decimal => "decimal",
        }
    }
}

/// Unit of the elapsed-time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Seconds,
    #[default]
    Minutes,
}

const SECOND_STEPS: &[f64] = &[1.0, 5.0, 10.0, 15.0, 30.0, 60.0, 120.0, 300.0, 600.0];
const MINUTE_STEPS: &[f64] = &[0.1, 0.25, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0];

impl TimeUnit {
    pub fn from_duration(self, d: Duration) -> f64 {
        match self {
            TimeUnit::Seconds => d.as_secs_f64(),
            TimeUnit::Minutes => d.as_secs_f64() / 60.0,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            TimeUnit::Seconds => "s",
            TimeUnit::Minutes => "m",
        }
    }

    pub fn axis_title(self) -> &'static str {
        match self {
            TimeUnit::Seconds => "Time (seconds)",
            TimeUnit::Minutes => "Time (minutes)",
        }
    }

    /// Room left to the right of the newest sample while following the live edge.
    pub fn live_pad(self) -> f64 {
        match self {
            TimeUnit::Seconds => 30.0,
            TimeUnit::Minutes => 0.5,
        }
    }

    /// Narrowest visible window zooming will produce.
    pub fn min_window(self) -> f64 {
        match self {
            TimeUnit::Seconds => 5.0,
            TimeUnit::Minutes => 0.1,
        }
    }

    pub fn tick_steps(self) -> &'static [f64] {
        match self {
            TimeUnit::Seconds => SECOND_STEPS,
            TimeUnit::Minutes => MINUTE_STEPS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kb_to_gb_uses_selected_base() {
        assert!((ByteBase::Binary.gb_from_kb(1_048_576.0) - 1.0).abs() < 1e-12);
        assert!((ByteBase::Decimal.gb_from_kb(1_000_000.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn bytes_to_gb_uses_selected_base() {
        assert!((ByteBase::Binary.gb_from_bytes(1 << 30) - 1.0).abs() < 1e-12);
        assert!((ByteBase::Decimal.gb_from_bytes(2_000_000_000) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn elapsed_follows_unit() {
        let d = Duration::from_secs(90);
        assert_eq!(TimeUnit::Seconds.from_duration(d), 90.0);
        assert_eq!(TimeUnit::Minutes.from_duration(d), 1.5);
    }
}
