use crate::models::sample::{Channel, Sample};
use crate::util::ring_buffer::RingBuffer;
use anyhow::{bail, Result};

/// Append-only sample buffer for one channel. Elapsed time never decreases.
#[derive(Debug, Clone)]
pub struct Series {
    channel: Channel,
    samples: RingBuffer<Sample>,
}

impl Series {
    /// `max_samples = None` keeps every sample; otherwise the oldest are evicted.
    pub fn new(channel: Channel, max_samples: Option<usize>) -> Self {
        Self { channel, samples: RingBuffer::with_capacity(max_samples) }
    }

    pub fn append(&mut self, time: f64, value: f64) -> Result<()> {
        if !time.is_finite() || time < 0.0 {
            bail!("{}: invalid elapsed time {}", self.channel.label(), time);
        }
        if !value.is_finite() || value < 0.0 {
            bail!("{}: invalid sample value {}", self.channel.label(), value);
        }
        if let Some(last) = self.samples.back() {
            if time < last.time {
                bail!(
                    "{}: elapsed time went backwards ({} < {})",
                    self.channel.label(), time, last.time
                );
            }
        }
        self.samples.push(Sample { time, value });
        Ok(())
    }

    pub fn clear(&mut self) { self.samples.clear(); }

    pub fn channel(&self) -> Channel { self.channel }
    pub fn len(&self) -> usize { self.samples.len() }
    pub fn is_empty(&self) -> bool { self.samples.is_empty() }
    pub fn get(&self, idx: usize) -> Option<Sample> { self.samples.get(idx).copied() }
    pub fn last(&self) -> Option<Sample> { self.samples.back().copied() }
    pub fn max_time(&self) -> Option<f64> { self.last().map(|s| s.time) }
    pub fn iter(&self) -> impl Iterator<Item = &Sample> + '_ { self.samples.iter() }

    /// Points inside `[left, right]`, plus the nearest neighbour on each side
    /// so lines reach the plot edges.
    pub fn points_in(&self, bounds: [f64; 2]) -> Vec<(f64, f64)> {
        let [left, right] = bounds;
        let start = self.samples.partition_point(|s| s.time < left).saturating_sub(1);
        let end   = (self.samples.partition_point(|s| s.time <= right) + 1).min(self.len());
        self.iter()
            .skip(start)
            .take(end.saturating_sub(start))
            .map(|s| (s.time, s.value))
            .collect()
    }

    /// Index of the sample closest to `x` in time. Ties resolve to the earlier
    /// (lowest-index) sample.
    pub fn nearest_index(&self, x: f64) -> Option<usize> {
        if self.is_empty() || !x.is_finite() { return None; }
        let n = self.len();
        let i = self.samples.partition_point(|s| s.time < x);
        if i == 0 { return Some(0); }
        if i == n { return Some(self.first_index_at(n - 1)); }

        let before = self.samples.get(i - 1)?.time;
        let after  = self.samples.get(i)?.time;
        if after - x < x - before {
            Some(i)
        } else {
            Some(self.first_index_at(i - 1))
        }
    }

    pub fn nearest(&self, x: f64) -> Option<Sample> {
        self.nearest_index(x).and_then(|i| self.get(i))
    }

    /// Value of the sample recorded at exactly `time`, if any.
    pub fn value_at(&self, time: f64) -> Option<f64> {
        let i = self.samples.partition_point(|s| s.time < time);
        self.samples.get(i).filter(|s| s.time == time).map(|s| s.value)
    }

    /// First index sharing the timestamp of sample `idx`.
    fn first_index_at(&self, idx: usize) -> usize {
        match self.samples.get(idx) {
            Some(s) => {
                let t = s.time;
                self.samples.partition_point(|o| o.time < t)
            }
            None => idx,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(times: &[f64]) -> Series {
        let mut s = Series::new(Channel::System, None);
        for (i, &t) in times.iter().enumerate() {
            s.append(t, i as f64 * 10.0).unwrap();
        }
        s
    }

    #[test]
    fn rejects_decreasing_time() {
        let mut s = series(&[0.0, 1.0]);
        assert!(s.append(0.5, 1.0).is_err());
        assert_eq!(s.len(), 2);
        assert!(s.append(1.0, 2.0).is_ok());
    }

    #[test]
    fn rejects_negative_and_non_finite_input() {
        let mut s = Series::new(Channel::Docker, None);
        assert!(s.append(-1.0, 1.0).is_err());
        assert!(s.append(f64::NAN, 1.0).is_err());
        assert!(s.append(0.0, -3.0).is_err());
        assert!(s.is_empty());
    }

    #[test]
    fn bounded_series_evicts_fifo_and_stays_ordered() {
        let mut s = Series::new(Channel::System, Some(4));
        for i in 0..10 {
            s.append(i as f64, i as f64).unwrap();
            assert!(s.len() <= 4);
        }
        let times: Vec<f64> = s.iter().map(|x| x.time).collect();
        assert_eq!(times, vec![6.0, 7.0, 8.0, 9.0]);
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn nearest_picks_closest_sample() {
        let s = series(&[0.0, 1.0, 2.0, 4.0]);
        assert_eq!(s.nearest_index(-5.0), Some(0));
        assert_eq!(s.nearest_index(0.4), Some(0));
        assert_eq!(s.nearest_index(2.9), Some(2));
        assert_eq!(s.nearest_index(3.1), Some(3));
        assert_eq!(s.nearest_index(99.0), Some(3));
    }

    #[test]
    fn nearest_tie_resolves_to_earlier_sample() {
        let s = series(&[0.0, 1.0, 2.0]);
        assert_eq!(s.nearest_index(0.5), Some(0));
        assert_eq!(s.nearest_index(1.5), Some(1));
    }

    #[test]
    fn nearest_with_duplicate_times_returns_lowest_index() {
        let s = series(&[0.0, 1.0, 1.0, 1.0, 3.0]);
        assert_eq!(s.nearest_index(1.2), Some(1));
        assert_eq!(s.nearest_index(1.0), Some(1));
        let tail = series(&[0.0, 2.0, 2.0]);
        assert_eq!(tail.nearest_index(5.0), Some(1));
    }

    #[test]
    fn nearest_on_empty_series_is_none() {
        let s = Series::new(Channel::System, None);
        assert_eq!(s.nearest_index(1.0), None);
        assert_eq!(series(&[1.0]).nearest_index(f64::NAN), None);
    }

    #[test]
    fn value_at_requires_exact_time() {
        let s = series(&[0.0, 1.0, 2.0]);
        assert_eq!(s.value_at(1.0), Some(10.0));
        assert_eq!(s.value_at(1.5), None);
    }

    #[test]
    fn points_in_window_include_edge_neighbours() {
        let s = series(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        let pts = s.points_in([1.5, 3.5]);
        let times: Vec<f64> = pts.iter().map(|p| p.0).collect();
        assert_eq!(times, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(s.points_in([0.0, 10.0]).len(), 6);
    }
}
