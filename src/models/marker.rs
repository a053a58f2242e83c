use crate::models::sample::Channel;
use crate::models::series::Series;
use std::collections::BTreeMap;

pub const MAX_MARKERS: usize = 5;

const MIN_TOLERANCE: f64 = 0.01;
const MAX_TOLERANCE: f64 = 0.1;

/// A user-placed annotation pinned to a recorded sample, labelled "T{index}".
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceMarker {
    pub index:  usize,
    pub x:      f64,
    pub values: BTreeMap<Channel, f64>,
}

impl ReferenceMarker {
    pub fn label(&self) -> String {
        format!("T{}", self.index)
    }

    pub fn value(&self, channel: Channel) -> Option<f64> {
        self.values.get(&channel).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarkerToggle {
    Added(usize),
    Removed(usize),
    Ignored,
}

/// Hit tolerance for removing a marker, in time units. Narrows as the visible
/// window shrinks.
pub fn tolerance_for(visible_width: f64) -> f64 {
    if !visible_width.is_finite() { return MAX_TOLERANCE; }
    (visible_width / 100.0).clamp(MIN_TOLERANCE, MAX_TOLERANCE)
}

#[derive(Debug, Clone, Default)]
pub struct MarkerSet {
    markers: Vec<ReferenceMarker>,
}

impl MarkerSet {
    pub fn new() -> Self { Self::default() }

    /// Remove the marker at `x` or place a new one there.
    ///
    /// `x` is snapped to the nearest sample of `primary`; a marker within
    /// `tolerance` of the raw or snapped position is removed and the rest are
    /// renumbered. Otherwise a marker is added at the snapped sample when fewer
    /// than [`MAX_MARKERS`] exist and `x` lies in `[0, max(time)]`. It records
    /// the value of every series that has a sample at that exact time.
    pub fn toggle_at(
        &mut self,
        x: f64,
        tolerance: f64,
        primary: &Series,
        others: &[&Series],
    ) -> MarkerToggle {
        if !x.is_finite() { return MarkerToggle::Ignored; }

        let snapped = primary.nearest(x);

        let hit = self.markers.iter().position(|m| {
            (m.x - x).abs() <= tolerance
                || snapped.map_or(false, |s| (m.x - s.time).abs() <= tolerance)
        });
        if let Some(pos) = hit {
            let removed = self.markers.remove(pos);
            self.renumber();
            return MarkerToggle::Removed(removed.index);
        }

        let (Some(sample), Some(max_time)) = (snapped, primary.max_time()) else {
            return MarkerToggle::Ignored;
        };
        if self.markers.len() >= MAX_MARKERS || x < 0.0 || x > max_time {
            return MarkerToggle::Ignored;
        }

        let mut values = BTreeMap::new();
        values.insert(primary.channel(), sample.value);
        for series in others {
            if let Some(v) = series.value_at(sample.time) {
                values.insert(series.channel(), v);
            }
        }

        let index = self.markers.len() + 1;
        self.markers.push(ReferenceMarker { index, x: sample.time, values });
        MarkerToggle::Added(index)
    }

    pub fn clear(&mut self) { self.markers.clear(); }

    pub fn iter(&self) -> impl Iterator<Item = &ReferenceMarker> + '_ { self.markers.iter() }
    pub fn len(&self) -> usize { self.markers.len() }
    pub fn is_empty(&self) -> bool { self.markers.is_empty() }

    fn renumber(&mut self) {
        for (i, m) in self.markers.iter_mut().enumerate() {
            m.index = i + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 0.05;

    fn system(n: usize) -> Series {
        let mut s = Series::new(Channel::System, None);
        for i in 0..n {
            s.append(i as f64, 100.0 + i as f64).unwrap();
        }
        s
    }

    fn indices(set: &MarkerSet) -> Vec<usize> {
        set.iter().map(|m| m.index).collect()
    }

    fn xs(set: &MarkerSet) -> Vec<f64> {
        set.iter().map(|m| m.x).collect()
    }

    #[test]
    fn snaps_to_nearest_sample_and_records_values() {
        let sys = system(5);
        let mut doc = Series::new(Channel::Docker, None);
        doc.append(2.0, 0.5).unwrap();

        let mut set = MarkerSet::new();
        assert_eq!(set.toggle_at(2.3, TOL, &sys, &[&doc]), MarkerToggle::Added(1));

        let m = set.iter().next().unwrap();
        assert_eq!(m.x, 2.0);
        assert_eq!(m.label(), "T1");
        assert_eq!(m.value(Channel::System), Some(102.0));
        assert_eq!(m.value(Channel::Docker), Some(0.5));
    }

    #[test]
    fn channel_without_sample_at_time_is_omitted() {
        let sys = system(5);
        let doc = Series::new(Channel::Docker, None);
        let mut set = MarkerSet::new();
        set.toggle_at(1.0, TOL, &sys, &[&doc]);
        assert_eq!(set.iter().next().unwrap().value(Channel::Docker), None);
    }

    #[test]
    fn never_exceeds_five_markers() {
        let sys = system(10);
        let mut set = MarkerSet::new();
        for i in 0..10 {
            set.toggle_at(i as f64, TOL, &sys, &[]);
            assert!(set.len() <= MAX_MARKERS);
        }
        assert_eq!(set.len(), MAX_MARKERS);
        assert_eq!(indices(&set), vec![1, 2, 3, 4, 5]);
        assert_eq!(set.toggle_at(8.0, TOL, &sys, &[]), MarkerToggle::Ignored);
    }

    #[test]
    fn removal_renumbers_in_original_order() {
        let sys = system(6);
        let mut set = MarkerSet::new();
        for x in [4.0, 1.0, 3.0, 0.0] {
            set.toggle_at(x, TOL, &sys, &[]);
        }
        assert_eq!(set.toggle_at(1.0, TOL, &sys, &[]), MarkerToggle::Removed(2));
        assert_eq!(indices(&set), vec![1, 2, 3]);
        assert_eq!(xs(&set), vec![4.0, 3.0, 0.0]);

        assert_eq!(set.toggle_at(4.0, TOL, &sys, &[]), MarkerToggle::Removed(1));
        assert_eq!(indices(&set), vec![1, 2]);
        assert_eq!(xs(&set), vec![3.0, 0.0]);
    }

    #[test]
    fn toggling_twice_is_a_no_op() {
        let sys = system(5);
        let mut set = MarkerSet::new();
        set.toggle_at(0.0, TOL, &sys, &[]);
        let before = xs(&set);

        assert_eq!(set.toggle_at(2.4, TOL, &sys, &[]), MarkerToggle::Added(2));
        assert_eq!(set.toggle_at(2.4, TOL, &sys, &[]), MarkerToggle::Removed(2));
        assert_eq!(xs(&set), before);
    }

    #[test]
    fn snapped_position_reselects_marker_from_any_nearby_click() {
        let sys = system(5);
        let mut set = MarkerSet::new();
        set.toggle_at(1.8, TOL, &sys, &[]);
        assert_eq!(set.toggle_at(2.2, TOL, &sys, &[]), MarkerToggle::Removed(1));
        assert!(set.is_empty());
    }

    #[test]
    fn clicks_outside_data_domain_are_ignored() {
        let sys = system(3);
        let mut set = MarkerSet::new();
        assert_eq!(set.toggle_at(-0.5, TOL, &sys, &[]), MarkerToggle::Ignored);
        assert_eq!(set.toggle_at(2.5, TOL, &sys, &[]), MarkerToggle::Ignored);
        assert_eq!(set.toggle_at(f64::NAN, TOL, &sys, &[]), MarkerToggle::Ignored);
        assert!(set.is_empty());
    }

    #[test]
    fn empty_series_ignores_clicks() {
        let sys = Series::new(Channel::System, None);
        let mut set = MarkerSet::new();
        assert_eq!(set.toggle_at(0.0, TOL, &sys, &[]), MarkerToggle::Ignored);
    }

    #[test]
    fn tolerance_tightens_with_zoom() {
        assert_eq!(tolerance_for(100.0), 0.1);
        assert_eq!(tolerance_for(5.0), 0.05);
        assert_eq!(tolerance_for(0.2), 0.01);
        assert!(tolerance_for(2.0) < tolerance_for(8.0));
    }
}
