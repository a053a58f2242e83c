use std::collections::VecDeque;

/// Insertion-ordered buffer. With a capacity the oldest entry is evicted when
/// full; without one it grows without bound.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    data: VecDeque<T>,
    cap:  Option<usize>,
}

impl<T> RingBuffer<T> {
    /// `Some(0)` is treated as a buffer of one.
    pub fn with_capacity(cap: Option<usize>) -> Self {
        let cap = cap.map(|c| c.max(1));
        let data = match cap {
            Some(c) => VecDeque::with_capacity(c),
            None    => VecDeque::new(),
        };
        Self { data, cap }
    }

    /// Append `val`, returning the evicted oldest entry if the buffer was full.
    pub fn push(&mut self, val: T) -> Option<T> {
        let evicted = match self.cap {
            Some(c) if self.data.len() >= c => self.data.pop_front(),
            _ => None,
        };
        self.data.push_back(val);
        evicted
    }

    pub fn clear(&mut self) { self.data.clear(); }

    pub fn get(&self, idx: usize) -> Option<&T> { self.data.get(idx) }
    pub fn back(&self) -> Option<&T> { self.data.back() }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ { self.data.iter() }

    /// Index of the first element for which `pred` is false. The buffer must be
    /// partitioned by `pred` (true values first).
    pub fn partition_point<P: FnMut(&T) -> bool>(&self, pred: P) -> usize {
        self.data.partition_point(pred)
    }

    pub fn len(&self) -> usize { self.data.len() }
    pub fn is_empty(&self) -> bool { self.data.is_empty() }
}
