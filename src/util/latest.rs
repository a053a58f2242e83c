use arc_swap::ArcSwapOption;
use std::sync::Arc;

/// Single-slot cell holding the last completed result of a background
/// producer. One writer replaces the value atomically; readers never block.
pub struct LatestValue<T> {
    slot: ArcSwapOption<T>,
}

impl<T> LatestValue<T> {
    pub fn new() -> Self {
        Self { slot: ArcSwapOption::empty() }
    }

    pub fn store(&self, value: Option<T>) {
        self.slot.store(value.map(Arc::new));
    }

    pub fn load(&self) -> Option<Arc<T>> {
        self.slot.load_full()
    }
}

impl<T> Default for LatestValue<T> {
    fn default() -> Self { Self::new() }
}
