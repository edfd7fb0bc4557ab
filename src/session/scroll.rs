use std::ops::Range;

/// Default proximity fraction, matching a list's usual "end reached" threshold.
pub const DEFAULT_SCROLL_THRESHOLD: f32 = 0.9;

/// Decides when a viewport is close enough to the end of a list to load more.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTrigger {
    threshold: f32,
}

impl ScrollTrigger {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// `true` when fewer than `threshold` viewports' worth of items remain
    /// below `visible` in a list of `total` items. An empty list always asks
    /// for more.
    pub fn is_near_end(&self, visible: &Range<usize>, total: usize) -> bool {
        let viewport = visible.len().max(1) as f32;
        let remaining = total.saturating_sub(visible.end) as f32;
        remaining <= self.threshold * viewport
    }
}

impl Default for ScrollTrigger {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn far_from_the_end_does_not_trigger() {
        let trigger = ScrollTrigger::default();
        assert!(!trigger.is_near_end(&(0..10), 25));
    }

    #[test]
    fn within_the_threshold_triggers() {
        let trigger = ScrollTrigger::default();
        assert!(trigger.is_near_end(&(10..20), 28));
        assert!(!trigger.is_near_end(&(10..20), 30));
    }

    #[test]
    fn empty_lists_always_trigger() {
        assert!(ScrollTrigger::new(0.1).is_near_end(&(0..0), 0));
    }
}
