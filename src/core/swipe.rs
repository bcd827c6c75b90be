//! Horizontal swipe detection as an explicit state machine.
//!
//! `idle → tracking` on pointer down, `tracking → commit | cancel` on
//! release. Commit when the horizontal displacement exceeds a fixed
//! threshold; anything below is a cancel.

/// Minimum horizontal displacement (logical points) to count as a swipe.
pub const SWIPE_THRESHOLD: f32 = 50.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum SwipeState {
    #[default]
    Idle,
    Tracking { start_x: f32, last_x: f32 },
}

/// Committed swipe direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Swipe {
    /// Content dragged leftwards: advance to the next item.
    Left,
    /// Content dragged rightwards: go back one item.
    Right,
}

#[derive(Clone, Copy, Debug)]
pub struct SwipeTracker {
    state: SwipeState,
    threshold: f32,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::with_threshold(SWIPE_THRESHOLD)
    }

    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            state: SwipeState::Idle,
            threshold,
        }
    }

    /// Pointer pressed at horizontal position `x`.
    pub fn begin(&mut self, x: f32) {
        self.state = SwipeState::Tracking { start_x: x, last_x: x };
    }

    /// Pointer moved to `x`. Ignored unless tracking.
    pub fn update(&mut self, x: f32) {
        if let SwipeState::Tracking { start_x, .. } = self.state {
            self.state = SwipeState::Tracking { start_x, last_x: x };
        }
    }

    /// Pointer released: commit or cancel. Always returns to idle.
    pub fn finish(&mut self) -> Option<Swipe> {
        let SwipeState::Tracking { start_x, last_x } = self.state else {
            return None;
        };
        self.state = SwipeState::Idle;
        let diff = start_x - last_x;
        if diff > self.threshold {
            Some(Swipe::Left)
        } else if diff < -self.threshold {
            Some(Swipe::Right)
        } else {
            None
        }
    }

    /// Abandon tracking without committing.
    pub fn cancel(&mut self) {
        self.state = SwipeState::Idle;
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self.state, SwipeState::Tracking { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_swipe_past_threshold_commits() {
        let mut tracker = SwipeTracker::new();
        tracker.begin(200.0);
        tracker.update(140.0); // displacement 60 > 50
        assert_eq!(tracker.finish(), Some(Swipe::Left));
        assert!(!tracker.is_tracking());
    }

    #[test]
    fn test_below_threshold_cancels() {
        let mut tracker = SwipeTracker::new();
        tracker.begin(200.0);
        tracker.update(230.0); // displacement 30 < 50
        assert_eq!(tracker.finish(), None);
    }

    #[test]
    fn test_right_swipe_commits() {
        let mut tracker = SwipeTracker::new();
        tracker.begin(100.0);
        tracker.update(180.0);
        assert_eq!(tracker.finish(), Some(Swipe::Right));
    }

    #[test]
    fn test_finish_without_begin_is_noop() {
        let mut tracker = SwipeTracker::new();
        assert_eq!(tracker.finish(), None);
    }

    #[test]
    fn test_exact_threshold_is_not_a_swipe() {
        let mut tracker = SwipeTracker::new();
        tracker.begin(100.0);
        tracker.update(50.0);
        assert_eq!(tracker.finish(), None);
    }

    #[test]
    fn test_cancel_discards_tracking() {
        let mut tracker = SwipeTracker::new();
        tracker.begin(300.0);
        tracker.update(100.0);
        tracker.cancel();
        assert_eq!(tracker.finish(), None);
    }

    #[test]
    fn test_intermediate_moves_only_last_position_counts() {
        let mut tracker = SwipeTracker::new();
        tracker.begin(100.0);
        tracker.update(0.0);
        tracker.update(95.0); // came back, net displacement 5
        assert_eq!(tracker.finish(), None);
    }
}
