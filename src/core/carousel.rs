//! Per-record image pager state.

use crate::core::swipe::{Swipe, SwipeTracker};

/// Current position within one record's image list.
///
/// Reset whenever the record (and so the image list) changes; position is
/// never preserved across records.
#[derive(Debug, Default)]
pub struct CarouselState {
    index: usize,
    count: usize,
    pub swipe: SwipeTracker,
}

impl CarouselState {
    pub fn new(count: usize) -> Self {
        Self {
            index: 0,
            count,
            swipe: SwipeTracker::new(),
        }
    }

    /// Point the state at a new image list, resetting the position.
    pub fn reset(&mut self, count: usize) {
        self.index = 0;
        self.count = count;
        self.swipe.cancel();
    }

    /// Keep `count` in sync with the current list without losing position;
    /// clamps the index when items were removed (editor flow).
    pub fn set_count(&mut self, count: usize) {
        self.count = count;
        if count == 0 {
            self.index = 0;
        } else if self.index >= count {
            self.index = count - 1;
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Next image, wrapping past the last back to the first.
    pub fn next(&mut self) {
        if self.count > 0 {
            self.index = (self.index + 1) % self.count;
        }
    }

    /// Previous image, wrapping before the first back to the last.
    pub fn prev(&mut self) {
        if self.count > 0 {
            self.index = if self.index == 0 { self.count - 1 } else { self.index - 1 };
        }
    }

    /// Apply a committed swipe gesture.
    pub fn apply(&mut self, swipe: Swipe) {
        match swipe {
            Swipe::Left => self.next(),
            Swipe::Right => self.prev(),
        }
    }

    /// "current / total" indicator text.
    pub fn position_label(&self) -> String {
        format!("{} / {}", self.index + 1, self.count)
    }
}
