//! Bounded collection utilities

use std::collections::VecDeque;

/// Push onto a `VecDeque` without letting it grow past a maximum size
pub(super) trait BoundedPush<T> {
    /// Returns the evicted element, if any
    fn push_bounded(&mut self, value: T, max_size: usize) -> Option<T>;
}

impl<T> BoundedPush<T> for VecDeque<T> {
    #[inline]
    fn push_bounded(&mut self, value: T, max_size: usize) -> Option<T> {
        let evicted = if self.len() >= max_size {
            self.pop_front()
        } else {
            None
        };
        self.push_back(value);
        evicted
    }
}
