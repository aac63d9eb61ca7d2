//! Ordered body sequence for the snake.
//!
//! Segments are stored head-first in a ring buffer, so growing at the head and
//! trimming at the tail are both constant time.

use std::collections::VecDeque;

use thiserror::Error;

/// Contract violations on a [`Body`]. A correct engine never triggers these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BodyError {
    #[error("body sequence is empty")]
    EmptySequence,
    #[error("index {index} is out of range for a body of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Head-to-tail sequence of segments. Performs no duplicate detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body<T> {
    segments: VecDeque<T>,
}

impl<T: Copy + PartialEq> Body<T> {
    pub fn new() -> Self {
        Self {
            segments: VecDeque::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            segments: VecDeque::with_capacity(capacity),
        }
    }

    /// Most recently pushed segment
    pub fn head(&self) -> Result<T, BodyError> {
        self.segments.front().copied().ok_or(BodyError::EmptySequence)
    }

    /// Oldest segment
    pub fn tail(&self) -> Result<T, BodyError> {
        self.segments.back().copied().ok_or(BodyError::EmptySequence)
    }

    pub fn count(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segment at `index`, counted from the head
    pub fn get(&self, index: usize) -> Result<T, BodyError> {
        self.segments
            .get(index)
            .copied()
            .ok_or(BodyError::IndexOutOfRange {
                index,
                len: self.segments.len(),
            })
    }

    pub fn push_head(&mut self, item: T) {
        self.segments.push_front(item);
    }

    /// Appends behind the current tail. Used when laying out a fresh body.
    pub fn push_tail(&mut self, item: T) {
        self.segments.push_back(item);
    }

    pub fn pop_tail(&mut self) -> Result<T, BodyError> {
        self.segments.pop_back().ok_or(BodyError::EmptySequence)
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }

    pub fn contains(&self, item: T) -> bool {
        self.segments.contains(&item)
    }

    /// Iterates head to tail
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = T> + ExactSizeIterator + '_ {
        self.segments.iter().copied()
    }
}

impl<T: Copy + PartialEq> Default for Body<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + PartialEq> FromIterator<T> for Body<T> {
    /// Collects head-first
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_errors() {
        let mut body: Body<u8> = Body::new();
        assert_eq!(body.head(), Err(BodyError::EmptySequence));
        assert_eq!(body.tail(), Err(BodyError::EmptySequence));
        assert_eq!(body.pop_tail(), Err(BodyError::EmptySequence));
        assert_eq!(
            body.get(0),
            Err(BodyError::IndexOutOfRange { index: 0, len: 0 })
        );
        assert_eq!(body.count(), 0);
    }

    #[test]
    fn test_push_head_order() {
        let mut body = Body::new();
        body.push_head(1);
        body.push_head(2);
        body.push_head(3);

        assert_eq!(body.head(), Ok(3));
        assert_eq!(body.tail(), Ok(1));
        assert_eq!(body.get(0), Ok(3));
        assert_eq!(body.get(1), Ok(2));
        assert_eq!(body.get(2), Ok(1));
        assert_eq!(
            body.get(3),
            Err(BodyError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_pop_tail_tracks_new_tail() {
        let mut body: Body<i32> = [3, 2, 1].into_iter().collect();

        assert_eq!(body.pop_tail(), Ok(1));
        assert_eq!(body.tail(), Ok(2));
        assert_eq!(body.pop_tail(), Ok(2));
        assert_eq!(body.head(), Ok(3));
        assert_eq!(body.tail(), Ok(3));
        assert_eq!(body.pop_tail(), Ok(3));
        assert!(body.is_empty());
    }

    #[test]
    fn test_push_tail_and_clear() {
        let mut body = Body::with_capacity(4);
        body.push_tail('a');
        body.push_tail('b');
        body.push_head('z');

        assert_eq!(body.iter().collect::<String>(), "zab");
        assert!(body.contains('b'));
        assert!(!body.contains('q'));

        body.clear();
        assert_eq!(body.count(), 0);
        assert_eq!(body.head(), Err(BodyError::EmptySequence));
    }
}
