// SPDX-License-Identifier: MPL-2.0
//! Fixed-size event ring.

use std::collections::VecDeque;

/// Smallest ring the log accepts.
pub const MIN_CAPACITY: usize = 16;
/// Largest ring the log accepts.
pub const MAX_CAPACITY: usize = 4096;
pub const DEFAULT_CAPACITY: usize = 256;

/// Number of events a [`CircularBuffer`] retains, clamped to
/// `MIN_CAPACITY..=MAX_CAPACITY`.
///
/// ```
/// use blob_lens::diagnostics::BufferCapacity;
///
/// assert_eq!(BufferCapacity::new(100).value(), 100);
/// assert_eq!(BufferCapacity::new(1_000_000).value(), 4096);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferCapacity(usize);

impl BufferCapacity {
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(MIN_CAPACITY, MAX_CAPACITY))
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for BufferCapacity {
    fn default() -> Self {
        Self(DEFAULT_CAPACITY)
    }
}

/// Oldest-first ring: pushing past capacity drops the front element.
#[derive(Debug, Clone)]
pub struct CircularBuffer<T> {
    data: VecDeque<T>,
    capacity: BufferCapacity,
}

impl<T> CircularBuffer<T> {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        Self {
            data: VecDeque::with_capacity(capacity.value()),
            capacity,
        }
    }

    pub fn push(&mut self, item: T) {
        if self.data.len() == self.capacity.value() {
            self.data.pop_front();
        }
        self.data.push_back(item);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.data.back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_is_clamped() {
        assert_eq!(BufferCapacity::new(0).value(), MIN_CAPACITY);
        assert_eq!(BufferCapacity::new(100_000).value(), MAX_CAPACITY);
        assert_eq!(BufferCapacity::default().value(), DEFAULT_CAPACITY);
    }

    #[test]
    fn full_ring_drops_front() {
        let mut ring = CircularBuffer::new(BufferCapacity::new(MIN_CAPACITY));
        for i in 0..20 {
            ring.push(i);
        }
        assert_eq!(ring.len(), MIN_CAPACITY);
        assert_eq!(ring.iter().next(), Some(&4));
        assert_eq!(ring.last(), Some(&19));
    }

    #[test]
    fn empty_ring_has_no_last() {
        let ring: CircularBuffer<u8> = CircularBuffer::new(BufferCapacity::default());
        assert!(ring.is_empty());
        assert!(ring.last().is_none());
    }
}
