// SPDX-License-Identifier: MIT OR Apache-2.0
//! Row assignment for intervals added in one sync run.
//!
//! Every new interval spans the full playback range, so each gets its own
//! row. Rows start at 0 for every run; rows used by intervals already on the
//! track are not taken into account.
//!
//! The sync pass uses [`RowAllocator::peek`] and [`RowAllocator::commit`] so a
//! row is only consumed once the track accepts the interval.

/// Hands out rows `0, 1, 2, ...` for one run
#[derive(Debug, Clone, Default)]
pub struct RowAllocator {
    next: u32,
}

impl RowAllocator {
    /// Create an allocator starting at row 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows for `n` new intervals, all accepted
    pub fn allocate(n: u32) -> impl Iterator<Item = u32> {
        let mut rows = Self::new();
        (0..n).map(move |_| rows.commit())
    }

    /// Row the next interval will use
    pub fn peek(&self) -> u32 {
        self.next
    }

    /// Mark the peeked row as taken and return it
    pub fn commit(&mut self) -> u32 {
        let row = self.next;
        self.next += 1;
        row
    }

    /// Rows handed out so far
    pub fn allocated(&self) -> u32 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_is_contiguous() {
        assert_eq!(RowAllocator::allocate(4).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert_eq!(RowAllocator::allocate(0).count(), 0);
    }

    #[test]
    fn test_allocate_matches_commit_sequence() {
        let mut rows = RowAllocator::new();
        let committed: Vec<u32> = (0..3).map(|_| rows.commit()).collect();
        assert_eq!(RowAllocator::allocate(3).collect::<Vec<_>>(), committed);
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut rows = RowAllocator::new();
        assert_eq!(rows.peek(), 0);
        assert_eq!(rows.peek(), 0);
        assert_eq!(rows.commit(), 0);
        assert_eq!(rows.peek(), 1);
        assert_eq!(rows.commit(), 1);
        assert_eq!(rows.allocated(), 2);
    }
}
