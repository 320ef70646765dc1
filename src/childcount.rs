//! # Child-Count Table Module
//!
//! A per-position outstanding-child counter used only by the no-go-again
//! propagator (see `spec.md` §4.2, and `loopyup_childrenCount` /
//! `BadChildrenCount` in the original solver). Lazily populated: a position
//! only has its move count filled in the first time it is touched as a
//! parent during propagation.

use crate::model::Position;

/* SENTINEL */

/// Marks a child-count entry that has never been populated, carried over
/// from the original solver's `BadChildrenCount` constant.
pub const UNCOUNTED: i64 = -1;

/* TABLE */

/// Per-position count of children not yet confirmed to be winning for the
/// opponent. Once a position's count reaches zero, every one of its moves
/// has been confirmed to lead to a win for the opponent, which forces a
/// [`crate::model::Value::Lose`] verdict.
pub struct ChildCountTable {
    counts: Vec<i64>,
}

impl ChildCountTable {
    /// Allocates a table for `n` positions, with every entry set to
    /// [`UNCOUNTED`].
    pub fn new(n: Position) -> Self {
        Self {
            counts: vec![UNCOUNTED; n],
        }
    }

    /// Returns the current count for `position`, or [`UNCOUNTED`] if it has
    /// never been populated.
    #[inline]
    pub fn count(&self, position: Position) -> i64 {
        self.counts[position]
    }

    /// Returns `true` iff `position`'s count has never been populated.
    #[inline]
    pub fn is_uncounted(&self, position: Position) -> bool {
        self.counts[position] == UNCOUNTED
    }

    /// Sets the count for `position` to `n`, typically the move count
    /// returned by [`crate::oracle::Game::generate_moves`].
    #[inline]
    pub fn set_count(&mut self, position: Position, n: i64) {
        self.counts[position] = n;
    }

    /// Decrements the count for `position` by one, recording that one more
    /// of its moves has been confirmed to lead to a win for the opponent.
    ///
    /// # Panics
    ///
    /// Panics (in debug builds) if `position` is [`UNCOUNTED`] or already at
    /// zero; callers must populate the count before decrementing it, and
    /// must not decrement past zero.
    #[inline]
    pub fn decrement(&mut self, position: Position) {
        debug_assert!(self.counts[position] > 0);
        self.counts[position] -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_entries_are_uncounted() {
        let table = ChildCountTable::new(3);
        for p in 0..3 {
            assert!(table.is_uncounted(p));
            assert_eq!(table.count(p), UNCOUNTED);
        }
    }

    #[test]
    fn set_then_decrement_reaches_zero() {
        let mut table = ChildCountTable::new(1);
        table.set_count(0, 2);
        table.decrement(0);
        assert_eq!(table.count(0), 1);
        table.decrement(0);
        assert_eq!(table.count(0), 0);
    }
}
