//! # Position Database Module
//!
//! A dense, array-backed store of per-position value, remoteness, and
//! visited flag, scaled down from the bit-packed multi-player record formats
//! elsewhere in this lineage (see e.g. the SURCC record) to the three fields
//! this solver needs. All operations are O(1) as required by `spec.md` §4.1.

use bitvec::vec::BitVec;

use crate::model::{Position, Remoteness, Value};

/* DATABASE */

/// Per-position value, remoteness, and visited flag for every position in
/// `[0, N)`. Allocated once for the lifetime of a [`crate::solver::Solver`]
/// run and freed with it; there are no ordering guarantees between IDs.
pub struct PositionDatabase {
    values: Vec<Value>,
    remoteness: Vec<Remoteness>,
    visited: BitVec,
}

impl PositionDatabase {
    /// Allocates a database for `n` positions. Every position starts at
    /// [`Value::Undecided`], remoteness `0`, and `visited = false`.
    pub fn new(n: Position) -> Self {
        Self {
            values: vec![Value::Undecided; n],
            remoteness: vec![0; n],
            visited: BitVec::repeat(false, n),
        }
    }

    /// Returns the number of positions this database was allocated for.
    pub fn len(&self) -> Position {
        self.values.len()
    }

    /// Returns `true` iff this database was allocated for zero positions.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the value currently stored for `position`.
    #[inline]
    pub fn get_value(&self, position: Position) -> Value {
        self.values[position]
    }

    /// Overwrites the value stored for `position`.
    #[inline]
    pub fn set_value(&mut self, position: Position, value: Value) {
        self.values[position] = value;
    }

    /// Returns the remoteness currently stored for `position`.
    #[inline]
    pub fn get_remoteness(&self, position: Position) -> Remoteness {
        self.remoteness[position]
    }

    /// Overwrites the remoteness stored for `position`.
    #[inline]
    pub fn set_remoteness(&mut self, position: Position, remoteness: Remoteness) {
        self.remoteness[position] = remoteness;
    }

    /// Returns `true` iff `position` has been marked visited (a primitive
    /// position determined by Phase 1).
    #[inline]
    pub fn visited(&self, position: Position) -> bool {
        self.visited[position]
    }

    /// Marks `position` as visited.
    #[inline]
    pub fn mark_visited(&mut self, position: Position) {
        self.visited.set(position, true);
    }

    /// Clears the visited flag on `position`.
    #[inline]
    pub fn unmark_visited(&mut self, position: Position) {
        self.visited.set(position, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_database_starts_undecided() {
        let db = PositionDatabase::new(4);
        for p in 0..4 {
            assert_eq!(db.get_value(p), Value::Undecided);
            assert_eq!(db.get_remoteness(p), 0);
            assert!(!db.visited(p));
        }
    }

    #[test]
    fn mutations_are_independent_per_position() {
        let mut db = PositionDatabase::new(2);
        db.set_value(0, Value::Win);
        db.set_remoteness(0, 3);
        db.mark_visited(0);

        assert_eq!(db.get_value(0), Value::Win);
        assert_eq!(db.get_remoteness(0), 3);
        assert!(db.visited(0));

        assert_eq!(db.get_value(1), Value::Undecided);
        assert_eq!(db.get_remoteness(1), 0);
        assert!(!db.visited(1));
    }
}
