//! # Solver Error Module
//!
//! This module defines possible errors that could happen during the
//! execution of the solving algorithm. These are only the errors that
//! indicate a fatal, unrecoverable contract violation by the game module or
//! the runtime environment; ordinary bookkeeping conditions like remoteness
//! saturation are not errors (see `spec.md` §7).

use std::{error::Error, fmt};

use crate::model::Position;

/* ERROR WRAPPER */

/// Wrapper for all solver-related errors that could happen during runtime.
/// There are no recoverable errors during propagation: every variant here is
/// fatal, and the solver does not attempt to produce partial results after
/// one is raised.
#[derive(Debug)]
pub enum SolverError {
    /// An error to indicate that the game module returned a position outside
    /// of `[0, N)` from `generate_parents`, `generate_moves`, or `do_move`.
    /// Not recoverable: the solver has no way to know what the caller
    /// intended `position` to mean.
    ContractViolation {
        /// The out-of-range position the oracle returned.
        position: Position,

        /// The total position count `N` that `position` should have been
        /// bound by.
        bound: Position,

        /// Which oracle call produced the violation.
        source: &'static str,
    },
}

impl Error for SolverError {}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContractViolation {
                position,
                bound,
                source,
            } => {
                write!(
                    f,
                    "'{source}' returned position {position}, which is out \
                    of bounds for a game with {bound} positions. This is a \
                    contract violation by the game module, not a solver \
                    bug.",
                )
            },
        }
    }
}
