//! # Solver Configuration Module
//!
//! Provides the small configuration surface the solver exposes: the
//! remoteness saturation cap, and the progress-logging cadence that replaces
//! the original solver's `loopyup_debug` compile-time flag.

use crate::model::Remoteness;

/* DEFAULTS */

/// Default saturation cap for [`Remoteness`]. Games with very long loopy
/// chains may want to raise this; it is kept well below [`Remoteness::MAX`]
/// so that `remoteness + 1` never needs to be checked against integer
/// overflow, only against this cap.
pub const DEFAULT_REMOTENESS_MAX: Remoteness = u16::MAX as Remoteness;

/// Default cadence (in positions scanned) for Phase 1 progress logging,
/// carried over from the original solver's `pos % 50000 == 0` check in
/// `loopyup_DeterminePrimitives`.
pub const DEFAULT_PHASE1_LOG_EVERY: usize = 50_000;

/// Default cadence (in positions scanned) for Phase 2 progress logging,
/// carried over from the original solver's `pos % 10000 == 0` check in
/// `loopyup_DetermineValueFromPrimitives`.
pub const DEFAULT_PHASE2_LOG_EVERY: usize = 10_000;

/* CONFIGURATION */

/// Runtime configuration for a [`crate::solver::Solver`]. Constructed once
/// and threaded through the solver's lifetime rather than read from
/// process-wide globals (see `spec.md` §9's "Global mutable state" design
/// note).
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Saturation cap applied to every remoteness value the solver computes
    /// or stores. Must be at least 1.
    pub remoteness_max: Remoteness,

    /// When `Some(n)`, emit a `log::debug!` line every `n` positions scanned
    /// during Phase 1 (primitive seeding). `None` disables Phase 1 progress
    /// logging entirely.
    pub log_progress_every_phase1: Option<usize>,

    /// When `Some(n)`, emit a `log::debug!` line every `n` positions scanned
    /// during Phase 2 (propagation driver). `None` disables Phase 2 progress
    /// logging entirely.
    pub log_progress_every_phase2: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            remoteness_max: DEFAULT_REMOTENESS_MAX,
            log_progress_every_phase1: Some(DEFAULT_PHASE1_LOG_EVERY),
            log_progress_every_phase2: Some(DEFAULT_PHASE2_LOG_EVERY),
        }
    }
}

impl SolverConfig {
    /// Returns a configuration with all progress logging disabled, keeping
    /// the default remoteness cap. Convenient for tests and for embedding
    /// where the host does not want the solver writing to its log target.
    pub fn quiet() -> Self {
        Self {
            log_progress_every_phase1: None,
            log_progress_every_phase2: None,
            ..Self::default()
        }
    }
}
