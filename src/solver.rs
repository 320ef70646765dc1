//! # Solver Module
//!
//! The entry point of this crate: [`Solver`] threads a position database, an
//! optional child-count table, a reference to the game oracle, and a
//! configuration through the three phases of retrograde analysis described in
//! `spec.md` §4 (primitive seeding, propagation, cleanup), and exposes
//! [`Solver::determine_value`] as the single public operation (`spec.md` §6).
//!
//! There is no process-wide global state: every run owns its own
//! [`PositionDatabase`] and, for games without the go-again rule, its own
//! [`ChildCountTable`]. Nothing here is `static` or `lazy_static`, unlike the
//! original solver's `loopyup_childrenCount` global array.

use anyhow::{Context, Result};
use log::debug;

use crate::childcount::ChildCountTable;
use crate::config::SolverConfig;
use crate::db::PositionDatabase;
use crate::error::SolverError;
use crate::model::{Position, Remoteness, Value};
use crate::oracle::Game;
use crate::propagate::{self, validate};

/* RESULT */

/// The result of a completed solve: the label of the requested start
/// position, and the full database backing every other position reachable
/// during the solve. Returning the whole database (rather than only the
/// start position's label, as `spec.md` §6 literally specifies) lets a caller
/// answer "what should I play here" for any position without re-solving.
pub struct Solution {
    /// The value of the position passed to [`Solver::determine_value`].
    pub value: Value,

    /// The remoteness of the position passed to [`Solver::determine_value`].
    pub remoteness: Remoteness,

    /// Every position's final value and remoteness.
    pub database: PositionDatabase,
}

/* SOLVER */

/// Solves a loopy game described by a [`Game`] implementation. Constructed
/// once per solve; consumed by [`Solver::determine_value`].
pub struct Solver<'a, G: Game> {
    game: &'a G,
    config: SolverConfig,
    db: PositionDatabase,
    child_counts: Option<ChildCountTable>,
}

impl<'a, G: Game> Solver<'a, G> {
    /// Allocates a solver for `game` with `config`. Whether the no-go-again
    /// or go-again propagator runs is decided here, once, from
    /// [`Game::HAS_GO_AGAIN`] — not re-checked on every propagation step.
    ///
    /// Infallible: the position database and child-count table are backed by
    /// plain `Vec`s, which abort the process on allocation failure rather
    /// than returning an error here.
    pub fn new(game: &'a G, config: SolverConfig) -> Self {
        let n = game.position_count();
        let child_counts = if G::HAS_GO_AGAIN {
            None
        } else {
            Some(ChildCountTable::new(n))
        };
        Self {
            game,
            config,
            db: PositionDatabase::new(n),
            child_counts,
        }
    }

    /// Runs all three phases of retrograde analysis to a fixed point and
    /// reports the label assigned to `start`.
    ///
    /// # Errors
    ///
    /// Fails the moment the game module is caught returning a position
    /// outside `[0, N)`, wrapped in [`anyhow::Context`] identifying which
    /// phase surfaced the underlying [`SolverError::ContractViolation`]. No
    /// partial results are produced in that case.
    pub fn determine_value(mut self, start: Position) -> Result<Solution> {
        validate(start, self.db.len(), "determine_value")
            .context("validating the requested start position")?;

        self.seed_primitives();
        self.drive().context("propagating values from primitives")?;
        self.cleanup();

        let value = self.db.get_value(start);
        let remoteness = self.db.get_remoteness(start);
        Ok(Solution {
            value,
            remoteness,
            database: self.db,
        })
    }

    /// Phase 1: scan every position and fix the primitives. Mirrors
    /// `loopyup_DeterminePrimitives` in the original solver.
    fn seed_primitives(&mut self) {
        let n = self.db.len();
        for position in 0..n {
            let value = self.game.primitive(position);
            if value.is_primitive_decided() {
                self.db.set_value(position, value);
                self.db.set_remoteness(position, 0);
                self.db.mark_visited(position);
                if let Some(counts) = self.child_counts.as_mut() {
                    counts.set_count(position, 0);
                }
            }

            if let Some(every) = self.config.log_progress_every_phase1 {
                if every > 0 && (position + 1) % every == 0 {
                    debug!("phase 1: scanned {}/{n} positions for primitives", position + 1);
                }
            }
        }
    }

    /// Phase 2: propagate every primitive's label to its ancestors until a
    /// fixed point is reached. Mirrors
    /// `loopyup_DetermineValueFromPrimitives`.
    fn drive(&mut self) -> Result<(), SolverError> {
        let n = self.db.len();
        let mut primitives_processed = 0usize;

        for position in 0..n {
            if !self.db.visited(position) {
                continue;
            }

            let value = self.db.get_value(position);
            let remoteness = self.db.get_remoteness(position);
            let parents = self
                .game
                .generate_parents(position)
                .into_iter()
                .map(|parent| validate(parent, n, "GenerateParents"))
                .collect::<Result<Vec<Position>, SolverError>>()?;

            if G::HAS_GO_AGAIN {
                propagate::go_again(
                    &mut self.db,
                    self.game,
                    self.config.remoteness_max,
                    parents,
                )?;
            } else {
                let counts = self
                    .child_counts
                    .as_mut()
                    .expect("no-go-again games always allocate a child-count table");
                let seed = parents
                    .into_iter()
                    .map(|parent| (parent, value, remoteness, false))
                    .collect();
                propagate::no_go_again(
                    &mut self.db,
                    counts,
                    self.game,
                    self.config.remoteness_max,
                    seed,
                )?;
            }

            primitives_processed += 1;
            if let Some(every) = self.config.log_progress_every_phase2 {
                if every > 0 && primitives_processed % every == 0 {
                    debug!(
                        "phase 2: propagated from {primitives_processed} primitive positions"
                    );
                }
            }
        }

        Ok(())
    }

    /// Phase 3: clear the visited flags set by Phase 1 and resolve any
    /// position the fixed point left [`Value::Undecided`] to [`Value::Draw`]
    /// at the configured remoteness cap. Mirrors `loopyup_CleanUpDatabase`;
    /// unlike the original, which folds this case into its single TIE value,
    /// this keeps [`Value::Tie`] and [`Value::Draw`] distinct (`spec.md`
    /// §3's split).
    fn cleanup(&mut self) {
        let n = self.db.len();
        for position in 0..n {
            self.db.unmark_visited(position);
            if self.db.get_value(position) == Value::Undecided {
                self.db.set_value(position, Value::Draw);
                self.db.set_remoteness(position, self.config.remoteness_max);
            }
        }
    }
}
