//! # Game Oracle Module
//!
//! Defines the external contract the solver depends on: a finite, densely
//! enumerable position space together with the primitives, moves, parents,
//! transitions, and (optionally) go-again predicate of the underlying game.
//! Everything in this module is a trait the surrounding game module
//! implements; the solver never implements it.

use crate::model::{Position, Value};

/* CONTRACT */

/// The collaborator interface the solver depends on. A type implementing
/// this trait is a complete description of one game's position graph as far
/// as retrograde analysis is concerned; it owns no solving logic itself.
///
/// # Contract
///
/// - [`Game::generate_moves`] and [`Game::generate_parents`] must agree in
///   cardinality: for any non-primitive position `p` with move count `m`,
///   `p` must appear exactly `m` times across the parent lists of its
///   children (`spec.md` invariant 5). The solver relies on this to make the
///   no-go-again child counter exact.
/// - [`Game::do_move`], and every [`Position`] returned by
///   [`Game::generate_parents`], must be strictly less than
///   [`Game::position_count`]. Violating this is a fatal
///   [`crate::error::SolverError::ContractViolation`].
/// - [`Game::primitive`] is only ever called during Phase 1, before any
///   propagation begins.
pub trait Game {
    /// The type used to identify a single legal move from a position. Only
    /// needs to be meaningful together with the position it was generated
    /// from.
    type Move: Copy;

    /// Set to `true` by games with a go-again rule (some moves leave the
    /// same player to act). Checked once, at solver construction, to select
    /// between the no-go-again and go-again propagators — the idiomatic
    /// equivalent of the original solver's runtime pointer-equality check
    /// against a sentinel "default" go-again function.
    const HAS_GO_AGAIN: bool = false;

    /// Returns the total number of positions `N`. Positions are assumed to
    /// be densely identified in `[0, N)`.
    fn position_count(&self) -> Position;

    /// Returns the primitive value of `position`, or [`Value::Undecided`] if
    /// `position` is not terminal. Only [`Value::Win`], [`Value::Lose`],
    /// [`Value::Tie`], and [`Value::Undecided`] are meaningful return
    /// values; a game returning [`Value::Draw`] here has no effect beyond
    /// what [`Value::Undecided`] would have (draws are never primitive).
    fn primitive(&self, position: Position) -> Value;

    /// Enumerates the moves available from `position`. Ordering is
    /// irrelevant; duplicates are allowed only if the game itself counts
    /// them as distinct moves. Must match [`Game::generate_parents`] in
    /// cardinality per this trait's contract.
    fn generate_moves(&self, position: Position) -> Vec<Self::Move>;

    /// For each move that reaches `position`, yields its source position
    /// once. An unreachable position yields an empty list.
    fn generate_parents(&self, position: Position) -> Vec<Position>;

    /// Deterministically applies `action` to `position`, returning the
    /// resulting position.
    fn do_move(&self, position: Position, action: Self::Move) -> Position;

    /// Returns `true` iff the same player moves again after playing `action`
    /// from `position`. Only called when [`Game::HAS_GO_AGAIN`] is `true`;
    /// the default implementation is never invoked for games that leave
    /// `HAS_GO_AGAIN` at its default `false`.
    fn go_again(&self, position: Position, action: Self::Move) -> bool {
        let _ = (position, action);
        false
    }
}
