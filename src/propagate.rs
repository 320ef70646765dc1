//! # Propagator Module
//!
//! Implements the two ways a newly-known (or newly-improved) child label can
//! update a parent position: the no-go-again propagator (`spec.md` §4.5,
//! `loopyup_DetermineLocalValueNoGoAgain` in the original source) and the
//! go-again propagator (`spec.md` §4.6, `loopyup_DetermineLocalValueGoAgain`).
//!
//! Both are expressed over an explicit LIFO work-stack rather than native
//! recursion (`spec.md` §9, "Recursive propagation → explicit stack"): a
//! position that decides or improves pushes work items for its parents
//! instead of calling itself. This keeps the recursion depth bounded by the
//! stack's heap allocation rather than the thread's call stack, which
//! matters for games whose longest losing chain exceeds typical default
//! stack limits.

use crate::childcount::ChildCountTable;
use crate::db::PositionDatabase;
use crate::error::SolverError;
use crate::model::{Position, Remoteness, Value};
use crate::oracle::Game;

/* WORK ITEMS */

/// One unit of pending work for the no-go-again propagator: "a child of
/// `position` was just assigned `caller_value` at `caller_remoteness`;
/// `update_only` means the child's value was already known and only its
/// remoteness improved, so the child counter must not be touched again."
struct WorkItem {
    position: Position,
    caller_value: Value,
    caller_remoteness: Remoteness,
    update_only: bool,
}

/* SHARED HELPERS */

pub(crate) fn validate(
    position: Position,
    n: Position,
    source: &'static str,
) -> Result<Position, SolverError> {
    if position >= n {
        Err(SolverError::ContractViolation {
            position,
            bound: n,
            source,
        })
    } else {
        Ok(position)
    }
}

/// Returns `remoteness + 1`, saturating one step below `max` per `spec.md`
/// §4.5's arithmetic rule: once `remoteness` is within one of `max`, further
/// increments leave it unchanged rather than crossing into the sentinel
/// value `max` reserved for [`Value::Draw`].
fn saturating_increment(remoteness: Remoteness, max: Remoteness) -> Remoteness {
    if remoteness < max.saturating_sub(1) {
        remoteness + 1
    } else {
        remoteness
    }
}

/* NO-GO-AGAIN PROPAGATOR */

/// Runs the no-go-again propagator to quiescence, starting from the work
/// items in `seed`. Pushes further work onto an internal stack as positions
/// decide or improve; returns once the stack is empty (a fixed point).
pub fn no_go_again<G: Game>(
    db: &mut PositionDatabase,
    child_counts: &mut ChildCountTable,
    game: &G,
    remoteness_max: Remoteness,
    seed: Vec<(Position, Value, Remoteness, bool)>,
) -> Result<(), SolverError> {
    let n = db.len();
    let mut stack: Vec<WorkItem> = seed
        .into_iter()
        .map(|(position, caller_value, caller_remoteness, update_only)| WorkItem {
            position,
            caller_value,
            caller_remoteness,
            update_only,
        })
        .collect();

    while let Some(item) = stack.pop() {
        step_no_go_again(db, child_counts, game, remoteness_max, n, item, &mut stack)?;
    }
    Ok(())
}

fn step_no_go_again<G: Game>(
    db: &mut PositionDatabase,
    child_counts: &mut ChildCountTable,
    game: &G,
    remoteness_max: Remoteness,
    n: Position,
    item: WorkItem,
    stack: &mut Vec<WorkItem>,
) -> Result<(), SolverError> {
    let WorkItem {
        position,
        caller_value,
        caller_remoteness,
        update_only,
    } = item;

    // Primitives are final; nothing propagates through them.
    if db.visited(position) {
        return Ok(());
    }

    let my_value = db.get_value(position);
    let my_remoteness = db.get_remoteness(position);

    // (a) Child is LOSE: a move from `position` wins.
    if caller_value == Value::Lose {
        let candidate = saturating_increment(caller_remoteness, remoteness_max);
        if my_value == Value::Win {
            if candidate < my_remoteness {
                update_remoteness_and_propagate(
                    db, game, n, position, Value::Win, candidate, stack,
                )?;
            }
        } else {
            store_value_and_propagate(
                db, game, n, position, Value::Win, candidate, stack,
            )?;
        }
        return Ok(());
    }

    // (b) Child is TIE with finite remoteness, and `position` isn't WIN.
    if caller_value == Value::Tie
        && caller_remoteness < remoteness_max
        && my_value != Value::Win
    {
        let candidate = saturating_increment(caller_remoteness, remoteness_max);
        if my_value == Value::Tie {
            if candidate < my_remoteness {
                update_remoteness_and_propagate(
                    db, game, n, position, Value::Tie, candidate, stack,
                )?;
            }
        } else {
            store_value_and_propagate(
                db, game, n, position, Value::Tie, candidate, stack,
            )?;
        }
        return Ok(());
    }

    // (c) Child is WIN, DRAW, or an out-of-range TIE (treated as a DRAW
    // child per `spec.md` §9's resolution of its first open question).
    if my_value != Value::Undecided {
        // Already decided; a losing/drawing child teaches nothing new.
        return Ok(());
    }

    if child_counts.is_uncounted(position) {
        let move_count = game.generate_moves(position).len() as i64;
        child_counts.set_count(position, move_count);
    }

    if !update_only {
        child_counts.decrement(position);
    }

    if child_counts.count(position) == 0 {
        let moves = game.generate_moves(position);
        let mut max_child_remoteness: Remoteness = 0;
        for m in moves {
            let child = validate(game.do_move(position, m), n, "DoMove")?;
            let r = db.get_remoteness(child);
            if r > max_child_remoteness {
                max_child_remoteness = r;
            }
        }
        let new_remoteness = saturating_increment(max_child_remoteness, remoteness_max);
        store_value_and_propagate(
            db, game, n, position, Value::Lose, new_remoteness, stack,
        )?;
    }

    Ok(())
}

fn store_value_and_propagate<G: Game>(
    db: &mut PositionDatabase,
    game: &G,
    n: Position,
    position: Position,
    value: Value,
    remoteness: Remoteness,
    stack: &mut Vec<WorkItem>,
) -> Result<(), SolverError> {
    db.set_value(position, value);
    db.set_remoteness(position, remoteness);
    for parent in game.generate_parents(position) {
        let parent = validate(parent, n, "GenerateParents")?;
        stack.push(WorkItem {
            position: parent,
            caller_value: value,
            caller_remoteness: remoteness,
            update_only: false,
        });
    }
    Ok(())
}

fn update_remoteness_and_propagate<G: Game>(
    db: &mut PositionDatabase,
    game: &G,
    n: Position,
    position: Position,
    value: Value,
    remoteness: Remoteness,
    stack: &mut Vec<WorkItem>,
) -> Result<(), SolverError> {
    db.set_remoteness(position, remoteness);
    for parent in game.generate_parents(position) {
        let parent = validate(parent, n, "GenerateParents")?;
        stack.push(WorkItem {
            position: parent,
            caller_value: value,
            caller_remoteness: remoteness,
            update_only: true,
        });
    }
    Ok(())
}

/* GO-AGAIN PROPAGATOR */

/// Runs the go-again propagator to quiescence, starting from the positions
/// in `seed`. Unlike the no-go-again propagator, a work item here carries no
/// information about which child changed — it only says "some descendant of
/// this position changed, recompute it from scratch" — so `seed` is just a
/// list of positions to (re-)visit.
pub fn go_again<G: Game>(
    db: &mut PositionDatabase,
    game: &G,
    remoteness_max: Remoteness,
    seed: Vec<Position>,
) -> Result<(), SolverError> {
    let n = db.len();
    let mut stack = seed;

    while let Some(position) = stack.pop() {
        step_go_again(db, game, remoteness_max, n, position, &mut stack)?;
    }
    Ok(())
}

fn step_go_again<G: Game>(
    db: &mut PositionDatabase,
    game: &G,
    remoteness_max: Remoteness,
    n: Position,
    position: Position,
    stack: &mut Vec<Position>,
) -> Result<(), SolverError> {
    if db.visited(position) {
        return Ok(());
    }

    let old_value = db.get_value(position);
    let old_remoteness = db.get_remoteness(position);

    let mut found_lose = false;
    let mut lose_remoteness = remoteness_max;
    let mut found_tie = false;
    let mut tie_remoteness = remoteness_max;
    let mut found_win = false;
    let mut win_remoteness: Remoteness = 0;
    let mut found_undecided_or_draw = false;

    for m in game.generate_moves(position) {
        let child = validate(game.do_move(position, m), n, "DoMove")?;
        let mut child_value = db.get_value(child);
        let child_remoteness = db.get_remoteness(child);

        if game.go_again(position, m) {
            child_value = child_value.invert_for_go_again();
        }

        match child_value {
            Value::Lose => {
                found_lose = true;
                if child_remoteness < lose_remoteness {
                    lose_remoteness = child_remoteness;
                }
            },
            Value::Tie if child_remoteness < remoteness_max => {
                found_tie = true;
                if child_remoteness < tie_remoteness {
                    tie_remoteness = child_remoteness;
                }
            },
            Value::Win => {
                found_win = true;
                if child_remoteness > win_remoteness {
                    win_remoteness = child_remoteness;
                }
            },
            _ => found_undecided_or_draw = true,
        }
    }

    let (new_value, new_remoteness) = if found_lose {
        (Value::Win, lose_remoteness)
    } else if found_tie {
        (Value::Tie, tie_remoteness)
    } else if found_undecided_or_draw {
        // Draw or undecided; leave this position pending for Phase 3.
        return Ok(());
    } else if found_win {
        (Value::Lose, win_remoteness)
    } else {
        // No moves at all on an unvisited (non-primitive) position would
        // violate the oracle's contract; nothing to do defensively.
        return Ok(());
    };

    let new_remoteness = saturating_increment(new_remoteness, remoteness_max);

    if new_value != old_value {
        db.set_value(position, new_value);
        db.set_remoteness(position, new_remoteness);
        for parent in game.generate_parents(position) {
            stack.push(validate(parent, n, "GenerateParents")?);
        }
    } else if new_remoteness != old_remoteness {
        db.set_remoteness(position, new_remoteness);
        for parent in game.generate_parents(position) {
            stack.push(validate(parent, n, "GenerateParents")?);
        }
    }

    Ok(())
}
