//! Placement gate and free-position search.

use thiserror::Error;
use tracing::debug;

use super::{Bounds, Position, Shape, BOUNDS_TOLERANCE};

/// Number of grid candidates [`find_spawn_position`] evaluates before giving up.
pub const DEFAULT_SEARCH_BUDGET: u64 = 4_000_000;

/// Accepts `candidate` if its footprint lies inside `bounds` and it overlaps none of `others`.
pub fn check_placement<'a>(
    candidate: &Shape,
    bounds: &Bounds,
    others: impl IntoIterator<Item = &'a Shape>,
) -> Result<(), PlacementError> {
    if !bounds.contains(&candidate.extent()) {
        return Err(PlacementError::OutOfRoom);
    }
    if others.into_iter().any(|o| candidate.intersects_with(o)) {
        return Err(PlacementError::CollisionRejected);
    }
    Ok(())
}

/// Scans the room on an integer grid, row by row from the top, and returns the first position
/// at which `shape` passes the placement gate. The shape keeps its dimensions and angle.
pub fn find_spawn_position<'a>(
    shape: &Shape,
    bounds: &Bounds,
    others: impl IntoIterator<Item = &'a Shape>,
    budget: u64,
) -> Result<Position, PlacementError> {
    let extent = shape.extent();
    if !bounds.fits(&extent) {
        return Err(PlacementError::OutOfRoom);
    }

    // Anchors run from the origin up to where the footprint's far edge meets the room edge.
    // Rotated footprints can start left of or above their anchor, so the limit comes from the
    // footprint of the shape anchored at the origin rather than from its size.
    let origin = shape.with_position(Position::new(0.0, 0.0)).extent();
    let x_limit = bounds.width() - origin.max().x();
    let y_limit = bounds.height() - origin.max().y();
    if x_limit + BOUNDS_TOLERANCE < 0.0 || y_limit + BOUNDS_TOLERANCE < 0.0 {
        debug!(name = shape.name(), "footprint cannot reach a grid anchor inside the room");
        return Err(PlacementError::NoFreePosition);
    }
    let x_max = (x_limit + BOUNDS_TOLERANCE).floor() as u64;
    let y_max = (y_limit + BOUNDS_TOLERANCE).floor() as u64;

    let others = others.into_iter().collect::<Vec<_>>();
    let mut candidates = 0;
    for y in 0..=y_max {
        for x in 0..=x_max {
            if candidates == budget {
                debug!(budget, name = shape.name(), "spawn search exceeded budget");
                return Err(PlacementError::SearchBudgetExceeded { budget });
            }
            candidates += 1;

            let position = Position::new(x as f64, y as f64);
            let candidate = shape.with_position(position);
            if check_placement(&candidate, bounds, others.iter().copied()).is_ok() {
                debug!(candidates, x, y, name = shape.name(), "found spawn position");
                return Ok(position);
            }
        }
    }

    debug!(candidates, name = shape.name(), "no free spawn position");
    Err(PlacementError::NoFreePosition)
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    #[error("shape does not fit into the room")]
    OutOfRoom,
    #[error("shape would overlap another shape")]
    CollisionRejected,
    #[error("no free position left in the room")]
    NoFreePosition,
    #[error("no free position found within {budget} candidates")]
    SearchBudgetExceeded { budget: u64 },
}
