//! Opening cells, including the flood fill across zero-count regions.

use alloc::vec;
use alloc::vec::Vec;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OpenOutcome {
    /// The cell was flagged or already open.
    NoChange,
    Opened,
    MineTriggered,
}

/// Result of [`open`]: what happened and which cells changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Opening {
    pub outcome: OpenOutcome,
    pub opened: Vec<Coord2>,
}

impl Opening {
    const fn unchanged() -> Self {
        Self {
            outcome: OpenOutcome::NoChange,
            opened: Vec::new(),
        }
    }
}

/// Opens the cell at `coords`.
///
/// A flagged or already opened cell is left alone. A mined cell is opened and reported as
/// [`OpenOutcome::MineTriggered`]. A safe cell with no adjacent mines also opens every closed,
/// unflagged neighbor, repeating for each zero-count cell reached. Every cell is opened at most
/// once, so the fill visits no more than `width * height` cells and its result does not depend
/// on the order neighbors are taken from the work stack.
///
/// Nothing opens before the grid has its mines. `coords` must be inside the grid.
pub fn open(grid: &mut Grid, coords: Coord2) -> Opening {
    if !grid.mines_placed() || !grid[coords].is_revealable() {
        return Opening::unchanged();
    }

    if !grid.mark_opened(coords) {
        return Opening {
            outcome: OpenOutcome::MineTriggered,
            opened: vec![coords],
        };
    }

    let mut opened = vec![coords];
    let mut pending = Vec::new();
    if grid[coords].adjacent_mine_count() == 0 {
        pending.extend(grid.neighbors(coords));
    }

    while let Some(next) = pending.pop() {
        if !grid[next].is_revealable() {
            continue;
        }

        // zero-count cells have no mined neighbors, so everything reached here is safe
        grid.mark_opened(next);
        opened.push(next);

        if grid[next].adjacent_mine_count() == 0 {
            pending.extend(
                grid.neighbors(next)
                    .filter(|&pos| grid[pos].is_revealable()),
            );
        }
    }

    log::trace!("opened {} cells from {:?}", opened.len(), coords);
    Opening {
        outcome: OpenOutcome::Opened,
        opened,
    }
}
