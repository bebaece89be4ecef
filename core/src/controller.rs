use alloc::vec::Vec;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl GameOutcome {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Cells whose view changed during one operation; empty when the operation was rejected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Changes {
    cells: Vec<Coord2>,
}

impl Changes {
    pub fn has_update(&self) -> bool {
        !self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Coord2] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.cells.iter().copied()
    }

    fn push(&mut self, coords: Coord2) {
        self.cells.push(coords);
    }

    fn normalize(&mut self) {
        self.cells.sort_unstable();
        self.cells.dedup();
    }
}

impl From<Vec<Coord2>> for Changes {
    fn from(cells: Vec<Coord2>) -> Self {
        Self { cells }
    }
}

impl IntoIterator for Changes {
    type Item = Coord2;
    type IntoIter = alloc::vec::IntoIter<Coord2>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

/// Owns one game session: the grid, its outcome and the hovered cell.
///
/// Every gameplay method returns the cells that need repainting. Moves that make no sense
/// (outside the board, on a flagged or opened cell, after the game ended) are ignored and
/// return an empty [`Changes`].
#[derive(Clone, Debug)]
pub struct GameController<L = ()> {
    grid: Grid,
    outcome: GameOutcome,
    hovered: Option<Coord2>,
    listener: L,
}

impl<L: OutcomeListener> GameController<L> {
    /// Starts a game with mines scattered by `rng`.
    pub fn new<R: Rng + ?Sized>(config: GameConfig, rng: &mut R, listener: L) -> Result<Self> {
        let mine_count = config.resolve_mine_count(rng)?;
        let mut grid = Grid::new(config.size, mine_count)?;
        grid.place_mines(rng)?;
        Self::with_grid(grid, listener)
    }

    /// Starts a game on a prepared grid, which must already have its mines.
    pub fn with_grid(grid: Grid, listener: L) -> Result<Self> {
        if !grid.mines_placed() {
            return Err(GameError::MinesNotPlaced);
        }

        log::debug!(
            "new game: {:?} with {} mines",
            grid.size(),
            grid.mine_count()
        );
        Ok(Self {
            grid,
            outcome: GameOutcome::InProgress,
            hovered: None,
            listener,
        })
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn hovered(&self) -> Option<Coord2> {
        self.hovered
    }

    /// Mines not yet accounted for by a flag; negative when the player over-flags.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.grid.mine_count()) - i32::from(self.grid.flag_count())
    }

    pub fn cell_view(&self, coords: Coord2) -> Option<CellView> {
        let cell = self.grid.cell(coords)?;
        let mines_visible = cell.is_opened() || self.outcome == GameOutcome::Lost;

        Some(CellView {
            state: cell.state(),
            has_mine: cell.has_mine() && mines_visible,
            has_flag: cell.has_flag(),
            adjacent_mine_count: cell.adjacent_mine_count(),
            hovered: self.hovered == Some(coords),
        })
    }

    pub fn reveal(&mut self, coords: Coord2) -> Changes {
        if !self.accepts_move_at(coords) {
            return Changes::default();
        }
        if self.grid[coords].has_flag() {
            log::trace!("reveal on flagged cell {:?} ignored", coords);
            return Changes::default();
        }

        let opening = reveal::open(&mut self.grid, coords);
        let mut changes = Changes::from(opening.opened);

        if self.hovered.is_some_and(|pos| self.grid[pos].is_opened()) {
            self.hovered = None;
        }

        match opening.outcome {
            OpenOutcome::NoChange => {}
            OpenOutcome::MineTriggered => self.finish(GameOutcome::Lost, &mut changes),
            OpenOutcome::Opened if self.grid.remaining_safe_cells() == 0 => {
                self.finish(GameOutcome::Won, &mut changes)
            }
            OpenOutcome::Opened => {}
        }

        changes
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Changes {
        if !self.accepts_move_at(coords) {
            return Changes::default();
        }

        let cell = self.grid[coords];
        if cell.is_opened() {
            log::trace!("flag on opened cell {:?} ignored", coords);
            return Changes::default();
        }

        self.grid.set_flag(coords, !cell.has_flag());
        Changes::from(alloc::vec![coords])
    }

    /// Moves the hover highlight to `coords`, clearing the previous one.
    ///
    /// Only closed cells inside the board get highlighted; anything else just clears it.
    pub fn set_hover(&mut self, coords: Coord2) -> Changes {
        if self.outcome.is_finished() {
            return Changes::default();
        }

        let next = self
            .grid
            .cell(coords)
            .filter(|cell| !cell.is_opened())
            .map(|_| coords);
        if next == self.hovered {
            return Changes::default();
        }

        let previous = core::mem::replace(&mut self.hovered, next);
        Changes::from(previous.into_iter().chain(next).collect::<Vec<_>>())
    }

    pub fn clear_hover(&mut self) -> Changes {
        Changes::from(self.hovered.take().into_iter().collect::<Vec<_>>())
    }

    fn accepts_move_at(&self, coords: Coord2) -> bool {
        if self.outcome.is_finished() {
            log::trace!("move at {:?} after game end ignored", coords);
            return false;
        }
        if !self.grid.contains(coords) {
            log::trace!("move at {:?} outside the board ignored", coords);
            return false;
        }
        true
    }

    fn finish(&mut self, outcome: GameOutcome, changes: &mut Changes) {
        debug_assert!(!self.outcome.is_finished());
        self.outcome = outcome;

        if let Some(pos) = self.hovered.take() {
            changes.push(pos);
        }

        log::debug!("game over: {:?}", outcome);
        match outcome {
            GameOutcome::Lost => {
                for pos in self.grid.mine_coords() {
                    changes.push(pos);
                }
                changes.normalize();
                self.listener.on_loss();
            }
            GameOutcome::Won => {
                changes.normalize();
                self.listener.on_win();
            }
            GameOutcome::InProgress => {}
        }
    }
}

impl<L: OutcomeListener> PointerInput for GameController<L> {
    fn on_pointer_move(&mut self, coords: Coord2) -> Changes {
        self.set_hover(coords)
    }

    fn on_pointer_leave(&mut self) -> Changes {
        self.clear_hover()
    }

    fn on_primary_click(&mut self, coords: Coord2) -> Changes {
        self.reveal(coords)
    }

    fn on_secondary_click(&mut self, coords: Coord2) -> Changes {
        self.toggle_flag(coords)
    }
}
