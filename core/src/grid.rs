use core::num::Saturating;
use core::ops::{Index, IndexMut};

use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// The board: a `width × height` matrix of cells plus the counters the game needs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
    mine_count: CellCount,
    remaining_safe_cells: Saturating<CellCount>,
    mines_placed: bool,
}

impl Grid {
    /// An empty board that will hold `mine_count` mines once [`Grid::place_mines`] runs.
    pub fn new(size: Coord2, mine_count: CellCount) -> Result<Self> {
        GameConfig::new(size, MineCount::Fixed(mine_count))?;

        Ok(Self {
            cells: Array2::default(size.to_nd_index()),
            mine_count,
            remaining_safe_cells: Saturating(cell_count(size) - mine_count),
            mines_placed: mine_count == 0,
        })
    }

    /// A board with mines at exactly the given coordinates; duplicates count once.
    pub fn with_mines(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if mine_coords.iter().any(|&coords| !in_bounds(coords, size)) {
            return Err(GameError::InvalidCoords);
        }

        let mut mask: Array2<bool> = Array2::default(size.to_nd_index());
        for &coords in mine_coords {
            mask[coords.to_nd_index()] = true;
        }
        let mine_count = mask
            .iter()
            .filter(|&&has_mine| has_mine)
            .count()
            .try_into()
            .map_err(|_| ConfigError::TooManyMines)?;

        let mut grid = Self::new(size, mine_count)?;
        for (cell, &has_mine) in grid.cells.iter_mut().zip(mask.iter()) {
            cell.has_mine = has_mine;
        }
        grid.mines_placed = true;
        Ok(grid)
    }

    /// Scatters the mines by rejection sampling: draw a random cell, retry if it is already mined.
    ///
    /// Fails with [`GameError::MinesAlreadyPlaced`] once mines are down or any cell is open.
    pub fn place_mines<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        use rand::prelude::*;

        if self.mines_placed || self.cells.iter().any(Cell::is_opened) {
            return Err(GameError::MinesAlreadyPlaced);
        }

        let (width, height) = self.size();
        let mut placed = 0;
        let mut draws = 0u32;
        while placed < self.mine_count {
            let coords = (rng.random_range(0..width), rng.random_range(0..height));
            draws += 1;
            let cell = &mut self[coords];
            if !cell.has_mine {
                cell.has_mine = true;
                placed += 1;
            }
        }
        self.mines_placed = true;

        log::debug!(
            "placed {} mines on {}x{} after {} draws",
            placed,
            width,
            height,
            draws
        );
        Ok(())
    }

    pub fn size(&self) -> Coord2 {
        let (width, height) = self.cells.dim();
        // dimensions come from a Coord2, so they always fit
        (width as Coord, height as Coord)
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size())
    }

    pub fn cell(&self, coords: Coord2) -> Option<&Cell> {
        self.contains(coords).then(|| &self[coords])
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    /// Safe cells still closed; the game is won when this reaches 0.
    pub fn remaining_safe_cells(&self) -> CellCount {
        self.remaining_safe_cells.0
    }

    pub fn flag_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.has_flag).count() as CellCount
    }

    pub fn mine_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.cells
            .indexed_iter()
            .filter(|(_, cell)| cell.has_mine)
            .map(|((x, y), _)| (x as Coord, y as Coord))
    }

    pub fn neighbors(&self, coords: Coord2) -> Neighbors {
        Neighbors::new(coords, self.size())
    }

    /// Number of mines around `coords`, regardless of flags or opened state.
    pub fn count_adjacent_mines(&self, coords: Coord2) -> u8 {
        self.neighbors(coords)
            .filter(|&pos| self[pos].has_mine)
            .count() as u8
    }

    /// Opens a cell in place, returning whether it was safe. Callers guarantee it is revealable.
    pub(crate) fn mark_opened(&mut self, coords: Coord2) -> bool {
        let adjacent_mine_count = self.count_adjacent_mines(coords);
        let cell = &mut self[coords];
        debug_assert!(cell.is_revealable());

        cell.state = CellState::Opened;
        if cell.has_mine {
            return false;
        }
        cell.adjacent_mine_count = adjacent_mine_count;
        self.remaining_safe_cells -= 1;
        true
    }

    pub(crate) fn set_flag(&mut self, coords: Coord2, has_flag: bool) {
        self[coords].has_flag = has_flag;
    }

    /// Coordinates of every cell, column by column.
    pub fn coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (width, height) = self.size();
        (0..width).flat_map(move |x| (0..height).map(move |y| (x, y)))
    }

    #[cfg(test)]
    pub(crate) fn opened_coords(&self) -> alloc::vec::Vec<Coord2> {
        self.coords().filter(|&pos| self[pos].is_opened()).collect()
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[cfg(target_arch = "wasm32")]
    use wasm_bindgen_test::wasm_bindgen_test as test;

    #[test]
    fn new_grid_is_closed_unflagged_and_mine_free() {
        let grid = Grid::new((4, 3), 2).unwrap();

        assert_eq!(grid.size(), (4, 3));
        assert_eq!(grid.mine_count(), 2);
        assert_eq!(grid.remaining_safe_cells(), 10);
        assert!(grid.coords().all(|pos| grid[pos] == Cell::default()));
        assert_eq!(grid.mine_coords().count(), 0);
    }

    #[test]
    fn new_rejects_invalid_configuration() {
        assert_eq!(
            Grid::new((0, 3), 0),
            Err(GameError::InvalidConfiguration(ConfigError::EmptyBoard))
        );
        assert_eq!(
            Grid::new((2, 2), 4),
            Err(GameError::InvalidConfiguration(ConfigError::TooManyMines))
        );
    }

    #[test]
    fn place_mines_places_exact_distinct_count() {
        let mut rng = StdRng::seed_from_u64(42);
        for (size, mines) in [((1, 2), 1), ((3, 3), 8), ((8, 8), 21), ((30, 16), 99)] {
            let mut grid = Grid::new(size, mines).unwrap();
            grid.place_mines(&mut rng).unwrap();

            let placed: Vec<_> = grid.mine_coords().collect();
            assert_eq!(placed.len(), mines as usize, "size {:?}", size);
            assert!(placed.iter().all(|&pos| grid.contains(pos)));
        }
    }

    #[test]
    fn place_mines_runs_only_once() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut grid = Grid::new((4, 4), 3).unwrap();

        grid.place_mines(&mut rng).unwrap();

        assert_eq!(
            grid.place_mines(&mut rng),
            Err(GameError::MinesAlreadyPlaced)
        );
        assert_eq!(grid.mine_coords().count(), 3);
    }

    #[test]
    fn place_mines_refuses_a_board_with_open_cells() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = Grid::new((2, 1), 1).unwrap();
        grid.mark_opened((0, 0));

        assert_eq!(
            grid.place_mines(&mut rng),
            Err(GameError::MinesAlreadyPlaced)
        );
        assert!(!grid.mines_placed());
        assert_eq!(grid.mine_coords().count(), 0);
    }

    #[test]
    fn with_mines_rejects_out_of_bounds() {
        assert_eq!(
            Grid::with_mines((2, 2), &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn with_mines_rejects_full_board() {
        assert_eq!(
            Grid::with_mines((1, 2), &[(0, 0), (0, 1)]),
            Err(GameError::InvalidConfiguration(ConfigError::TooManyMines))
        );
    }

    #[test]
    fn count_adjacent_mines_matches_brute_force() {
        let mines = [(0, 0), (2, 1), (3, 3), (1, 3), (4, 0)];
        let grid = Grid::with_mines((5, 4), &mines).unwrap();

        for (x, y) in grid.coords() {
            let expected = mines
                .iter()
                .filter(|&&(mx, my)| {
                    (mx, my) != (x, y) && mx.abs_diff(x) <= 1 && my.abs_diff(y) <= 1
                })
                .count() as u8;
            assert_eq!(grid.count_adjacent_mines((x, y)), expected, "at {:?}", (x, y));
        }
    }

    #[test]
    fn count_adjacent_mines_ignores_flags_and_open_state() {
        let mut grid = Grid::with_mines((3, 3), &[(0, 0), (2, 2)]).unwrap();
        let before = grid.count_adjacent_mines((1, 1));

        grid.set_flag((0, 0), true);
        grid.mark_opened((0, 1));

        assert_eq!(before, 2);
        assert_eq!(grid.count_adjacent_mines((1, 1)), 2);
    }

    #[test]
    fn cell_returns_none_out_of_bounds() {
        let grid = Grid::new((2, 2), 0).unwrap();

        assert!(grid.cell((1, 1)).is_some());
        assert!(grid.cell((2, 1)).is_none());
    }
}
