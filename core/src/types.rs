/// Single axis of the board: width, height, or one component of a position.
pub type Coord = u8;

/// Count type for mines, flags and cells.
pub type CellCount = u16;

/// Board position or size as `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Total number of cells on a board of the given size.
pub const fn cell_count((width, height): Coord2) -> CellCount {
    (width as CellCount).saturating_mul(height as CellCount)
}

pub const fn in_bounds((x, y): Coord2, (width, height): Coord2) -> bool {
    x < width && y < height
}

const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Shifts `coords` by `offset`, yielding nothing when the result leaves the board.
fn shift(coords: Coord2, offset: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let x = coords.0.checked_add_signed(offset.0)?;
    let y = coords.1.checked_add_signed(offset.1)?;
    in_bounds((x, y), bounds).then_some((x, y))
}

/// Iterator over the up to 8 in-bounds cells surrounding a center cell.
#[derive(Clone, Debug)]
pub struct Neighbors {
    center: Coord2,
    bounds: Coord2,
    next: usize,
}

impl Neighbors {
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            next: 0,
        }
    }
}

impl Iterator for Neighbors {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&offset) = OFFSETS.get(self.next) {
            self.next += 1;
            if let Some(coords) = shift(self.center, offset, self.bounds) {
                return Some(coords);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(OFFSETS.len() - self.next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[cfg(target_arch = "wasm32")]
    use wasm_bindgen_test::wasm_bindgen_test as test;

    #[test]
    fn corner_edge_and_inner_cells_have_three_five_and_eight_neighbors() {
        let bounds = (4, 3);

        assert_eq!(Neighbors::new((0, 0), bounds).count(), 3);
        assert_eq!(Neighbors::new((3, 2), bounds).count(), 3);
        assert_eq!(Neighbors::new((1, 0), bounds).count(), 5);
        assert_eq!(Neighbors::new((0, 1), bounds).count(), 5);
        assert_eq!(Neighbors::new((1, 1), bounds).count(), 8);
    }

    #[test]
    fn neighbors_exclude_center_and_stay_adjacent() {
        let neighbors: Vec<_> = Neighbors::new((2, 1), (4, 3)).collect();

        assert!(!neighbors.contains(&(2, 1)));
        assert!(
            neighbors
                .iter()
                .all(|&(x, y)| x.abs_diff(2) <= 1 && y.abs_diff(1) <= 1)
        );
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert_eq!(Neighbors::new((0, 0), (1, 1)).next(), None);
    }

    #[test]
    fn cell_count_saturates() {
        assert_eq!(cell_count((8, 8)), 64);
        assert_eq!(cell_count((255, 255)), 65025);
    }
}
