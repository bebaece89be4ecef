use bitflags::bitflags;
use minesweeper_core::{Changes, Coord, Coord2, PointerInput};

use crate::settings::RenderConfig;

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub(crate) struct MouseButtons: u16 {
        const LEFT    = 1;
        const RIGHT   = 1 << 1;
        const MIDDLE  = 1 << 2;
        const BACK    = 1 << 3;
        const FORWARD = 1 << 4;
    }
}

/// Pixel geometry of the board on the drawing surface.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct CellMetrics {
    cell_width: u16,
    cell_height: u16,
    size: Coord2,
}

impl CellMetrics {
    pub(crate) fn new(render: &RenderConfig, size: Coord2) -> Self {
        Self {
            cell_width: render.cell_width.max(1),
            cell_height: render.cell_height.max(1),
            size,
        }
    }

    pub(crate) fn surface_size(&self) -> (u32, u32) {
        (
            u32::from(self.cell_width) * u32::from(self.size.0),
            u32::from(self.cell_height) * u32::from(self.size.1),
        )
    }

    pub(crate) fn cell_size(&self) -> (f64, f64) {
        (f64::from(self.cell_width), f64::from(self.cell_height))
    }

    /// Top-left corner of a cell in surface pixels.
    pub(crate) fn origin(&self, (x, y): Coord2) -> (f64, f64) {
        let (width, height) = self.cell_size();
        (f64::from(x) * width, f64::from(y) * height)
    }

    /// Cell under a pointer offset, if the point lies on the board.
    pub(crate) fn cell_at(&self, offset_x: i32, offset_y: i32) -> Option<Coord2> {
        let x = Self::axis(offset_x, self.cell_width, self.size.0)?;
        let y = Self::axis(offset_y, self.cell_height, self.size.1)?;
        Some((x, y))
    }

    fn axis(offset: i32, cell: u16, cells: Coord) -> Option<Coord> {
        let index = u32::try_from(offset).ok()? / u32::from(cell);
        Coord::try_from(index).ok().filter(|&index| index < cells)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum PointerAction {
    Move(Coord2),
    Leave,
    Primary(Coord2),
    Secondary(Coord2),
}

impl PointerAction {
    pub(crate) fn dispatch<P: PointerInput>(self, target: &mut P) -> Changes {
        match self {
            Self::Move(coords) => target.on_pointer_move(coords),
            Self::Leave => target.on_pointer_leave(),
            Self::Primary(coords) => target.on_primary_click(coords),
            Self::Secondary(coords) => target.on_secondary_click(coords),
        }
    }
}

/// Turns raw press/release pairs into clicks.
///
/// A click only counts when the button goes up over the cell it went down on.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct PointerTracker {
    pressed: Option<(Coord2, MouseButtons)>,
}

impl PointerTracker {
    pub(crate) fn press(&mut self, cell: Option<Coord2>, buttons: MouseButtons) {
        self.pressed = cell.map(|coords| (coords, buttons));
    }

    pub(crate) fn release(&mut self, cell: Option<Coord2>) -> Option<PointerAction> {
        let (pressed_at, buttons) = self.pressed.take()?;
        if cell != Some(pressed_at) {
            log::trace!("press on {:?} released elsewhere", pressed_at);
            return None;
        }

        match buttons {
            MouseButtons::LEFT => Some(PointerAction::Primary(pressed_at)),
            MouseButtons::RIGHT => Some(PointerAction::Secondary(pressed_at)),
            _ => None,
        }
    }

    pub(crate) fn cancel(&mut self) {
        self.pressed = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minesweeper_core::{GameController, GameOutcome, Grid};

    fn metrics() -> CellMetrics {
        let render = RenderConfig {
            cell_width: 64,
            cell_height: 32,
            ..RenderConfig::default()
        };
        CellMetrics::new(&render, (4, 3))
    }

    #[test]
    fn pixel_offsets_map_to_cells_by_integer_division() {
        let metrics = metrics();

        assert_eq!(metrics.cell_at(0, 0), Some((0, 0)));
        assert_eq!(metrics.cell_at(63, 31), Some((0, 0)));
        assert_eq!(metrics.cell_at(64, 32), Some((1, 1)));
        assert_eq!(metrics.cell_at(255, 95), Some((3, 2)));
    }

    #[test]
    fn offsets_outside_the_board_map_to_nothing() {
        let metrics = metrics();

        assert_eq!(metrics.cell_at(-1, 10), None);
        assert_eq!(metrics.cell_at(10, -1), None);
        assert_eq!(metrics.cell_at(256, 10), None);
        assert_eq!(metrics.cell_at(10, 96), None);
        assert_eq!(metrics.cell_at(i32::MAX, 0), None);
    }

    #[test]
    fn surface_covers_every_cell() {
        let metrics = metrics();

        assert_eq!(metrics.surface_size(), (256, 96));
        assert_eq!(metrics.origin((3, 2)), (192., 64.));
    }

    #[test]
    fn release_on_the_pressed_cell_clicks() {
        let mut tracker = PointerTracker::default();

        tracker.press(Some((1, 2)), MouseButtons::LEFT);
        assert_eq!(
            tracker.release(Some((1, 2))),
            Some(PointerAction::Primary((1, 2)))
        );

        tracker.press(Some((0, 0)), MouseButtons::RIGHT);
        assert_eq!(
            tracker.release(Some((0, 0))),
            Some(PointerAction::Secondary((0, 0)))
        );
    }

    #[test]
    fn release_elsewhere_or_with_chords_does_nothing() {
        let mut tracker = PointerTracker::default();

        tracker.press(Some((1, 2)), MouseButtons::LEFT);
        assert_eq!(tracker.release(Some((1, 1))), None);

        tracker.press(Some((1, 2)), MouseButtons::LEFT | MouseButtons::RIGHT);
        assert_eq!(tracker.release(Some((1, 2))), None);

        tracker.press(Some((1, 2)), MouseButtons::LEFT);
        tracker.cancel();
        assert_eq!(tracker.release(Some((1, 2))), None);

        assert_eq!(tracker.release(Some((1, 2))), None);
    }

    #[test]
    fn actions_drive_the_controller() {
        let grid = Grid::with_mines((3, 1), &[(2, 0)]).unwrap();
        let mut game = GameController::with_grid(grid, ()).unwrap();

        assert!(PointerAction::Move((0, 0)).dispatch(&mut game).has_update());
        assert_eq!(game.hovered(), Some((0, 0)));

        PointerAction::Secondary((2, 0)).dispatch(&mut game);
        assert!(game.grid()[(2, 0)].has_flag());

        PointerAction::Leave.dispatch(&mut game);
        assert_eq!(game.hovered(), None);

        PointerAction::Primary((0, 0)).dispatch(&mut game);
        assert_eq!(game.outcome(), GameOutcome::Won);
    }
}
