use crate::*;

/// Pointer events already translated to board coordinates.
///
/// Front ends map device pixels to cells and feed the result here, which keeps the
/// gameplay side free of any notion of screen space.
pub trait PointerInput {
    fn on_pointer_move(&mut self, coords: Coord2) -> Changes;
    fn on_pointer_leave(&mut self) -> Changes;
    fn on_primary_click(&mut self, coords: Coord2) -> Changes;
    fn on_secondary_click(&mut self, coords: Coord2) -> Changes;
}
