use serde::{Deserialize, Serialize};

/// Whether a cell has been opened. Only ever moves from `Closed` to `Opened`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Closed,
    Opened,
}

/// One grid position as stored by the engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) has_mine: bool,
    pub(crate) has_flag: bool,
    pub(crate) state: CellState,
    pub(crate) adjacent_mine_count: u8,
}

impl Cell {
    pub const fn has_mine(&self) -> bool {
        self.has_mine
    }

    pub const fn has_flag(&self) -> bool {
        self.has_flag
    }

    pub const fn state(&self) -> CellState {
        self.state
    }

    pub const fn is_opened(&self) -> bool {
        matches!(self.state, CellState::Opened)
    }

    /// Mines around this cell; stays 0 until the cell is opened.
    pub const fn adjacent_mine_count(&self) -> u8 {
        self.adjacent_mine_count
    }

    /// Closed and not flagged, i.e. a reveal would open it.
    pub const fn is_revealable(&self) -> bool {
        !self.has_flag && !self.is_opened()
    }
}

/// Read-only picture of a cell handed to renderers.
///
/// `has_mine` is only ever `true` for opened cells, or for every mined cell once the game is lost.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub state: CellState,
    pub has_mine: bool,
    pub has_flag: bool,
    pub adjacent_mine_count: u8,
    pub hovered: bool,
}
