use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board width and height must be non-zero")]
    EmptyBoard,
    #[error("mine count must leave at least one safe cell")]
    TooManyMines,
    #[error("minimum mine count exceeds the maximum")]
    InvalidMineRange,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Mines were already placed on this grid")]
    MinesAlreadyPlaced,
    #[error("Mines must be placed before the game starts")]
    MinesNotPlaced,
}

pub type Result<T> = core::result::Result<T, GameError>;
