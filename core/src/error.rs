use thiserror::Error;

use crate::{CellCount, Points};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board needs a side of at least 2, got {0}")]
    BoardTooSmall(u8),
    #[error("Too many special tiles: requested {requested} but only {available} fit")]
    TooManySpecialTiles {
        requested: CellCount,
        available: CellCount,
    },
    #[error("Unknown difficulty")]
    UnknownDifficulty,
    #[error("Layout places more than one tile on the same cell")]
    OverlappingTiles,
    #[error("Cell is not a revealed, unused question or surprise")]
    NotActivatable,
    #[error("Activation costs {cost} points but the team only has {score}")]
    InsufficientScore { cost: Points, score: Points },
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
