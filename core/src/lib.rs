#![no_std]

extern crate alloc;

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use question::*;
pub use scoring::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod question;
mod scoring;
mod session;
#[cfg(test)]
mod testing;
mod types;

/// Upper bound for the shared lives, anything above converts to score.
pub const MAX_LIVES: Points = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn board_config(self) -> BoardConfig {
        use Difficulty::*;
        match self {
            Easy => BoardConfig::new_unchecked(9, 10, 6, 2),
            Medium => BoardConfig::new_unchecked(13, 26, 7, 3),
            Hard => BoardConfig::new_unchecked(16, 44, 11, 4),
        }
    }

    pub const fn starting_lives(self) -> Points {
        use Difficulty::*;
        match self {
            Easy => 10,
            Medium => 8,
            Hard => 6,
        }
    }

    pub const fn activation_cost(self) -> Points {
        ScoringStrategy::for_difficulty(self).activation_cost()
    }

    pub const fn name(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "EASY",
            Medium => "MEDIUM",
            Hard => "HARD",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(GameError::UnknownDifficulty)
    }
}

/// Board shape and how many tiles of each special kind it carries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: Coord,
    pub mines: CellCount,
    pub questions: CellCount,
    pub surprises: CellCount,
}

impl BoardConfig {
    pub const fn new_unchecked(
        size: Coord,
        mines: CellCount,
        questions: CellCount,
        surprises: CellCount,
    ) -> Self {
        Self {
            size,
            mines,
            questions,
            surprises,
        }
    }

    /// Checked constructor, at least one cell has to stay free of special tiles.
    pub fn new(
        size: Coord,
        mines: CellCount,
        questions: CellCount,
        surprises: CellCount,
    ) -> Result<Self> {
        Self::new_unchecked(size, mines, questions, surprises).validate()
    }

    pub fn validate(self) -> Result<Self> {
        if self.size < 2 {
            return Err(GameError::BoardTooSmall(self.size));
        }
        let requested = self.special_tiles();
        let available = self.total_cells() - 1;
        if requested > available {
            return Err(GameError::TooManySpecialTiles {
                requested,
                available,
            });
        }
        Ok(self)
    }

    pub const fn total_cells(&self) -> CellCount {
        square(self.size)
    }

    pub const fn special_tiles(&self) -> CellCount {
        self.mines
            .saturating_add(self.questions)
            .saturating_add(self.surprises)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed { cells: CellCount },
    HitMine,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Flagged { on_mine: bool },
    Unflagged,
}
