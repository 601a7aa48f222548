use serde::{Deserialize, Serialize};

/// What a cell holds, fixed at generation time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Empty,
    Number,
    Mine,
    Question,
    Surprise,
}

impl CellKind {
    pub const fn is_special(self) -> bool {
        matches!(self, Self::Question | Self::Surprise)
    }
}

/// What the players have done to a cell.
///
/// Revealed and flagged can never hold at the same time. `Exploded` is a mine
/// somebody stepped on; it keeps marking the mine like a flag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CellState {
    #[default]
    Hidden,
    Revealed,
    Flagged,
    Exploded,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub kind: CellKind,
    pub adjacent_mines: u8,
    pub state: CellState,
    /// Only meaningful for question and surprise cells.
    pub used: bool,
}

impl Cell {
    pub const fn new(kind: CellKind, adjacent_mines: u8) -> Self {
        Self {
            kind,
            adjacent_mines,
            state: CellState::Hidden,
            used: false,
        }
    }

    pub const fn is_mine(self) -> bool {
        matches!(self.kind, CellKind::Mine)
    }

    pub const fn is_hidden(self) -> bool {
        matches!(self.state, CellState::Hidden)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self.state, CellState::Revealed)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self.state, CellState::Flagged)
    }

    /// Whether the cell shows a mine marker, placed by hand or by an explosion.
    pub const fn marks_mine(self) -> bool {
        matches!(self.state, CellState::Flagged | CellState::Exploded)
    }

    pub const fn can_activate(self) -> bool {
        self.kind.is_special() && self.is_revealed() && !self.used
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new(CellKind::Empty, 0)
    }
}
