use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec;
use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// One player's grid: tile layout plus everything the players did to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    config: BoardConfig,
    cells: Array2<Cell>,
}

impl Board {
    /// Places mines, questions and surprises uniformly at random on distinct cells.
    pub fn generate<R: RandomSource + ?Sized>(config: BoardConfig, rng: &mut R) -> Result<Self> {
        let config = config.validate()?;
        let mut slots = vec![None; config.total_cells().into()];

        scatter(&mut slots, CellKind::Mine, config.mines, rng);
        scatter(&mut slots, CellKind::Question, config.questions, rng);
        scatter(&mut slots, CellKind::Surprise, config.surprises, rng);
        log::debug!(
            "Generated {0}x{0} board with {1} mines, {2} questions, {3} surprises",
            config.size,
            config.mines,
            config.questions,
            config.surprises
        );

        Ok(Self::from_slots(config, &slots))
    }

    /// Builds a board with tiles at fixed coordinates.
    pub fn from_layout(
        size: Coord,
        mines: &[Coord2],
        questions: &[Coord2],
        surprises: &[Coord2],
    ) -> Result<Self> {
        let count = |coords: &[Coord2]| CellCount::try_from(coords.len()).unwrap_or(CellCount::MAX);
        let config = BoardConfig::new(size, count(mines), count(questions), count(surprises))?;
        let mut slots = vec![None; config.total_cells().into()];

        let tiles = mines
            .iter()
            .map(|&coords| (coords, CellKind::Mine))
            .chain(questions.iter().map(|&coords| (coords, CellKind::Question)))
            .chain(surprises.iter().map(|&coords| (coords, CellKind::Surprise)));
        for (coords, kind) in tiles {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::InvalidCoords);
            }
            let slot = &mut slots[usize::from(coords.0) * usize::from(size) + usize::from(coords.1)];
            if slot.is_some() {
                return Err(GameError::OverlappingTiles);
            }
            *slot = Some(kind);
        }

        Ok(Self::from_slots(config, &slots))
    }

    /// `slots` is row-major, `None` marks a plain cell whose kind follows from its mine count.
    fn from_slots(config: BoardConfig, slots: &[Option<CellKind>]) -> Self {
        let side = config.size;
        let kind_at = |(x, y): Coord2| slots[usize::from(x) * usize::from(side) + usize::from(y)];

        let cells = Array2::from_shape_fn((usize::from(side), usize::from(side)), |(x, y)| {
            let coords = (x as Coord, y as Coord);
            let adjacent_mines = Neighbors::new(coords, side)
                .filter(|&pos| kind_at(pos) == Some(CellKind::Mine))
                .count() as u8;
            let kind = kind_at(coords).unwrap_or(if adjacent_mines == 0 {
                CellKind::Empty
            } else {
                CellKind::Number
            });
            Cell::new(kind, adjacent_mines)
        });

        Self { config, cells }
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn size(&self) -> Coord {
        self.config.size
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn get(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    pub fn positions(&self) -> impl Iterator<Item = Coord2> + use<> {
        let side = self.size();
        (0..square(side)).map(move |index| from_linear(index, side))
    }

    pub fn count_kind(&self, kind: CellKind) -> CellCount {
        self.cells.iter().filter(|cell| cell.kind == kind).count() as CellCount
    }

    pub fn count_mines(&self) -> CellCount {
        self.count_kind(CellKind::Mine)
    }

    pub fn count_revealed(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_revealed()).count() as CellCount
    }

    /// Mines minus every mine marker on the board, wrong flags included.
    pub fn mines_left(&self) -> isize {
        let marked = self.cells.iter().filter(|cell| cell.marks_mine()).count();
        self.config.mines as isize - marked as isize
    }

    /// Win condition: every mine carries a flag, whatever the state of the other cells.
    /// An exploded mine stays marked and counts as flagged, since it can never be flagged again.
    pub fn all_mines_flagged(&self) -> bool {
        self.cells
            .iter()
            .filter(|cell| cell.is_mine())
            .all(|cell| cell.marks_mine())
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = self[coords];

        Ok(match (cell.state, cell.is_mine()) {
            (CellState::Hidden, true) => {
                self.cells[coords.to_nd_index()].state = CellState::Exploded;
                log::debug!("Mine hit at {:?}", coords);
                RevealOutcome::HitMine
            }
            (CellState::Hidden, false) => RevealOutcome::Revealed {
                cells: self.reveal_zero_region(coords)?,
            },
            _ => RevealOutcome::NoChange,
        })
    }

    /// Reveals `start` and, when it is empty, floods through every connected
    /// empty cell, revealing the numbered and special cells on the border
    /// without expanding them. Mines, flags and revealed cells stop the flood.
    ///
    /// Returns how many cells were newly revealed.
    pub fn reveal_zero_region(&mut self, start: Coord2) -> Result<CellCount> {
        let start = self.validate_coords(start)?;
        let side = self.size();
        let mut revealed = 0;
        let mut visited = BTreeSet::from([start]);
        let mut to_visit = VecDeque::from([start]);

        while let Some(coords) = to_visit.pop_front() {
            let cell = &mut self.cells[coords.to_nd_index()];
            if !cell.is_hidden() || cell.is_mine() {
                continue;
            }
            cell.state = CellState::Revealed;
            revealed += 1;
            let kind = cell.kind;
            log::trace!("Revealed {:?} at {:?}", kind, coords);

            if kind == CellKind::Empty {
                to_visit.extend(Neighbors::new(coords, side).filter(|&pos| visited.insert(pos)));
            }
        }

        if revealed > 1 {
            log::debug!("Flood from {:?} revealed {} cells", start, revealed);
        }
        Ok(revealed)
    }

    /// Flags a hidden cell or clears a wrong flag. Flags on mines stay put.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];

        Ok(match cell.state {
            CellState::Hidden => {
                cell.state = CellState::Flagged;
                FlagOutcome::Flagged {
                    on_mine: cell.is_mine(),
                }
            }
            CellState::Flagged if cell.is_mine() => FlagOutcome::NoChange,
            CellState::Flagged => {
                cell.state = CellState::Hidden;
                FlagOutcome::Unflagged
            }
            CellState::Revealed | CellState::Exploded => FlagOutcome::NoChange,
        })
    }

    /// Marks a revealed question or surprise as spent.
    pub fn mark_used(&mut self, coords: Coord2) -> Result<CellKind> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];
        if !cell.can_activate() {
            return Err(GameError::NotActivatable);
        }
        cell.used = true;
        Ok(cell.kind)
    }

    /// Reveals every hidden safe cell in the 3x3 window around `center`.
    /// Empty cells in the window do not cascade.
    pub fn reveal_area(&mut self, center: Coord2) -> Result<CellCount> {
        let center = self.validate_coords(center)?;
        let mut revealed = 0;
        for coords in core::iter::once(center).chain(Neighbors::new(center, self.size())) {
            let cell = &mut self.cells[coords.to_nd_index()];
            if cell.is_hidden() && !cell.is_mine() {
                cell.state = CellState::Revealed;
                revealed += 1;
            }
        }
        log::debug!("Bonus revealed {} cells around {:?}", revealed, center);
        Ok(revealed)
    }

    /// Flags one hidden mine picked at random, if any is left.
    pub fn mark_random_mine<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Option<Coord2> {
        let hidden_mines: Vec<_> = self
            .positions()
            .filter(|&coords| {
                let cell = self[coords];
                cell.is_mine() && cell.is_hidden()
            })
            .collect();
        if hidden_mines.is_empty() {
            return None;
        }

        let pick = rng.below(hidden_mines.len() as CellCount);
        let coords = hidden_mines[usize::from(pick)];
        self.cells[coords.to_nd_index()].state = CellState::Flagged;
        log::debug!("Bonus flagged mine at {:?}", coords);
        Some(coords)
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
