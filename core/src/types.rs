use core::ops::RangeInclusive;

/// Single coordinate axis used for the board side and positions.
pub type Coord = u8;

/// Count type used for tile counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Signed amount applied to the shared score or lives.
pub type Points = i32;

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

/// Number of cells on a square board with the given side.
pub const fn square(side: Coord) -> CellCount {
    let side = side as CellCount;
    side.saturating_mul(side)
}

/// Converts a row-major linear index back to coordinates on a square board.
pub(crate) const fn from_linear(index: CellCount, side: Coord) -> Coord2 {
    let side = side as CellCount;
    ((index / side) as Coord, (index % side) as Coord)
}

fn window(center: Coord, side: Coord) -> RangeInclusive<Coord> {
    center.saturating_sub(1)..=center.saturating_add(1).min(side.saturating_sub(1))
}

/// Iterates over the 8-neighbourhood of a cell, clamped to the board.
#[derive(Clone, Debug)]
pub struct Neighbors {
    center: Coord2,
    side: Coord,
    xs: RangeInclusive<Coord>,
    ys: RangeInclusive<Coord>,
    x: Option<Coord>,
}

impl Neighbors {
    pub fn new(center: Coord2, side: Coord) -> Self {
        let mut xs = window(center.0, side);
        let x = xs.next();
        Self {
            center,
            side,
            xs,
            ys: window(center.1, side),
            x,
        }
    }
}

impl Iterator for Neighbors {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let x = self.x?;
            match self.ys.next() {
                Some(y) if (x, y) == self.center => continue,
                Some(y) => return Some((x, y)),
                None => {
                    self.x = self.xs.next();
                    self.ys = window(self.center.1, self.side);
                }
            }
        }
    }
}
