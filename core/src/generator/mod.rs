use crate::*;
pub use random::*;

mod random;

/// Source of every random decision the game makes: tile placement, coin-flip
/// rewards and surprise outcomes.
pub trait RandomSource {
    /// Uniform value in `0..upper`, `upper` is never zero.
    fn below(&mut self, upper: CellCount) -> CellCount;

    /// Fair coin.
    fn coin_flip(&mut self) -> bool;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn below(&mut self, upper: CellCount) -> CellCount {
        (**self).below(upper)
    }

    fn coin_flip(&mut self) -> bool {
        (**self).coin_flip()
    }
}
