use super::*;
use rand::prelude::*;

/// Default [`RandomSource`], a small fast generator seeded from a `u64` so a game can be replayed.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: SmallRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn below(&mut self, upper: CellCount) -> CellCount {
        self.rng.random_range(0..upper)
    }

    fn coin_flip(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }
}

/// Puts `count` tiles of `kind` on free slots chosen uniformly at random.
///
/// The caller guarantees there are at least `count` free slots.
pub(crate) fn scatter<R: RandomSource + ?Sized>(
    slots: &mut [Option<CellKind>],
    kind: CellKind,
    count: CellCount,
    rng: &mut R,
) {
    let mut free_slots = slots.iter().filter(|slot| slot.is_none()).count() as CellCount;
    let mut placed = 0;

    while placed < count {
        if free_slots == 0 {
            log::warn!("Ran out of free cells placing {:?}, placed {} of {}", kind, placed, count);
            break;
        }
        let mut place = rng.below(free_slots);
        for slot in slots.iter_mut().filter(|slot| slot.is_none()) {
            if place == 0 {
                *slot = Some(kind);
                placed += 1;
                free_slots -= 1;
                break;
            }
            place -= 1;
        }
    }
    log::trace!("Placed {} {:?} tiles", placed, kind);
}
