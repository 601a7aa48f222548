use alloc::collections::VecDeque;

use crate::*;

/// Replays fixed answers, falling back to `0` and heads once a script runs dry.
#[derive(Debug, Default)]
pub(crate) struct ScriptedRandom {
    picks: VecDeque<CellCount>,
    flips: VecDeque<bool>,
}

impl ScriptedRandom {
    pub(crate) fn new(picks: &[CellCount], flips: &[bool]) -> Self {
        Self {
            picks: picks.iter().copied().collect(),
            flips: flips.iter().copied().collect(),
        }
    }

    pub(crate) fn flips(flips: &[bool]) -> Self {
        Self::new(&[], flips)
    }
}

impl RandomSource for ScriptedRandom {
    fn below(&mut self, upper: CellCount) -> CellCount {
        self.picks.pop_front().unwrap_or(0) % upper
    }

    fn coin_flip(&mut self) -> bool {
        self.flips.pop_front().unwrap_or(true)
    }
}
