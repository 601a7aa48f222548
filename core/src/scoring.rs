use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// How hard a question is, independent of the game difficulty.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QuestionDifficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl QuestionDifficulty {
    pub const ALL: [QuestionDifficulty; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Expert];

    pub const fn name(self) -> &'static str {
        use QuestionDifficulty::*;
        match self {
            Easy => "EASY",
            Medium => "MEDIUM",
            Hard => "HARD",
            Expert => "EXPERT",
        }
    }
}

impl fmt::Display for QuestionDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for QuestionDifficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(GameError::UnknownDifficulty)
    }
}

/// Board effect granted on top of points and lives.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardBonus {
    /// Reveal the safe cells around the activated tile.
    RevealArea,
    /// Flag one hidden mine.
    MarkMine,
}

/// Delta applied to the shared score and lives in one step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreResult {
    pub points: Points,
    pub lives: Points,
    pub bonus: Option<BoardBonus>,
}

impl ScoreResult {
    pub const NOTHING: ScoreResult = ScoreResult::new(0, 0);

    pub const fn new(points: Points, lives: Points) -> Self {
        Self {
            points,
            lives,
            bonus: None,
        }
    }

    pub const fn with_bonus(points: Points, lives: Points, bonus: BoardBonus) -> Self {
        Self {
            points,
            lives,
            bonus: Some(bonus),
        }
    }
}

/// Reward rules, one variant per game difficulty.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoringStrategy {
    Easy,
    Medium,
    Hard,
}

impl ScoringStrategy {
    pub const fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self::Easy,
            Difficulty::Medium => Self::Medium,
            Difficulty::Hard => Self::Hard,
        }
    }

    /// Points paid before a question or surprise is resolved.
    pub const fn activation_cost(self) -> Points {
        match self {
            Self::Easy => 5,
            Self::Medium => 8,
            Self::Hard => 12,
        }
    }

    const fn surprise_points(self) -> Points {
        match self {
            Self::Easy => 8,
            Self::Medium => 12,
            Self::Hard => 16,
        }
    }

    pub fn surprise_reward(self, good: bool) -> ScoreResult {
        let points = self.surprise_points();
        if good {
            ScoreResult::new(points, 1)
        } else {
            ScoreResult::new(-points, -1)
        }
    }

    /// Some branches toss a coin through `rng`, the others never touch it.
    pub fn question_reward<R: RandomSource + ?Sized>(
        self,
        question: QuestionDifficulty,
        correct: bool,
        rng: &mut R,
    ) -> ScoreResult {
        use BoardBonus::*;
        use QuestionDifficulty as Q;

        let mut coin = |heads: ScoreResult, tails: ScoreResult| {
            if rng.coin_flip() { heads } else { tails }
        };

        match (self, question, correct) {
            (Self::Easy, Q::Easy, true) => ScoreResult::new(3, 1),
            (Self::Easy, Q::Easy, false) => coin(ScoreResult::new(-3, 0), ScoreResult::NOTHING),
            (Self::Easy, Q::Medium, true) => ScoreResult::with_bonus(6, 0, RevealArea),
            (Self::Easy, Q::Medium, false) => coin(ScoreResult::new(-6, 0), ScoreResult::NOTHING),
            (Self::Easy, Q::Hard, true) => ScoreResult::with_bonus(10, 0, MarkMine),
            (Self::Easy, Q::Hard, false) => ScoreResult::new(-10, 0),
            (Self::Easy, Q::Expert, true) => ScoreResult::new(15, 2),
            (Self::Easy, Q::Expert, false) => ScoreResult::new(-15, -1),

            (Self::Medium, Q::Easy, true) => ScoreResult::new(8, 1),
            (Self::Medium, Q::Easy, false) => ScoreResult::new(-8, 0),
            (Self::Medium, Q::Medium, true) => ScoreResult::new(10, 1),
            (Self::Medium, Q::Medium, false) => {
                coin(ScoreResult::new(-10, -1), ScoreResult::NOTHING)
            }
            (Self::Medium, Q::Hard, true) => ScoreResult::new(15, 1),
            (Self::Medium, Q::Hard, false) => ScoreResult::new(-15, -1),
            (Self::Medium, Q::Expert, true) => ScoreResult::new(20, 2),
            (Self::Medium, Q::Expert, false) => {
                coin(ScoreResult::new(-20, -1), ScoreResult::new(-20, -2))
            }

            (Self::Hard, Q::Easy, true) => ScoreResult::new(10, 1),
            (Self::Hard, Q::Easy, false) => ScoreResult::new(-10, -1),
            (Self::Hard, Q::Medium, true) => coin(ScoreResult::new(15, 1), ScoreResult::new(15, 2)),
            (Self::Hard, Q::Medium, false) => {
                coin(ScoreResult::new(-15, -1), ScoreResult::new(-15, -2))
            }
            (Self::Hard, Q::Hard, true) => ScoreResult::new(20, 2),
            (Self::Hard, Q::Hard, false) => ScoreResult::new(-20, -2),
            (Self::Hard, Q::Expert, true) => ScoreResult::new(40, 3),
            (Self::Hard, Q::Expert, false) => ScoreResult::new(-40, -3),
        }
    }
}

impl From<Difficulty> for ScoringStrategy {
    fn from(difficulty: Difficulty) -> Self {
        Self::for_difficulty(difficulty)
    }
}
