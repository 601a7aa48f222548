use serde::{Deserialize, Serialize};

use crate::*;

/// Points for every cell a reveal opens.
pub const SAFE_CELL_POINTS: Points = 1;
/// Points for flagging an actual mine.
pub const CORRECT_FLAG_POINTS: Points = 1;
/// Points for flagging a cell without a mine.
pub const WRONG_FLAG_POINTS: Points = -3;
/// Lives lost when a mine goes off.
pub const MINE_LIFE_COST: Points = 1;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const fn other(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SessionState {
    #[default]
    Active,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    NoChange,
    Revealed { cells: CellCount },
    HitMine,
    Flagged { correct: bool },
    Unflagged,
}

impl MoveOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// What an activated question or surprise did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Activation {
    pub kind: CellKind,
    pub cost: Points,
    pub reward: ScoreResult,
    /// Set for surprises only.
    pub good_surprise: Option<bool>,
    pub revealed_cells: CellCount,
    pub marked_mine: Option<Coord2>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub difficulty: Difficulty,
    pub final_score: Points,
    pub lives: Points,
    pub won: bool,
    pub moves: u32,
}

/// Clamps lives into `[0, MAX_LIVES]`. Lives above the cap are not lost, each
/// one converts into `activation_cost` points.
///
/// Returns the new `(lives, score)`.
pub const fn clamp_lives(lives: Points, score: Points, activation_cost: Points) -> (Points, Points) {
    if lives > MAX_LIVES {
        let excess = lives - MAX_LIVES;
        (MAX_LIVES, score + excess * activation_cost)
    } else if lives < 0 {
        (0, score)
    } else {
        (lives, score)
    }
}

/// Cooperative game: one board per player, one shared score and pool of lives.
///
/// Moves always apply to the board of the player whose turn it is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    difficulty: Difficulty,
    strategy: ScoringStrategy,
    boards: [Board; 2],
    score: Points,
    lives: Points,
    turn: Player,
    state: SessionState,
    moves: u32,
}

impl GameSession {
    pub fn new<R: RandomSource + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Result<Self> {
        let config = difficulty.board_config();
        let boards = [Board::generate(config, rng)?, Board::generate(config, rng)?];
        Ok(Self::with_boards(difficulty, boards))
    }

    pub fn with_boards(difficulty: Difficulty, boards: [Board; 2]) -> Self {
        Self {
            difficulty,
            strategy: ScoringStrategy::for_difficulty(difficulty),
            boards,
            score: 0,
            lives: difficulty.starting_lives(),
            turn: Player::One,
            state: SessionState::Active,
            moves: 0,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn score(&self) -> Points {
        self.score
    }

    pub fn lives(&self) -> Points {
        self.lives
    }

    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn board(&self, player: Player) -> &Board {
        &self.boards[player.index()]
    }

    pub fn current_board(&self) -> &Board {
        self.board(self.turn)
    }

    fn current_board_mut(&mut self) -> &mut Board {
        &mut self.boards[self.turn.index()]
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<MoveOutcome> {
        self.check_active()?;

        let outcome = match self.current_board_mut().reveal(coords)? {
            RevealOutcome::NoChange => return Ok(MoveOutcome::NoChange),
            RevealOutcome::Revealed { cells } => {
                self.apply(ScoreResult::new(Points::from(cells) * SAFE_CELL_POINTS, 0));
                MoveOutcome::Revealed { cells }
            }
            RevealOutcome::HitMine => {
                self.apply(ScoreResult::new(0, -MINE_LIFE_COST));
                MoveOutcome::HitMine
            }
        };
        self.end_move();
        Ok(outcome)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MoveOutcome> {
        self.check_active()?;

        let outcome = match self.current_board_mut().toggle_flag(coords)? {
            FlagOutcome::NoChange => return Ok(MoveOutcome::NoChange),
            FlagOutcome::Flagged { on_mine: true } => {
                self.apply(ScoreResult::new(CORRECT_FLAG_POINTS, 0));
                MoveOutcome::Flagged { correct: true }
            }
            FlagOutcome::Flagged { on_mine: false } => {
                self.apply(ScoreResult::new(WRONG_FLAG_POINTS, 0));
                MoveOutcome::Flagged { correct: false }
            }
            FlagOutcome::Unflagged => MoveOutcome::Unflagged,
        };
        self.end_move();
        Ok(outcome)
    }

    /// Checks that the current player may activate `coords` right now and
    /// tells which kind of tile it is.
    pub fn activatable(&self, coords: Coord2) -> Result<CellKind> {
        self.check_active()?;
        let cell = self.current_board().get(coords)?;
        if !cell.can_activate() {
            return Err(GameError::NotActivatable);
        }
        let cost = self.strategy.activation_cost();
        if self.score < cost {
            return Err(GameError::InsufficientScore {
                cost,
                score: self.score,
            });
        }
        Ok(cell.kind)
    }

    /// Resolves a question tile whose question the caller already asked.
    pub fn activate_question<R: RandomSource + ?Sized>(
        &mut self,
        coords: Coord2,
        question: QuestionDifficulty,
        correct: bool,
        rng: &mut R,
    ) -> Result<Activation> {
        if self.activatable(coords)? != CellKind::Question {
            return Err(GameError::NotActivatable);
        }
        let reward = self.strategy.question_reward(question, correct, rng);
        log::debug!(
            "{:?} answered a {} question {}: {:?}",
            self.turn,
            question,
            if correct { "correctly" } else { "wrong" },
            reward
        );
        self.activate(coords, CellKind::Question, reward, None, rng)
    }

    /// Resolves a surprise tile, a fair coin decides whether it is good.
    pub fn activate_surprise<R: RandomSource + ?Sized>(
        &mut self,
        coords: Coord2,
        rng: &mut R,
    ) -> Result<Activation> {
        if self.activatable(coords)? != CellKind::Surprise {
            return Err(GameError::NotActivatable);
        }
        let good = rng.coin_flip();
        let reward = self.strategy.surprise_reward(good);
        log::debug!("{:?} opened a {} surprise: {:?}", self.turn, if good { "good" } else { "bad" }, reward);
        self.activate(coords, CellKind::Surprise, reward, Some(good), rng)
    }

    /// Nothing is charged unless the tile can be marked used.
    fn activate<R: RandomSource + ?Sized>(
        &mut self,
        coords: Coord2,
        kind: CellKind,
        reward: ScoreResult,
        good_surprise: Option<bool>,
        rng: &mut R,
    ) -> Result<Activation> {
        self.current_board_mut().mark_used(coords)?;
        let cost = self.strategy.activation_cost();
        let mut activation = Activation {
            kind,
            cost,
            reward,
            good_surprise,
            revealed_cells: 0,
            marked_mine: None,
        };
        self.apply(ScoreResult::new(-cost, 0));

        match reward.bonus {
            Some(BoardBonus::RevealArea) => {
                activation.revealed_cells = self.current_board_mut().reveal_area(coords)?;
            }
            Some(BoardBonus::MarkMine) => {
                activation.marked_mine = self.current_board_mut().mark_random_mine(rng);
            }
            None => {}
        }
        self.apply(reward);
        self.check_win();
        Ok(activation)
    }

    /// Adds a delta to the shared score and lives, then clamps. Running out of
    /// lives ends the game. The board bonus is not handled here.
    pub fn apply(&mut self, delta: ScoreResult) {
        self.score += delta.points;
        self.lives += delta.lives;
        self.clamp();

        if self.lives <= 0 && !self.state.is_finished() {
            log::debug!("Out of lives with {} points", self.score);
            self.state = SessionState::Lost;
        }
    }

    fn clamp(&mut self) {
        let (lives, score) = clamp_lives(self.lives, self.score, self.strategy.activation_cost());
        if score != self.score {
            log::debug!("Converted {} extra lives into {} points", self.lives - lives, score - self.score);
        }
        self.lives = lives;
        self.score = score;
    }

    fn check_win(&mut self) {
        if self.state.is_finished() {
            return;
        }
        if self.boards.iter().any(Board::all_mines_flagged) {
            log::debug!("All mines flagged, team wins with {} points", self.score);
            self.state = SessionState::Won;
        }
    }

    fn end_move(&mut self) {
        self.moves += 1;
        self.check_win();
        if !self.state.is_finished() {
            self.turn = self.turn.other();
        }
    }

    fn check_active(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            difficulty: self.difficulty,
            final_score: self.score,
            lives: self.lives,
            won: matches!(self.state, SessionState::Won),
            moves: self.moves,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedRandom;

    /// 3x3 board: mine bottom-right, question top-left, surprise top-right.
    fn small_board() -> Board {
        Board::from_layout(3, &[(2, 2)], &[(0, 0)], &[(0, 2)]).unwrap()
    }

    fn session(difficulty: Difficulty) -> GameSession {
        GameSession::with_boards(difficulty, [small_board(), small_board()])
    }

    #[test]
    fn clamp_converts_excess_lives() {
        assert_eq!(clamp_lives(12, 100, 5), (10, 110));
        assert_eq!(clamp_lives(10, 100, 5), (10, 100));
        assert_eq!(clamp_lives(-2, 100, 12), (0, 100));
        assert_eq!(clamp_lives(4, -3, 8), (4, -3));
    }

    #[test]
    fn new_session_uses_difficulty() {
        let session = GameSession::new(Difficulty::Hard, &mut SeededRandom::new(5)).unwrap();

        assert_eq!(session.lives(), 6);
        assert_eq!(session.score(), 0);
        assert_eq!(session.turn(), Player::One);
        assert_eq!(session.board(Player::One).count_mines(), 44);
        assert_eq!(session.board(Player::Two).count_mines(), 44);
    }

    #[test]
    fn reveal_scores_and_passes_turn() {
        let mut session = session(Difficulty::Easy);

        assert_eq!(session.reveal((1, 1)), Ok(MoveOutcome::Revealed { cells: 1 }));
        assert_eq!(session.score(), 1);
        assert_eq!(session.turn(), Player::Two);
        assert!(session.board(Player::One)[(1, 1)].is_revealed());
        assert!(session.board(Player::Two)[(1, 1)].is_hidden());
    }

    #[test]
    fn no_change_keeps_turn() {
        let mut session = session(Difficulty::Easy);
        session.reveal((1, 1)).unwrap();
        session.reveal((1, 1)).unwrap();

        assert_eq!(session.turn(), Player::One);
        assert_eq!(session.reveal((1, 1)), Ok(MoveOutcome::NoChange));
        assert_eq!(session.turn(), Player::One);
        assert_eq!(session.reveal((7, 7)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn mine_costs_a_life() {
        let mut session = session(Difficulty::Medium);

        assert_eq!(session.reveal((2, 2)), Ok(MoveOutcome::HitMine));
        assert_eq!(session.lives(), 7);
        // exploded mine counts as flagged, the only mine on player one's board
        assert_eq!(session.state(), SessionState::Won);
    }

    #[test]
    fn flags_score_by_correctness() {
        let mut session = session(Difficulty::Easy);

        assert_eq!(session.toggle_flag((1, 1)), Ok(MoveOutcome::Flagged { correct: false }));
        assert_eq!(session.score(), -3);
        assert_eq!(session.toggle_flag((0, 1)), Ok(MoveOutcome::Flagged { correct: false }));
        assert_eq!(session.toggle_flag((1, 1)), Ok(MoveOutcome::Unflagged));
        assert_eq!(session.score(), -6);
    }

    #[test]
    fn flagging_every_mine_wins() {
        let mut session = session(Difficulty::Easy);
        session.reveal((1, 1)).unwrap();

        assert_eq!(session.toggle_flag((2, 2)), Ok(MoveOutcome::Flagged { correct: true }));

        assert_eq!(session.state(), SessionState::Won);
        assert_eq!(session.turn(), Player::Two);
        assert_eq!(session.reveal((0, 1)), Err(GameError::AlreadyEnded));
        let summary = session.summary();
        assert!(summary.won);
        assert_eq!(summary.final_score, 2);
        assert_eq!(summary.moves, 2);
    }

    #[test]
    fn lives_never_leave_range() {
        let mut session = session(Difficulty::Easy);

        session.apply(ScoreResult::new(0, 3));
        assert_eq!(session.lives(), MAX_LIVES);
        assert_eq!(session.score(), 15);

        session.apply(ScoreResult::new(0, -25));
        assert_eq!(session.lives(), 0);
        assert_eq!(session.state(), SessionState::Lost);
        assert_eq!(session.toggle_flag((0, 0)), Err(GameError::AlreadyEnded));
        assert!(!session.summary().won);
    }

    #[test]
    fn losing_last_life_on_mine_beats_win() {
        let mut session = session(Difficulty::Hard);
        session.apply(ScoreResult::new(0, -5));

        assert_eq!(session.reveal((2, 2)), Ok(MoveOutcome::HitMine));
        assert_eq!(session.state(), SessionState::Lost);
    }

    #[test]
    fn activation_needs_enough_score() {
        let mut session = session(Difficulty::Easy);
        session.reveal((0, 0)).unwrap();
        session.reveal((1, 1)).unwrap();

        assert_eq!(
            session.activatable((0, 0)),
            Err(GameError::InsufficientScore { cost: 5, score: 2 })
        );
        assert_eq!(session.activatable((1, 1)), Err(GameError::NotActivatable));
    }

    #[test]
    fn question_activation_pays_cost_then_reward() {
        let mut session = session(Difficulty::Easy);
        session.reveal((0, 0)).unwrap();
        session.reveal((1, 1)).unwrap();
        session.apply(ScoreResult::new(20, 0));
        let mut rng = ScriptedRandom::default();

        assert_eq!(session.activatable((0, 0)), Ok(CellKind::Question));
        let activation = session
            .activate_question((0, 0), QuestionDifficulty::Easy, true, &mut rng)
            .unwrap();

        assert_eq!(activation.cost, 5);
        assert_eq!(activation.reward, ScoreResult::new(3, 1));
        // 22 - 5 + 3, plus one life over the cap worth 5
        assert_eq!(session.score(), 25);
        assert_eq!(session.lives(), MAX_LIVES);
        assert_eq!(session.turn(), Player::One);
        assert!(session.current_board()[(0, 0)].used);
        assert_eq!(
            session.activate_question((0, 0), QuestionDifficulty::Easy, true, &mut rng),
            Err(GameError::NotActivatable)
        );
    }

    #[test]
    fn surprise_activation_flips_coin() {
        let mut session = session(Difficulty::Medium);
        session.reveal((0, 2)).unwrap();
        session.reveal((0, 2)).unwrap();
        session.apply(ScoreResult::new(30, 0));
        let mut rng = ScriptedRandom::flips(&[false]);

        assert_eq!(
            session.activate_question((0, 2), QuestionDifficulty::Easy, true, &mut rng),
            Err(GameError::NotActivatable)
        );
        let activation = session.activate_surprise((0, 2), &mut rng).unwrap();

        assert_eq!(activation.good_surprise, Some(false));
        assert_eq!(activation.reward, ScoreResult::new(-12, -1));
        assert_eq!(session.score(), 1 + 1 + 30 - 8 - 12);
        assert_eq!(session.lives(), 7);
    }

    #[test]
    fn mark_mine_bonus_can_win() {
        let mut session = session(Difficulty::Easy);
        session.reveal((0, 0)).unwrap();
        session.reveal((1, 1)).unwrap();
        session.apply(ScoreResult::new(10, 0));
        let mut rng = ScriptedRandom::default();

        let activation = session
            .activate_question((0, 0), QuestionDifficulty::Hard, true, &mut rng)
            .unwrap();

        assert_eq!(activation.marked_mine, Some((2, 2)));
        assert_eq!(session.state(), SessionState::Won);
    }

    #[test]
    fn failed_activation_charges_nothing() {
        let mut session = session(Difficulty::Easy);
        session.apply(ScoreResult::new(10, 0));
        let mut rng = ScriptedRandom::default();

        let result = session.activate((0, 0), CellKind::Question, ScoreResult::new(3, 1), None, &mut rng);

        assert_eq!(result, Err(GameError::NotActivatable));
        assert_eq!(session.score(), 10);
        assert_eq!(session.lives(), 10);
        assert!(!session.current_board()[(0, 0)].used);
    }

    #[test]
    fn reveal_area_bonus_opens_neighbors() {
        let mut session = session(Difficulty::Easy);
        session.reveal((0, 0)).unwrap();
        session.reveal((1, 1)).unwrap();
        session.apply(ScoreResult::new(10, 0));
        let mut rng = ScriptedRandom::default();

        let activation = session
            .activate_question((0, 0), QuestionDifficulty::Medium, true, &mut rng)
            .unwrap();

        // (0, 1) is empty but the bonus stays inside the window
        assert_eq!(activation.revealed_cells, 3);
        assert!(session.current_board()[(0, 1)].is_revealed());
        assert!(session.current_board()[(1, 1)].is_revealed());
        assert!(session.current_board()[(2, 0)].is_hidden());
        assert!(session.current_board()[(0, 2)].is_hidden());
        assert!(session.current_board()[(2, 2)].is_hidden());
    }
}
