use std::io::{self, BufRead, Write};
use tandem_core::*;

use crate::audio::{AudioService, Sound};
use crate::render;

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Reveal(Coord2),
    Flag(Coord2),
    Activate(Coord2),
    Help,
    Quit,
}

fn parse_coords<'a>(mut words: impl Iterator<Item = &'a str>) -> Option<Coord2> {
    let x = words.next()?.parse().ok()?;
    let y = words.next()?.parse().ok()?;
    words.next().is_none().then_some((x, y))
}

pub fn parse_input(line: &str) -> Option<Input> {
    let mut words = line.split_whitespace();
    let command = words.next()?.to_ascii_lowercase();
    match command.as_str() {
        "r" | "reveal" => parse_coords(words).map(Input::Reveal),
        "f" | "flag" => parse_coords(words).map(Input::Flag),
        "a" | "activate" => parse_coords(words).map(Input::Activate),
        "h" | "help" | "?" => Some(Input::Help),
        "q" | "quit" | "exit" => Some(Input::Quit),
        _ => None,
    }
}

/// How the loop ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Ending {
    Finished(SessionSummary),
    /// Players quit or input ran out before the game ended.
    Abandoned,
}

/// Drives a [`GameSession`] from line-based input. The session owns the
/// rules; the controller only reads commands, asks questions, prints the
/// boards and plays cues.
pub struct Controller<R, I, O> {
    session: GameSession,
    rng: R,
    questions: QuestionBank,
    audio: AudioService,
    names: [String; 2],
    input: I,
    output: O,
}

impl<R: RandomSource, I: BufRead, O: Write> Controller<R, I, O> {
    pub fn new(
        session: GameSession,
        rng: R,
        questions: QuestionBank,
        audio: AudioService,
        names: [String; 2],
        input: I,
        output: O,
    ) -> Self {
        Self {
            session,
            rng,
            questions,
            audio,
            names,
            input,
            output,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn run(&mut self) -> io::Result<Ending> {
        write!(self.output, "{}", render::HELP)?;
        self.show(false)?;

        while !self.session.is_finished() {
            write!(self.output, "{}> ", self.names[self.session.turn().index()])?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                log::info!("Input closed, abandoning game");
                return Ok(Ending::Abandoned);
            };

            match parse_input(&line) {
                None if line.trim().is_empty() => {}
                None => writeln!(self.output, "Unknown command, type h for help")?,
                Some(Input::Help) => write!(self.output, "{}", render::HELP)?,
                Some(Input::Quit) => {
                    log::info!("Players quit after {} moves", self.session.summary().moves);
                    return Ok(Ending::Abandoned);
                }
                Some(Input::Activate(coords)) => self.activate(coords)?,
                Some(Input::Reveal(coords)) => {
                    let outcome = self.session.reveal(coords);
                    self.report_move(outcome)?;
                }
                Some(Input::Flag(coords)) => {
                    let outcome = self.session.toggle_flag(coords);
                    self.report_move(outcome)?;
                }
            }
        }

        if let Some(sound) = Sound::for_end(self.session.state()) {
            self.audio.play(sound);
        }
        let summary = self.session.summary();
        writeln!(
            self.output,
            "{} with {} points after {} moves",
            if summary.won { "The team won" } else { "The team lost" },
            summary.final_score,
            summary.moves
        )?;
        self.show(true)?;
        Ok(Ending::Finished(summary))
    }

    fn report_move(&mut self, outcome: tandem_core::Result<MoveOutcome>) -> io::Result<()> {
        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(err) => return writeln!(self.output, "{err}"),
        };
        if let Some(sound) = Sound::for_move(outcome) {
            self.audio.play(sound);
        }

        match outcome {
            MoveOutcome::NoChange => writeln!(self.output, "Nothing to do there, still your turn")?,
            MoveOutcome::Revealed { cells } => writeln!(self.output, "Revealed {cells} cells")?,
            MoveOutcome::HitMine => writeln!(self.output, "Boom! The team loses a life")?,
            MoveOutcome::Flagged { correct: true } => writeln!(self.output, "Flag placed")?,
            MoveOutcome::Flagged { correct: false } => {
                writeln!(self.output, "Wrong flag, {WRONG_FLAG_POINTS} points")?
            }
            MoveOutcome::Unflagged => writeln!(self.output, "Flag removed")?,
        }
        if outcome.has_update() && !self.session.is_finished() {
            self.show(false)?;
        }
        Ok(())
    }

    fn activate(&mut self, coords: Coord2) -> io::Result<()> {
        let kind = match self.session.activatable(coords) {
            Ok(kind) => kind,
            Err(err) => return writeln!(self.output, "{err}"),
        };

        let (activation, sound) = if kind == CellKind::Question {
            let Some(question) = self.questions.draw(&mut self.rng).cloned() else {
                return writeln!(self.output, "There are no questions to ask");
            };
            let Some(correct) = self.ask(&question)? else {
                return Ok(());
            };
            let activation =
                self.session
                    .activate_question(coords, question.difficulty, correct, &mut self.rng);
            (activation, Sound::for_answer(correct))
        } else {
            let activation = self.session.activate_surprise(coords, &mut self.rng);
            let good = activation
                .as_ref()
                .is_ok_and(|activation| activation.good_surprise == Some(true));
            (activation, Sound::for_surprise(good))
        };

        let activation = match activation {
            Ok(activation) => activation,
            Err(err) => return writeln!(self.output, "{err}"),
        };
        self.audio.play(sound);
        self.report_activation(&activation)
    }

    /// Returns `None` when input runs out before an answer.
    fn ask(&mut self, question: &Question) -> io::Result<Option<bool>> {
        writeln!(self.output, "[{}] {}", question.difficulty, question.text)?;
        for (i, option) in question.options.iter().enumerate() {
            writeln!(self.output, "  {}. {option}", i + 1)?;
        }

        let choices = 1..=question.options.len();
        loop {
            write!(self.output, "answer> ")?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match line.trim().parse::<usize>() {
                Ok(choice) if choices.contains(&choice) => {
                    let correct = question.is_correct(choice - 1);
                    if !correct {
                        writeln!(self.output, "The answer was {}", question.answer + 1)?;
                    }
                    return Ok(Some(correct));
                }
                _ => writeln!(self.output, "Pick a number from 1 to {}", question.options.len())?,
            }
        }
    }

    fn report_activation(&mut self, activation: &Activation) -> io::Result<()> {
        let headline = match (activation.kind, activation.good_surprise) {
            (_, Some(true)) => "Good surprise!",
            (_, Some(false)) => "Bad surprise!",
            _ => "Question resolved.",
        };
        writeln!(
            self.output,
            "{headline} Paid {} points, reward {:+} points and {:+} lives",
            activation.cost, activation.reward.points, activation.reward.lives
        )?;
        if activation.revealed_cells > 0 {
            writeln!(self.output, "Bonus revealed {} cells", activation.revealed_cells)?;
        }
        if let Some((x, y)) = activation.marked_mine {
            writeln!(self.output, "Bonus flagged the mine at {x} {y}")?;
        }
        self.show(false)
    }

    fn show(&mut self, reveal_all: bool) -> io::Result<()> {
        write!(self.output, "{}", render::session(&self.session, &self.names, reveal_all))
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}
