use std::fmt::Write;
use tandem_core::{Board, Cell, CellKind, CellState, GameSession, MAX_LIVES, Player, SessionState};

fn glyph(cell: Cell, reveal_all: bool) -> char {
    match cell.state {
        CellState::Flagged => 'F',
        CellState::Exploded => '*',
        CellState::Hidden if !reveal_all => '#',
        CellState::Hidden | CellState::Revealed => match cell.kind {
            CellKind::Mine => 'M',
            CellKind::Empty => '.',
            CellKind::Number => char::from(b'0' + cell.adjacent_mines),
            CellKind::Question if cell.used => 'q',
            CellKind::Question => '?',
            CellKind::Surprise if cell.used => 's',
            CellKind::Surprise => '!',
        },
    }
}

/// Grid with row numbers down the left and column numbers across the top.
/// With `reveal_all` hidden cells show what they hold.
pub fn board(board: &Board, reveal_all: bool) -> String {
    let size = board.size();
    let mut out = String::from("   ");
    for y in 0..size {
        let _ = write!(out, "{y:>3}");
    }
    out.push('\n');
    for x in 0..size {
        let _ = write!(out, "{x:>3}");
        for y in 0..size {
            let _ = write!(out, "{:>3}", glyph(board[(x, y)], reveal_all));
        }
        out.push('\n');
    }
    out
}

pub fn status(session: &GameSession, names: &[String; 2]) -> String {
    let state = match session.state() {
        SessionState::Active => format!("{} to move", names[session.turn().index()]),
        SessionState::Won => "Team won".to_owned(),
        SessionState::Lost => "Team lost".to_owned(),
    };
    format!(
        "{} | Score {} | Lives {}/{} | Mines left {} | {}",
        session.difficulty(),
        session.score(),
        session.lives(),
        MAX_LIVES,
        session.current_board().mines_left(),
        state
    )
}

/// Both boards under their owners' names, followed by the status line.
pub fn session(session: &GameSession, names: &[String; 2], reveal_all: bool) -> String {
    let mut out = String::new();
    for player in [Player::One, Player::Two] {
        let marker = if session.turn() == player && !session.is_finished() { " <" } else { "" };
        let _ = writeln!(out, "{}{}", names[player.index()], marker);
        out.push_str(&board(session.board(player), reveal_all));
        out.push('\n');
    }
    out.push_str(&status(session, names));
    out.push('\n');
    out
}

pub const HELP: &str = "\
Commands (row first, then column):
  r <row> <col>   reveal a cell
  f <row> <col>   flag or unflag a cell
  a <row> <col>   activate a revealed question (?) or surprise (!)
  h               show this help
  q               quit without saving
";
