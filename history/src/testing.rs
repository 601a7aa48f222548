use chrono::NaiveDate;
use tandem_core::{Difficulty, Points};

use crate::*;

pub(crate) fn record(difficulty: Difficulty, final_score: Points, coop_win: bool) -> GameRecord {
    GameRecord {
        difficulty,
        player1: "ada".into(),
        player2: "lin".into(),
        final_score,
        coop_win,
        duration: "03:12".into(),
        date_time: NaiveDate::from_ymd_opt(2026, 3, 14)
            .and_then(|date| date.and_hms_opt(15, 9, 26))
            .unwrap(),
    }
}

pub(crate) fn entry(username: &str, difficulty: Difficulty, final_score: Points, coop_win: bool) -> HistoryEntry {
    HistoryEntry {
        username: username.into(),
        record: record(difficulty, final_score, coop_win),
    }
}
