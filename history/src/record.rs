use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tandem_core::{Difficulty, Points, SessionSummary};

/// One finished cooperative game as stored on disk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub difficulty: Difficulty,
    pub player1: String,
    pub player2: String,
    pub final_score: Points,
    pub coop_win: bool,
    pub duration: String,
    #[serde(with = "local_date_time")]
    pub date_time: NaiveDateTime,
}

impl GameRecord {
    /// Record for a game that just ended, stamped with the local time.
    pub fn finished_now(
        summary: &SessionSummary,
        player1: impl Into<String>,
        player2: impl Into<String>,
        elapsed_secs: u64,
    ) -> Self {
        let now = Local::now().naive_local();
        Self {
            difficulty: summary.difficulty,
            player1: player1.into(),
            player2: player2.into(),
            final_score: summary.final_score,
            coop_win: summary.won,
            duration: format_duration(elapsed_secs),
            date_time: now.with_nanosecond(0).unwrap_or(now),
        }
    }
}

/// Record tagged with the user it is stored under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub username: String,
    pub record: GameRecord,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserHistory {
    #[serde(default)]
    pub history: Vec<GameRecord>,
}

/// Whole history document: `{"users": {<name>: {"history": [...]}}}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryFile {
    #[serde(default)]
    pub users: BTreeMap<String, UserHistory>,
}

impl HistoryFile {
    pub fn push(&mut self, username: &str, record: GameRecord) {
        self.users
            .entry(username.to_owned())
            .or_default()
            .history
            .push(record);
    }

    /// Flattens every user's records, keeping per-user order.
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.users
            .iter()
            .flat_map(|(username, user)| {
                user.history.iter().map(|record| HistoryEntry {
                    username: username.clone(),
                    record: record.clone(),
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.users.values().map(|user| user.history.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `MM:SS`, or `H:MM:SS` once a game passes the hour.
pub fn format_duration(secs: u64) -> String {
    let (hours, minutes, seconds) = (secs / 3600, secs / 60 % 60, secs % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// ISO-8601 local date-time without offset. Reading also accepts the short
/// form without seconds.
mod local_date_time {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format("%Y-%m-%dT%H:%M:%S%.f"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(&text, format).ok())
            .ok_or_else(|| D::Error::custom(format!("invalid local date-time `{text}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::record;

    #[test]
    fn record_uses_camel_case_fields() {
        let json = serde_json::to_value(record(Difficulty::Hard, 42, true)).unwrap();

        assert_eq!(json["difficulty"], "HARD");
        assert_eq!(json["finalScore"], 42);
        assert_eq!(json["coopWin"], true);
        assert_eq!(json["player1"], "ada");
        assert_eq!(json["dateTime"], "2026-03-14T15:09:26");
    }

    #[test]
    fn date_time_accepts_fraction_and_short_form() {
        let json = r#"{"difficulty":"EASY","player1":"a","player2":"b","finalScore":1,
            "coopWin":false,"duration":"00:10","dateTime":"2026-01-02T03:04:05.123456"}"#;
        let parsed: GameRecord = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.date_time.second(), 5);

        let short = json.replace("2026-01-02T03:04:05.123456", "2026-01-02T03:04");
        let parsed: GameRecord = serde_json::from_str(&short).unwrap();
        assert_eq!(parsed.date_time.minute(), 4);

        let broken = json.replace("2026-01-02T03:04:05.123456", "yesterday");
        assert!(serde_json::from_str::<GameRecord>(&broken).is_err());
    }

    #[test]
    fn entries_are_tagged_with_user() {
        let mut file = HistoryFile::default();
        file.push("bob", record(Difficulty::Easy, 1, false));
        file.push("amy", record(Difficulty::Medium, 2, true));
        file.push("bob", record(Difficulty::Hard, 3, true));

        let entries = file.entries();

        assert_eq!(file.len(), 3);
        let tagged: Vec<_> = entries
            .iter()
            .map(|entry| (entry.username.as_str(), entry.record.final_score))
            .collect();
        assert_eq!(tagged, [("amy", 2), ("bob", 1), ("bob", 3)]);
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(0), "00:00");
        assert_eq!(format_duration(192), "03:12");
        assert_eq!(format_duration(3725), "1:02:05");
    }

    #[test]
    fn finished_now_copies_summary() {
        let summary = SessionSummary {
            difficulty: Difficulty::Medium,
            final_score: 17,
            lives: 3,
            won: true,
            moves: 40,
        };

        let record = GameRecord::finished_now(&summary, "ada", "lin", 61);

        assert_eq!(record.difficulty, Difficulty::Medium);
        assert_eq!(record.final_score, 17);
        assert!(record.coop_win);
        assert_eq!(record.duration, "01:01");
        assert_eq!(record.date_time.nanosecond(), 0);
    }
}
