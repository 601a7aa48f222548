use std::fmt;
use std::str::FromStr;
use tandem_core::Difficulty;

use crate::*;

/// Text that selects every value in a filter.
pub const ALL: &str = "ALL";

/// Either the `ALL` sentinel or one concrete value to keep.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }
}

impl<T: FromStr> FromStr for Selection<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL) {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Only(value) => value.fmt(f),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Lose,
}

impl Outcome {
    pub const fn of(coop_win: bool) -> Self {
        if coop_win { Self::Win } else { Self::Lose }
    }
}

impl FromStr for Outcome {
    type Err = ParseValueError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "WIN" | "WON" => Ok(Self::Win),
            "LOSE" | "LOST" => Ok(Self::Lose),
            _ => Err(ParseValueError::new("outcome", s)),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Win => "WIN",
            Self::Lose => "LOSE",
        })
    }
}

/// Predicate over history entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HistoryFilter {
    Difficulty(Selection<Difficulty>),
    /// Matches the user the record is stored under.
    User(Selection<String>),
    Outcome(Selection<Outcome>),
    /// Every present filter has to match, `None` entries are skipped.
    Combined(Vec<Option<HistoryFilter>>),
}

impl HistoryFilter {
    pub fn combined(filters: impl IntoIterator<Item = Option<HistoryFilter>>) -> Self {
        Self::Combined(filters.into_iter().collect())
    }

    pub fn matches(&self, entry: &HistoryEntry) -> bool {
        match self {
            Self::Difficulty(selection) => selection.accepts(&entry.record.difficulty),
            Self::User(selection) => selection.accepts(&entry.username),
            Self::Outcome(selection) => selection.accepts(&Outcome::of(entry.record.coop_win)),
            Self::Combined(filters) => filters.iter().flatten().all(|filter| filter.matches(entry)),
        }
    }

    pub fn apply<'a>(&self, entries: &'a [HistoryEntry]) -> impl Iterator<Item = &'a HistoryEntry> {
        entries.iter().filter(move |entry| self.matches(entry))
    }
}
