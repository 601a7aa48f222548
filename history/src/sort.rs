use std::cmp::Ordering;
use std::str::FromStr;

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

impl FromStr for SortOrder {
    type Err = ParseValueError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(ParseValueError::new("sort order", s)),
        }
    }
}

/// Comparator over history entries.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HistorySort {
    Score(SortOrder),
    Date(SortOrder),
}

impl HistorySort {
    pub fn compare(self, a: &HistoryEntry, b: &HistoryEntry) -> Ordering {
        match self {
            Self::Score(order) => order.apply(a.record.final_score.cmp(&b.record.final_score)),
            Self::Date(order) => order.apply(a.record.date_time.cmp(&b.record.date_time)),
        }
    }

    /// Stable, ties keep their stored order.
    pub fn sort(self, entries: &mut [HistoryEntry]) {
        entries.sort_by(|a, b| self.compare(a, b));
    }
}

impl Default for HistorySort {
    fn default() -> Self {
        Self::Score(SortOrder::default())
    }
}
