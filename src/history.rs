use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::{self, DateError};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HistoryError {
    #[error(transparent)]
    Date(#[from] DateError),
    #[error("period start {0} is recorded more than once")]
    DuplicateDate(NaiveDate),
}

/// Period start dates for one user, always in ascending order.
///
/// The history is a read-only snapshot handed in by whoever owns storage.
/// Construction sorts the dates, so callers may pass them in any order, and
/// rejects repeated dates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<NaiveDate>", into = "Vec<NaiveDate>")]
pub struct CycleHistory {
    starts: Vec<NaiveDate>,
}

/// How much history there is to work with. Each shape has its own rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryShape<'a> {
    Empty,
    Single(NaiveDate),
    Pair(NaiveDate, NaiveDate),
    Many(&'a [NaiveDate]),
}

impl CycleHistory {
    /// Build a history from dates in any order, rejecting repeats.
    pub fn from_dates(mut starts: Vec<NaiveDate>) -> Result<Self, HistoryError> {
        starts.sort_unstable();
        if let Some(pair) = starts.windows(2).find(|w| w[0] == w[1]) {
            return Err(HistoryError::DuplicateDate(pair[0]));
        }
        Ok(Self { starts })
    }

    /// Parse `YYYY-MM-DD` strings. The first unparseable value is reported.
    pub fn parse<S: AsRef<str>>(values: &[S]) -> Result<Self, HistoryError> {
        let starts = values
            .iter()
            .map(|v| dates::parse_iso_date(v.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_dates(starts)
    }

    /// A new history with `start` added. The original is left untouched.
    pub fn with_entry(&self, start: NaiveDate) -> Result<Self, HistoryError> {
        if self.starts.binary_search(&start).is_ok() {
            return Err(HistoryError::DuplicateDate(start));
        }
        let mut starts = self.starts.clone();
        starts.push(start);
        Self::from_dates(starts)
    }

    pub fn shape(&self) -> HistoryShape<'_> {
        match self.starts.as_slice() {
            [] => HistoryShape::Empty,
            [only] => HistoryShape::Single(*only),
            [first, second] => HistoryShape::Pair(*first, *second),
            many => HistoryShape::Many(many),
        }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.starts
    }

    pub fn last(&self) -> Option<NaiveDate> {
        self.starts.last().copied()
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }
}

impl TryFrom<Vec<NaiveDate>> for CycleHistory {
    type Error = HistoryError;

    fn try_from(starts: Vec<NaiveDate>) -> Result<Self, Self::Error> {
        Self::from_dates(starts)
    }
}

impl From<CycleHistory> for Vec<NaiveDate> {
    fn from(history: CycleHistory) -> Self {
        history.starts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn sorts_unordered_input() {
        let history = CycleHistory::parse(&["2024-02-26", "2024-01-01", "2024-01-29"]).unwrap();
        assert_eq!(
            history.dates(),
            &[date("2024-01-01"), date("2024-01-29"), date("2024-02-26")]
        );
        assert_eq!(history.last(), Some(date("2024-02-26")));
    }

    #[test]
    fn shape_follows_length() {
        assert_eq!(CycleHistory::default().shape(), HistoryShape::Empty);

        let single = CycleHistory::parse(&["2024-01-01"]).unwrap();
        assert_eq!(single.shape(), HistoryShape::Single(date("2024-01-01")));

        let pair = CycleHistory::parse(&["2024-01-29", "2024-01-01"]).unwrap();
        assert_eq!(
            pair.shape(),
            HistoryShape::Pair(date("2024-01-01"), date("2024-01-29"))
        );

        let many = CycleHistory::parse(&["2024-01-01", "2024-01-29", "2024-02-26"]).unwrap();
        assert!(matches!(many.shape(), HistoryShape::Many(d) if d.len() == 3));
    }

    #[test]
    fn rejects_duplicates() {
        let err = CycleHistory::parse(&["2024-01-01", "2024-01-29", "2024-01-01"]).unwrap_err();
        assert_eq!(err, HistoryError::DuplicateDate(date("2024-01-01")));
    }

    #[test]
    fn reports_first_bad_value() {
        let err = CycleHistory::parse(&["2024-01-01", "not-a-date", "2024-13-01"]).unwrap_err();
        assert_eq!(
            err,
            HistoryError::Date(DateError::Malformed {
                value: "not-a-date".into()
            })
        );
    }

    #[test]
    fn with_entry_keeps_original() {
        let history = CycleHistory::parse(&["2024-01-29"]).unwrap();
        let extended = history.with_entry(date("2024-01-01")).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(extended.dates(), &[date("2024-01-01"), date("2024-01-29")]);
        assert_eq!(
            extended.with_entry(date("2024-01-29")),
            Err(HistoryError::DuplicateDate(date("2024-01-29")))
        );
    }

    #[test]
    fn deserializes_through_validation() {
        let history: CycleHistory =
            serde_json::from_str(r#"["2024-01-29","2024-01-01"]"#).unwrap();
        assert_eq!(history.last(), Some(date("2024-01-29")));
        assert!(serde_json::from_str::<CycleHistory>(r#"["2024-01-01","2024-01-01"]"#).is_err());
    }
}
