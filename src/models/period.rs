//! Calendar-month periods
//!
//! Every aggregate bucket and every budget is keyed by a calendar month.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar month (e.g. "2024-05")
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Create a period, rejecting months outside 1..=12
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodParseError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// The period a date falls into
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The current calendar month (local time)
    pub fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month
    pub fn start_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Last day of the month (inclusive)
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.next().start_date().and_then(|d| d.pred_opt())
    }

    /// Check if a date falls within this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::of(date) == *self
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Parse a period string
    ///
    /// Formats: "2024-05", "current", "last" / "previous", "next".
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();

        match s.to_lowercase().as_str() {
            "current" | "this" | "now" => return Ok(Self::current()),
            "last" | "previous" | "prev" => return Ok(Self::current().prev()),
            "next" => return Ok(Self::current().next()),
            _ => {}
        }

        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;
        if year.len() != 4 {
            return Err(PeriodParseError::InvalidFormat(s.to_string()));
        }
        let year: i32 = year
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;

        Self::new(year, month)
    }

    /// Human-friendly label, e.g. "May 2024"
    pub fn label(&self) -> String {
        match self.start_date() {
            Some(date) => date.format("%B %Y").to_string(),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{:04}-{:02}", self.year, self.month))
    }
}

impl FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Period {
    type Error = PeriodParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_period_bounds() {
        let period = Period::new(2024, 2).unwrap();
        assert_eq!(period.start_date(), Some(date(2024, 2, 1)));
        assert_eq!(period.end_date(), Some(date(2024, 2, 29)));

        let dec = Period::new(2024, 12).unwrap();
        assert_eq!(dec.end_date(), Some(date(2024, 12, 31)));
    }

    #[test]
    fn test_of_and_contains() {
        let may = Period::of(date(2024, 5, 3));
        assert_eq!(may, Period::new(2024, 5).unwrap());
        assert!(may.contains(date(2024, 5, 31)));
        assert!(!may.contains(date(2024, 6, 1)));
    }

    #[test]
    fn test_navigation() {
        let dec = Period::new(2024, 12).unwrap();
        assert_eq!(dec.next(), Period::new(2025, 1).unwrap());
        assert_eq!(dec.next().prev(), dec);
        assert_eq!(Period::new(2025, 1).unwrap().prev(), dec);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Period::parse("2024-05").unwrap(), Period::new(2024, 5).unwrap());
        assert_eq!(Period::parse(" 2024-5 ").unwrap(), Period::new(2024, 5).unwrap());
        assert_eq!(Period::parse("current").unwrap(), Period::current());
        assert_eq!(Period::parse("last").unwrap(), Period::current().prev());
        assert_eq!(
            Period::parse("2024-13"),
            Err(PeriodParseError::InvalidMonth(13))
        );
        assert!(Period::parse("May").is_err());
        assert!(Period::parse("24-05").is_err());
    }

    #[test]
    fn test_ordering() {
        let a = Period::new(2023, 12).unwrap();
        let b = Period::new(2024, 1).unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_display_and_label() {
        let period = Period::new(2024, 5).unwrap();
        assert_eq!(period.to_string(), "2024-05");
        assert_eq!(period.label(), "May 2024");
    }

    #[test]
    fn test_serialization() {
        let period = Period::new(2024, 5).unwrap();
        let json = serde_json::to_string(&period).unwrap();
        assert_eq!(json, "\"2024-05\"");
        let deserialized: Period = serde_json::from_str(&json).unwrap();
        assert_eq!(period, deserialized);
        assert!(serde_json::from_str::<Period>("\"2024-00\"").is_err());
    }
}
