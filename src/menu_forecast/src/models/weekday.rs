//! Calendar weekday labels used for training features and recommendations.
//!
//! Labels are the English day names ("Monday" .. "Sunday"), matching what the
//! encoder sees during training and what callers send on the HTTP surface.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Day of the week, Monday-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DayOfWeek {
    /// Monday
    Monday,
    /// Tuesday
    Tuesday,
    /// Wednesday
    Wednesday,
    /// Thursday
    Thursday,
    /// Friday
    Friday,
    /// Saturday
    Saturday,
    /// Sunday
    Sunday,
}

impl DayOfWeek {
    /// All seven days, Monday first.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// Trading days the kitchen produces for. Closed on Sundays.
    pub const OPEN_DAYS: [DayOfWeek; 6] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    /// The canonical label, e.g. `"Monday"`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }

    /// Weekday of a calendar date.
    pub fn of_date(date: NaiveDate) -> Self {
        date.weekday().into()
    }

    /// Whether the kitchen is open on this day.
    pub fn is_open(&self) -> bool {
        !matches!(self, DayOfWeek::Sunday)
    }

    /// Parse a caller-supplied day into one of [`DayOfWeek::OPEN_DAYS`].
    ///
    /// The input is title-cased first ("monday", "MONDAY" and "Monday" are all
    /// accepted). Sundays and anything that is not a day name yield
    /// [`Error::InvalidDay`].
    pub fn parse_open_day(raw: &str) -> Result<Self, Error> {
        let normalized = title_case(raw);
        DayOfWeek::ALL
            .into_iter()
            .find(|d| d.as_str() == normalized)
            .filter(DayOfWeek::is_open)
            .ok_or_else(|| Error::InvalidDay(raw.to_string()))
    }
}

/// Upper-case the first character and lower-case the rest.
pub fn title_case(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(w: Weekday) -> Self {
        match w {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive parse of a canonical label (including Sunday).
impl FromStr for DayOfWeek {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DayOfWeek::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| Error::InvalidDay(s.to_string()))
    }
}
