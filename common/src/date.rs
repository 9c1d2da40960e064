//! Calendar [`Date`] definitions.

use std::{fmt, str::FromStr};

use derive_more::{Display, Error};
use time::{format_description::BorrowedFormatItem, macros::format_description};

use crate::DateTime;

/// Format of a [`Date`] textual representation.
const FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]");

/// Calendar date without a time zone.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Date(time::Date);

impl Date {
    /// Creates a new [`Date`] from the provided calendar components.
    ///
    /// [`None`] is returned if the components don't form a valid date.
    #[must_use]
    pub fn from_ymd(year: i32, month: u8, day: u8) -> Option<Self> {
        let month = time::Month::try_from(month).ok()?;
        time::Date::from_calendar_date(year, month, day).ok().map(Self)
    }

    /// Returns the current UTC [`Date`].
    #[must_use]
    pub fn today() -> Self {
        Self(time::OffsetDateTime::now_utc().date())
    }

    /// Returns the year of this [`Date`].
    #[must_use]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// Returns the month (`1..=12`) of this [`Date`].
    #[must_use]
    pub fn month(self) -> u8 {
        self.0.month().into()
    }

    /// Returns the day of month of this [`Date`].
    #[must_use]
    pub fn day(self) -> u8 {
        self.0.day()
    }

    /// Returns the number of whole calendar months from `from` to `to`.
    ///
    /// Only years and months participate: the day of month is ignored, so
    /// `2024-01-31 → 2024-02-01` spans one month while
    /// `2024-01-01 → 2024-01-31` spans none. Negative when `to` precedes
    /// `from`.
    #[must_use]
    pub fn month_span(from: Self, to: Self) -> i32 {
        (to.year() - from.year()) * 12
            + (i32::from(to.month()) - i32::from(from.month()))
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0.format(FORMAT).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

impl FromStr for Date {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Timestamps are accepted too, only their date part is kept.
        let s = s.trim();
        let date = s.get(..10).ok_or(ParseError)?;
        let time = s.get(10..).unwrap_or_default();
        if !time.is_empty() {
            let time = time
                .strip_prefix(|c| c == 'T' || c == ' ')
                .ok_or(ParseError)?;
            _ = DateTime::parse(&format!("{date}T{time}"))
                .map_err(|_| ParseError)?;
        }
        time::Date::parse(date, FORMAT)
            .map(Self)
            .map_err(|_| ParseError)
    }
}

impl From<time::Date> for Date {
    fn from(date: time::Date) -> Self {
        Self(date)
    }
}

impl From<Date> for time::Date {
    fn from(date: Date) -> Self {
        date.0
    }
}

/// Error of parsing a [`Date`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("expected a `YYYY-MM-DD` date")]
pub struct ParseError;

mod serde {
    //! Module providing integration with [`serde`] crate.

    use std::str::FromStr as _;

    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    use super::Date;

    impl Serialize for Date {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            s.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for Date {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            let s = String::deserialize(d)?;
            Self::from_str(&s).map_err(de::Error::custom)
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use super::Date;

    fn date(s: &str) -> Date {
        Date::from_str(s).unwrap()
    }

    #[test]
    fn parses_and_formats() {
        assert_eq!(date("2024-02-29"), Date::from_ymd(2024, 2, 29).unwrap());
        assert_eq!(date("2024-02-29T10:30:00").to_string(), "2024-02-29");
        assert_eq!(date(" 2025-06-01 ").to_string(), "2025-06-01");

        assert!(Date::from_str("2023-02-29").is_err());
        assert!(Date::from_str("01/06/2025").is_err());
        assert!(Date::from_str("2025").is_err());
        assert!(Date::from_str("2025-06-015").is_err());
        assert!(Date::from_str("2025-06-01x").is_err());
        assert!(Date::from_str("2025-06-01T").is_err());
        assert!(Date::from_str("2025-06-01T25:00:00").is_err());
        assert_eq!(date("2025-06-01 10:30:00").to_string(), "2025-06-01");
        assert_eq!(date("2025-06-01T23:30:00+02:00").to_string(), "2025-06-01");
        assert!(Date::from_ymd(2025, 13, 1).is_none());
    }

    #[test]
    fn month_span_ignores_days() {
        assert_eq!(
            Date::month_span(date("2024-01-01"), date("2025-06-01")),
            17,
        );
        assert_eq!(
            Date::month_span(date("2024-01-31"), date("2024-02-01")),
            1,
        );
        assert_eq!(
            Date::month_span(date("2024-01-01"), date("2024-01-31")),
            0,
        );
        assert_eq!(
            Date::month_span(date("2024-05-10"), date("2023-12-10")),
            -5,
        );
    }
}
