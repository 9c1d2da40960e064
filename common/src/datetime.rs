//! Date and time utilities.

use std::{cmp::Ordering, marker::PhantomData};

use derive_more::{Debug, Display, Error};
use time::{
    format_description::{well_known::Rfc3339, BorrowedFormatItem},
    macros::format_description,
    PrimitiveDateTime, UtcOffset,
};

use crate::Date;

/// Format of an ISO 8601 date and time lacking an UTC offset.
const NAIVE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
);

/// Untyped date and time.
pub type DateTime = DateTimeOf;

/// UTC date and time.
#[derive(Debug)]
pub struct DateTimeOf<Of: ?Sized = ()> {
    /// Inner representation of the date and time.
    inner: time::OffsetDateTime,

    /// Type parameter describing the kind of date and time.
    #[debug(skip)]
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateTimeOf<Of> {
    /// Creates a new [`DateTime`] representing the current date and time.
    #[must_use]
    pub fn now() -> Self {
        Self {
            inner: time::OffsetDateTime::now_utc(),
            _of: PhantomData,
        }
    }

    /// Parses a [`DateTime`] from the provided string.
    ///
    /// Both [RFC 3339] strings and ISO 8601 date-times without an offset are
    /// accepted, the latter being treated as UTC.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is neither of the accepted formats.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let inner = time::OffsetDateTime::parse(input, &Rfc3339)
            .or_else(|_| {
                PrimitiveDateTime::parse(input, NAIVE_FORMAT)
                    .map(PrimitiveDateTime::assume_utc)
            })
            .map_err(ParseError)?;
        Ok(Self {
            inner: inner.to_offset(UtcOffset::UTC),
            _of: PhantomData,
        })
    }

    /// Returns the [`DateTime`] as an [RFC 3339] string.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.inner.format(&Rfc3339).unwrap_or_else(|e| {
            panic!("cannot format `DateTime` as RFC 3339: {e}")
        })
    }

    /// Returns the calendar [`Date`] of this [`DateTime`].
    #[must_use]
    pub fn date(&self) -> Date {
        self.inner.date().into()
    }

    /// Coerces one kind of [`DateTime`] into another.
    #[must_use]
    pub fn coerce<NewOf: ?Sized>(self) -> DateTimeOf<NewOf> {
        DateTimeOf {
            inner: self.inner,
            _of: PhantomData,
        }
    }
}

/// Error of parsing [`DateTime`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("invalid date and time: {_0}")]
pub struct ParseError(time::error::Parse);

impl<Of: ?Sized> Copy for DateTimeOf<Of> {}
impl<Of: ?Sized> Clone for DateTimeOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for DateTimeOf<Of> {}
impl<Of: ?Sized> PartialEq for DateTimeOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<Of: ?Sized> Ord for DateTimeOf<Of> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<Of: ?Sized> PartialOrd for DateTimeOf<Of> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Of: ?Sized> From<Date> for DateTimeOf<Of> {
    /// Midnight UTC of the provided [`Date`].
    fn from(date: Date) -> Self {
        Self {
            inner: time::Date::from(date).midnight().assume_utc(),
            _of: PhantomData,
        }
    }
}

impl<Of: ?Sized> From<DateTimeOf<Of>> for time::OffsetDateTime {
    fn from(dt: DateTimeOf<Of>) -> Self {
        dt.inner
    }
}

mod serde {
    //! Module providing integration with [`serde`] crate.

    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    use super::DateTimeOf;

    impl<Of: ?Sized> Serialize for DateTimeOf<Of> {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            s.serialize_str(&self.to_rfc3339())
        }
    }

    impl<'de, Of: ?Sized> Deserialize<'de> for DateTimeOf<Of> {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            let s = String::deserialize(d)?;
            Self::parse(&s).map_err(de::Error::custom)
        }
    }
}

#[cfg(test)]
mod spec {
    use super::DateTime;
    use crate::Date;

    #[test]
    fn parses_rfc3339_and_naive() {
        let with_offset = DateTime::parse("2025-01-01T12:00:00+02:00").unwrap();
        let naive = DateTime::parse("2025-01-01T10:00:00").unwrap();
        assert_eq!(with_offset, naive);

        let fractional = DateTime::parse("2025-01-01T10:00:00.123456").unwrap();
        assert!(fractional > naive);

        assert!(DateTime::parse("2025-01-01").is_err());
        assert!(DateTime::parse("yesterday").is_err());
    }

    #[test]
    fn converts_from_date() {
        let date = Date::from_ymd(2024, 3, 15).unwrap();
        let dt = DateTime::from(date);
        assert_eq!(dt.to_rfc3339(), "2024-03-15T00:00:00Z");
        assert_eq!(dt.date(), date);
    }
}
