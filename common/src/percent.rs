//! [`Percent`]-related definitions.

use std::str::FromStr;

use derive_more::Display;
use rust_decimal::Decimal;

/// Decimal percentage in the `[0, 100]` range.
#[derive(Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq)]
#[derive(serde::Serialize)]
#[serde(transparent)]
pub struct Percent(Decimal);

impl Percent {
    /// Zero [`Percent`].
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new [`Percent`] by checking the provided value is within
    /// the `[0, 100]` range.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        (Decimal::ZERO..=Decimal::ONE_HUNDRED)
            .contains(&val)
            .then_some(Self(val))
    }

    /// Returns the inner value of this [`Percent`].
    #[must_use]
    pub const fn get(self) -> Decimal {
        self.0
    }

    /// Indicates whether this [`Percent`] is zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Returns this [`Percent`] of the provided `amount` (unrounded).
    #[must_use]
    pub fn of(self, amount: Decimal) -> Decimal {
        amount * self.0 / Decimal::ONE_HUNDRED
    }
}

impl FromStr for Percent {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .ok()
            .and_then(Self::new)
            .ok_or("invalid percent value")
    }
}

impl<'de> serde::Deserialize<'de> for Percent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let val = <Decimal as serde::Deserialize>::deserialize(deserializer)?;
        Self::new(val).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "percent value `{val}` is out of `[0, 100]` range",
            ))
        })
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::Percent;

    #[test]
    fn checks_range() {
        assert!(Percent::new(Decimal::ZERO).is_some());
        assert!(Percent::new(Decimal::ONE_HUNDRED).is_some());
        assert!(Percent::new(Decimal::NEGATIVE_ONE).is_none());
        assert!(Percent::new(Decimal::from(101)).is_none());

        assert!(Percent::from_str("12.5").is_ok());
        assert!(Percent::from_str("100.01").is_err());
        assert!(Percent::from_str("ten").is_err());
    }

    #[test]
    fn takes_part_of_amount() {
        let pct = Percent::from_str("15").unwrap();
        assert_eq!(pct.of(Decimal::from(200)), Decimal::from(30));
        assert!(Percent::ZERO.is_zero());
        assert_eq!(Percent::ZERO.of(Decimal::from(200)), Decimal::ZERO);
    }

    #[test]
    fn deserializes_within_range() {
        let pct: Percent = serde_json::from_str("10.5").unwrap();
        assert_eq!(pct.get(), "10.5".parse::<Decimal>().unwrap());

        assert!(serde_json::from_str::<Percent>("\"20\"").is_ok());
        assert!(serde_json::from_str::<Percent>("120").is_err());
    }
}
