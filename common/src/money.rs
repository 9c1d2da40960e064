//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places [`Money`] amounts are rounded to.
pub const SCALE: u32 = 2;

/// Amount of money in some [`Currency`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    #[serde(default)]
    pub currency: Currency,
}

impl Money {
    /// Creates a new [`Money`] in [`Currency::Eur`].
    #[must_use]
    pub const fn eur(amount: Decimal) -> Self {
        Self {
            amount,
            currency: Currency::Eur,
        }
    }

    /// Returns this [`Money`] with its amount [`quantize`]d.
    #[must_use]
    pub fn quantized(self) -> Self {
        Self {
            amount: quantize(self.amount),
            ..self
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        write!(f, "{} {}", amount.normalize(), currency.code())
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (amount, currency) = match s.trim().rsplit_once(' ') {
            Some((amount, code)) => (amount, Currency::from_code(code)?),
            None => (s.trim(), Currency::default()),
        };
        let amount =
            Decimal::from_str(amount.trim()).map_err(|_| "invalid amount")?;

        Ok(Self { amount, currency })
    }
}

/// Rounds the provided `amount` to [`SCALE`] decimal places, with midpoints
/// rounded away from zero.
#[must_use]
pub fn quantize(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Currency of a [`Money`] amount, identified by its ISO 4217 code.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    Eq,
    Hash,
    PartialEq,
)]
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Currency {
    /// Euro.
    #[default]
    Eur,

    /// US Dollar.
    Usd,

    /// Pound Sterling.
    Gbp,
}

impl Currency {
    /// Returns the ISO 4217 code of this [`Currency`].
    #[must_use]
    pub fn code(self) -> &'static str {
        self.into()
    }

    /// Parses a [`Currency`] from its ISO 4217 code (case-insensitive).
    ///
    /// # Errors
    ///
    /// If the code doesn't name a supported [`Currency`].
    pub fn from_code(code: &str) -> Result<Self, &'static str> {
        Self::from_str(code.trim()).map_err(|_| "invalid currency")
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::{quantize, Currency, Money};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("123.45 EUR").unwrap(),
            Money::eur(decimal("123.45")),
        );
        assert_eq!(
            Money::from_str("123.45 usd").unwrap(),
            Money {
                amount: decimal("123.45"),
                currency: Currency::Usd,
            },
        );
        assert_eq!(
            Money::from_str("10").unwrap(),
            Money::eur(decimal("10")),
        );

        assert!(Money::from_str("123.45 RUB").is_err());
        assert!(Money::from_str("abc EUR").is_err());
        assert!(Money::from_str("").is_err());
    }

    #[test]
    fn to_string() {
        assert_eq!(Money::eur(decimal("123.450")).to_string(), "123.45 EUR");
        assert_eq!(Money::eur(decimal("200.00")).to_string(), "200 EUR");
        assert_eq!(
            Money {
                amount: decimal("0.5"),
                currency: Currency::Gbp,
            }
            .to_string(),
            "0.5 GBP",
        );
    }

    #[test]
    fn quantizes_half_up() {
        assert_eq!(quantize(decimal("2.345")), decimal("2.35"));
        assert_eq!(quantize(decimal("2.344")), decimal("2.34"));
        assert_eq!(quantize(decimal("-2.345")), decimal("-2.35"));
        assert_eq!(quantize(decimal("10")), decimal("10"));
        assert_eq!(
            Money::eur(decimal("0.125")).quantized(),
            Money::eur(decimal("0.13")),
        );
    }
}
