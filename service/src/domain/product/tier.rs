//! [`PriceTier`] definitions and validation.
//!
//! A [`Product`] is priced by quantity bands. Bands of the same [`Product`]
//! must never overlap, so every new or edited band is checked by
//! [`validate()`] against the rest of the [`Product`]'s bands before it's
//! accepted into a [`Draft`].
//!
//! [`Draft`]: super::Draft
//! [`Product`]: super::Product

use std::{fmt, str::FromStr as _};

use common::define_kind;
use derive_more::{Display, Error, From, FromStr, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::infra::api::Create;
#[cfg(doc)]
use crate::domain::Product;

use super::Id as ProductId;

/// Quantity-based pricing band of a [`Product`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PriceTier {
    /// ID of this [`PriceTier`], if it has been persisted already.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,

    /// Smallest quantity (inclusive) this [`PriceTier`] applies to.
    pub min_quantity: u32,

    /// Largest quantity this [`PriceTier`] applies to.
    ///
    /// [`None`] means the [`PriceTier`] is unbounded.
    pub max_quantity: Option<u32>,

    /// Price of a single unit.
    pub price_per_unit: Decimal,

    /// [`Period`] the price is charged for.
    #[serde(default)]
    pub period: Period,
}

impl PriceTier {
    /// Indicates whether this [`PriceTier`] has no upper bound.
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.max_quantity.is_none()
    }

    /// Indicates whether the provided `quantity` falls into this
    /// [`PriceTier`] (both bounds inclusive).
    #[must_use]
    pub fn contains(&self, quantity: u32) -> bool {
        self.min_quantity <= quantity
            && self.max_quantity.map_or(true, |max| quantity <= max)
    }

    /// Indicates whether this [`PriceTier`] overlaps the `other` one.
    ///
    /// Bounds touch inclusively: `1..=10` overlaps `10..=20`, while `1..=10`
    /// and `11..=20` don't. An unbounded [`PriceTier`] overlaps any
    /// [`PriceTier`] reaching its minimum, and two unbounded ones always
    /// overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        match (self.max_quantity, other.max_quantity) {
            (None, None) => true,
            (None, Some(other_max)) => other_max >= self.min_quantity,
            (Some(max), None) => max >= other.min_quantity,
            (Some(max), Some(other_max)) => {
                !(max < other.min_quantity || self.min_quantity > other_max)
            }
        }
    }
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            min_quantity,
            max_quantity,
            price_per_unit,
            period,
            ..
        } = self;
        match max_quantity {
            Some(max) => write!(f, "{min_quantity}..{max}")?,
            None => write!(f, "{min_quantity}..")?,
        }
        write!(f, "@{}/{period}", price_per_unit.normalize())
    }
}

/// ID of a persisted [`PriceTier`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

define_kind! {
    #[doc = "Period a [`PriceTier`] price is charged for."]
    enum Period {
        #[doc = "Price is charged monthly."]
        Month = 1,

        #[doc = "Price is charged yearly."]
        Year = 2,
    }
}

impl Default for Period {
    fn default() -> Self {
        Self::Month
    }
}

/// Unvalidated [`PriceTier`] as it's typed into a form.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Candidate {
    /// Entered minimum quantity, if any.
    pub min_quantity: Option<u32>,

    /// Entered maximum quantity, if any.
    pub max_quantity: Option<u32>,

    /// Entered price per unit, if any.
    pub price_per_unit: Option<String>,

    /// Selected [`Period`].
    pub period: Period,
}

impl From<&PriceTier> for Candidate {
    fn from(tier: &PriceTier) -> Self {
        Self {
            min_quantity: Some(tier.min_quantity),
            max_quantity: tier.max_quantity,
            price_per_unit: Some(tier.price_per_unit.to_string()),
            period: tier.period,
        }
    }
}

/// Reason of a [`Candidate`] being rejected by [`validate()`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum Violation {
    /// Minimum quantity is absent or less than `1`.
    #[display("minimum quantity required")]
    MinQuantityRequired,

    /// Price is absent, unparsable or not positive.
    #[display("price required")]
    PriceRequired,

    /// Maximum quantity doesn't exceed the minimum one.
    #[display("max must exceed min")]
    MaxNotAboveMin,

    /// [`Candidate`] overlaps an existing [`PriceTier`].
    #[display("overlap detected")]
    Overlap {
        /// Minimum quantity of the overlapped [`PriceTier`].
        min_quantity: u32,

        /// Maximum quantity of the overlapped [`PriceTier`].
        max_quantity: Option<u32>,
    },
}

/// Validates the provided [`Candidate`] against the `others` [`PriceTier`]s
/// of the same [`Product`], returning the [`PriceTier`] it describes.
///
/// When editing, `others` must not include the [`PriceTier`] being edited.
///
/// Checks are applied in order, and the first failing one is reported:
/// 1. minimum quantity is present and at least `1`;
/// 2. price is present and parses to a positive decimal;
/// 3. maximum quantity, if present, is strictly greater than the minimum;
/// 4. the [`Candidate`] doesn't [overlap] any of the `others`.
///
/// # Errors
///
/// With the first [`Violation`] found.
///
/// [overlap]: PriceTier::overlaps
pub fn validate<'t>(
    candidate: &Candidate,
    others: impl IntoIterator<Item = &'t PriceTier>,
) -> Result<PriceTier, Violation> {
    let min_quantity = candidate
        .min_quantity
        .filter(|min| *min >= 1)
        .ok_or(Violation::MinQuantityRequired)?;

    let price_per_unit = candidate
        .price_per_unit
        .as_deref()
        .map(str::trim)
        .and_then(|p| Decimal::from_str(p).ok())
        .filter(|p| p.is_sign_positive() && !p.is_zero())
        .ok_or(Violation::PriceRequired)?;

    if let Some(max) = candidate.max_quantity {
        if max <= min_quantity {
            return Err(Violation::MaxNotAboveMin);
        }
    }

    let tier = PriceTier {
        id: None,
        min_quantity,
        max_quantity: candidate.max_quantity,
        price_per_unit,
        period: candidate.period,
    };

    if let Some(other) = others.into_iter().find(|o| tier.overlaps(o)) {
        return Err(Violation::Overlap {
            min_quantity: other.min_quantity,
            max_quantity: other.max_quantity,
        });
    }

    Ok(tier)
}

/// Request body adding a [`PriceTier`] to a persisted [`Product`].
#[derive(Clone, Debug, Serialize)]
pub struct New {
    /// ID of the [`Product`] to add the [`PriceTier`] to.
    #[serde(skip)]
    pub product_id: ProductId,

    /// [`PriceTier`] to add.
    #[serde(flatten)]
    pub tier: PriceTier,
}

impl Create for New {
    type Resource = PriceTier;

    fn path(&self) -> String {
        format!("/products/{}/price-tiers", self.product_id)
    }
}
