//! Quantity and [`Duration`] based pricing of [`Product`]s.

use common::{money::quantize, Money};
use derive_more::{Display, Error};
use rust_decimal::Decimal;
use serde::Serialize;

use super::{tier::Period, Duration, PriceTier, Product};

/// Price breakdown of a [`Product`] bought in some quantity.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Quote {
    /// ID of the quoted [`Product`].
    pub product_id: super::Id,

    /// Name of the quoted [`Product`].
    pub product_name: String,

    /// Unit the quoted [`Product`] is sold in.
    pub product_unit: String,

    /// Quoted quantity.
    pub quantity: u32,

    /// [`PriceTier`] the quantity falls into.
    pub tier: Band,

    /// Price of a single unit.
    pub unit_price: Money,

    /// `unit_price × quantity`, rounded to cents.
    pub subtotal: Money,

    /// Months of the applied [`Duration`], if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_months: Option<u32>,

    /// Discount percentage of the applied [`Duration`].
    pub discount_percentage: Decimal,

    /// Discount of the applied [`Duration`], rounded to cents.
    pub discount_amount: Money,

    /// `subtotal − discount_amount`, rounded to cents.
    pub total: Money,
}

/// Bounds of the [`PriceTier`] used for a [`Quote`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Band {
    /// Minimum quantity of the [`PriceTier`].
    pub min_quantity: u32,

    /// Maximum quantity of the [`PriceTier`], if bounded.
    pub max_quantity: Option<u32>,

    /// [`Period`] of the [`PriceTier`].
    pub period: Period,
}

impl From<&PriceTier> for Band {
    fn from(tier: &PriceTier) -> Self {
        Self {
            min_quantity: tier.min_quantity,
            max_quantity: tier.max_quantity,
            period: tier.period,
        }
    }
}

/// Error of [`quote()`]ing a [`Product`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum QuoteError {
    /// Quantity is zero.
    #[display("quantity must be positive")]
    InvalidQuantity,

    /// [`Product`] is not sold anymore.
    #[display("product is not active")]
    ProductInactive,

    /// None of the [`Product`]'s [`PriceTier`]s covers the quantity.
    #[display("no price tier found for quantity {_0}")]
    NoTierForQuantity(#[error(not(source))] u32),
}

/// Quotes the provided `quantity` of the [`Product`], optionally committed
/// for the provided [`Duration`].
///
/// The first [`PriceTier`] (in the [`Product`]'s order) containing the
/// `quantity` is used. Every amount is rounded half-up to cents.
///
/// # Errors
///
/// - If the `quantity` is zero.
/// - If the [`Product`] is not active.
/// - If no [`PriceTier`] contains the `quantity`.
pub fn quote(
    product: &Product,
    quantity: u32,
    duration: Option<&Duration>,
) -> Result<Quote, QuoteError> {
    if quantity == 0 {
        return Err(QuoteError::InvalidQuantity);
    }
    if !product.is_active {
        return Err(QuoteError::ProductInactive);
    }

    let tier = product
        .price_tiers
        .iter()
        .find(|t| t.contains(quantity))
        .ok_or(QuoteError::NoTierForQuantity(quantity))?;

    let unit_price = tier.price_per_unit;
    let subtotal = quantize(unit_price * Decimal::from(quantity));

    let discount_percentage =
        duration.map(|d| d.discount_percentage).unwrap_or_default();
    let discount_amount = if discount_percentage.is_zero() {
        Decimal::ZERO
    } else {
        quantize(discount_percentage.of(subtotal))
    };

    Ok(Quote {
        product_id: product.id,
        product_name: product.name.to_string(),
        product_unit: product.unit.to_string(),
        quantity,
        tier: tier.into(),
        unit_price: Money::eur(unit_price),
        subtotal: Money::eur(subtotal),
        duration_months: duration.map(|d| d.months),
        discount_percentage: discount_percentage.get(),
        discount_amount: Money::eur(discount_amount),
        total: Money::eur(quantize(subtotal - discount_amount)),
    })
}

/// Summed amounts of several [`Quote`]s, as stored on an order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Totals {
    /// Sum of the [`Quote`]s subtotals.
    pub subtotal: Money,

    /// Sum of the [`Quote`]s discounts.
    pub discount_amount: Money,

    /// Applied tax (always zero at the moment).
    pub tax_amount: Money,

    /// `subtotal − discount_amount + tax_amount`, rounded to cents.
    pub total_amount: Money,
}

/// Sums the provided [`Quote`]s into order [`Totals`].
#[must_use]
pub fn totals<'q>(quotes: impl IntoIterator<Item = &'q Quote>) -> Totals {
    let (subtotal, discount) = quotes.into_iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(subtotal, discount), q| {
            (
                subtotal + q.subtotal.amount,
                discount + q.discount_amount.amount,
            )
        },
    );
    let tax = Decimal::ZERO;

    Totals {
        subtotal: Money::eur(quantize(subtotal)),
        discount_amount: Money::eur(quantize(discount)),
        tax_amount: Money::eur(tax),
        total_amount: Money::eur(quantize(subtotal - discount + tax)),
    }
}

#[cfg(test)]
mod spec {
    use common::{Money, Percent};
    use rust_decimal::Decimal;

    use crate::domain::product::{
        tier::Period, Duration, Name, PriceTier, Product, Unit,
    };

    use super::{quote, totals, QuoteError};

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn tier(min: u32, max: Option<u32>, price: &str) -> PriceTier {
        PriceTier {
            id: None,
            min_quantity: min,
            max_quantity: max,
            price_per_unit: dec(price),
            period: Period::Month,
        }
    }

    fn product() -> Product {
        Product {
            id: uuid::Uuid::new_v4().into(),
            name: Name::new("Backup").unwrap(),
            type_id: uuid::Uuid::new_v4().into(),
            unit: Unit::new("TB").unwrap(),
            description: None,
            is_active: true,
            price_tiers: vec![
                tier(1, Some(10), "10.005"),
                tier(11, Some(100), "8"),
                tier(101, None, "6.50"),
            ],
            created_at: common::DateTime::now().coerce(),
            updated_at: common::DateTime::now().coerce(),
        }
    }

    fn duration(pct: &str) -> Duration {
        Duration {
            id: uuid::Uuid::new_v4().into(),
            months: 24,
            discount_percentage: Percent::new(dec(pct)).unwrap(),
            name: "24 months".to_owned(),
        }
    }

    #[test]
    fn picks_tier_by_inclusive_bounds() {
        let product = product();

        let q = quote(&product, 10, None).unwrap();
        assert_eq!(q.tier.max_quantity, Some(10));
        assert_eq!(q.subtotal, Money::eur(dec("100.05")));

        let q = quote(&product, 11, None).unwrap();
        assert_eq!(q.unit_price, Money::eur(dec("8")));
        assert_eq!(q.total, Money::eur(dec("88.00")));

        let q = quote(&product, 1000, None).unwrap();
        assert_eq!(q.tier.max_quantity, None);
        assert_eq!(q.total, Money::eur(dec("6500.00")));
    }

    #[test]
    fn applies_duration_discount() {
        let q = quote(&product(), 3, Some(&duration("15"))).unwrap();

        // 3 × 10.005 = 30.015 → 30.02; 15% = 4.503 → 4.50.
        assert_eq!(q.subtotal, Money::eur(dec("30.02")));
        assert_eq!(q.discount_amount, Money::eur(dec("4.50")));
        assert_eq!(q.total, Money::eur(dec("25.52")));
        assert_eq!(q.duration_months, Some(24));
    }

    #[test]
    fn ignores_zero_discount() {
        let q = quote(&product(), 20, Some(&duration("0"))).unwrap();
        assert_eq!(q.discount_amount, Money::eur(Decimal::ZERO));
        assert_eq!(q.total, q.subtotal);
    }

    #[test]
    fn rejects_unpriceable_requests() {
        let mut product = product();
        assert_eq!(quote(&product, 0, None), Err(QuoteError::InvalidQuantity));

        product.price_tiers.truncate(1);
        assert_eq!(
            quote(&product, 11, None),
            Err(QuoteError::NoTierForQuantity(11)),
        );

        product.is_active = false;
        assert_eq!(quote(&product, 1, None), Err(QuoteError::ProductInactive));
    }

    #[test]
    fn sums_quotes_into_totals() {
        let product = product();
        let quotes = [
            quote(&product, 3, Some(&duration("15"))).unwrap(),
            quote(&product, 11, None).unwrap(),
        ];

        let totals = totals(&quotes);
        assert_eq!(totals.subtotal, Money::eur(dec("118.02")));
        assert_eq!(totals.discount_amount, Money::eur(dec("4.50")));
        assert_eq!(totals.tax_amount, Money::eur(Decimal::ZERO));
        assert_eq!(totals.total_amount, Money::eur(dec("113.52")));
    }
}
