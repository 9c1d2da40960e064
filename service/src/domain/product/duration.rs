//! [`Duration`] definitions.

use common::Percent;
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Subscription commitment a [`Product`] may be sold for.
///
/// Longer commitments usually carry a bigger [`Percent`] discount.
///
/// [`Product`]: super::Product
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Duration {
    /// ID of this [`Duration`].
    pub id: Id,

    /// Number of months this [`Duration`] lasts.
    pub months: u32,

    /// Discount applied to the subtotal for this [`Duration`].
    #[serde(default)]
    pub discount_percentage: Percent,

    /// Display name of this [`Duration`] (`12 months`, etc).
    pub name: String,
}

/// ID of a [`Duration`].
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

/// API path the [`Duration`]s are listed at.
pub const PATH: &str = "/durations";
