//! [`Product`] definitions.

pub mod draft;
pub mod duration;
pub mod pricing;
pub mod tier;

use std::str;

use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::product_type,
    infra::api::{self, Create},
};

pub use self::{draft::Draft, duration::Duration, tier::PriceTier};

/// Product sold through partners and distributors.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Product {
    /// ID of this [`Product`].
    pub id: Id,

    /// [`Name`] of this [`Product`].
    pub name: Name,

    /// ID of the [`ProductType`] this [`Product`] belongs to.
    ///
    /// [`ProductType`]: crate::domain::ProductType
    pub type_id: product_type::Id,

    /// [`Unit`] this [`Product`] is sold in.
    pub unit: Unit,

    /// Free-form description of this [`Product`].
    pub description: Option<String>,

    /// Indicator whether this [`Product`] can be sold.
    pub is_active: bool,

    /// Quantity-based [`PriceTier`]s of this [`Product`].
    #[serde(default)]
    pub price_tiers: Vec<PriceTier>,

    /// [`DateTime`] when this [`Product`] was created.
    ///
    /// [`DateTime`]: common::DateTime
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Product`] was last modified.
    ///
    /// [`DateTime`]: common::DateTime
    pub updated_at: ModificationDateTime,
}

/// ID of a [`Product`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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

/// Name of a [`Product`].
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[as_ref(str, String)]
#[serde(try_from = "String")]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        let trimmed = name.trim();
        (!trimmed.is_empty() && trimmed.chars().count() <= 255)
            .then(|| Self(trimmed.to_owned()))
    }
}

impl TryFrom<String> for Name {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid product `Name`")
    }
}

impl str::FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid product `Name`")
    }
}

/// Unit a [`Product`] is measured in (`TB`, `user`, `seat`, etc.).
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[as_ref(str, String)]
#[serde(try_from = "String")]
pub struct Unit(String);

impl Unit {
    /// Creates a new [`Unit`] if the given `unit` is valid.
    #[must_use]
    pub fn new(unit: impl Into<String>) -> Option<Self> {
        let unit = unit.into();
        let trimmed = unit.trim();
        (!trimmed.is_empty() && trimmed.chars().count() <= 50)
            .then(|| Self(trimmed.to_owned()))
    }
}

impl TryFrom<String> for Unit {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid product `Unit`")
    }
}

impl str::FromStr for Unit {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid product `Unit`")
    }
}

/// Request body creating a new [`Product`].
#[derive(Clone, Debug, Serialize)]
pub struct New {
    /// [`Name`] of the new [`Product`].
    pub name: Name,

    /// ID of the [`ProductType`] of the new [`Product`].
    ///
    /// [`ProductType`]: crate::domain::ProductType
    pub type_id: product_type::Id,

    /// [`Unit`] of the new [`Product`].
    pub unit: Unit,

    /// Description of the new [`Product`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Indicator whether the new [`Product`] is active.
    pub is_active: bool,
}

impl Create for New {
    type Resource = Product;

    fn path(&self) -> String {
        <Product as api::Resource>::PATH.to_owned()
    }
}

/// Request body modifying an existing [`Product`].
///
/// Absent fields are left untouched.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Patch {
    /// New [`Name`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Name>,

    /// New [`ProductType`] ID.
    ///
    /// [`ProductType`]: crate::domain::ProductType
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<product_type::Id>,

    /// New [`Unit`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,

    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// New activity indicator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl Patch {
    /// Indicates whether this [`Patch`] changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let Self {
            name,
            type_id,
            unit,
            description,
            is_active,
        } = self;
        name.is_none()
            && type_id.is_none()
            && unit.is_none()
            && description.is_none()
            && is_active.is_none()
    }
}

impl api::Patch for Patch {
    type Resource = Product;
}

/// Filter of a [`Product`]s list.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Filter {
    /// Whether to list active or inactive [`Product`]s.
    ///
    /// The API lists active [`Product`]s only when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    /// Name of the [`ProductType`] to list [`Product`]s of.
    ///
    /// [`ProductType`]: crate::domain::ProductType
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
}

impl api::Resource for Product {
    type Id = Id;
    type Filter = Filter;

    const PATH: &'static str = "/products";
}

/// [`DateTime`] when a [`Product`] was created.
///
/// [`DateTime`]: common::DateTime
pub type CreationDateTime = DateTimeOf<(Product, unit::Creation)>;

/// [`DateTime`] when a [`Product`] was modified.
///
/// [`DateTime`]: common::DateTime
pub type ModificationDateTime = DateTimeOf<(Product, unit::Modification)>;

#[cfg(test)]
mod spec {
    use super::{Name, Patch, Unit};

    #[test]
    fn validates_name_and_unit() {
        assert_eq!(AsRef::<str>::as_ref(&Name::new("  Backup ").unwrap()), "Backup");
        assert!(Name::new("   ").is_none());
        assert!(Name::new("x".repeat(256)).is_none());

        assert!(Unit::new("TB").is_some());
        assert!(Unit::new("").is_none());
        assert!(Unit::new("u".repeat(51)).is_none());
    }

    #[test]
    fn serializes_only_present_patch_fields() {
        let patch = Patch {
            is_active: Some(false),
            ..Patch::default()
        };
        assert!(!patch.is_empty());
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({ "is_active": false }),
        );
        assert!(Patch::default().is_empty());
    }
}
