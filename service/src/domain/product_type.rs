//! [`ProductType`] definitions.

use common::{unit, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::infra::api::{self, Create};

/// Category grouping [`Product`]s (`Backup`, `Storage`, etc).
///
/// [`Product`]: crate::domain::Product
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ProductType {
    /// ID of this [`ProductType`].
    pub id: Id,

    /// Unique name of this [`ProductType`].
    pub name: String,

    /// Free-form description of this [`ProductType`].
    pub description: Option<String>,

    /// Indicator whether new [`Product`]s may use this [`ProductType`].
    ///
    /// [`Product`]: crate::domain::Product
    pub is_active: bool,

    /// [`DateTime`] when this [`ProductType`] was created.
    ///
    /// [`DateTime`]: common::DateTime
    pub created_at: DateTimeOf<(ProductType, unit::Creation)>,

    /// [`DateTime`] when this [`ProductType`] was last modified.
    ///
    /// [`DateTime`]: common::DateTime
    pub updated_at: DateTimeOf<(ProductType, unit::Modification)>,
}

/// ID of a [`ProductType`].
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

/// Request body creating a new [`ProductType`].
#[derive(Clone, Debug, Serialize)]
pub struct New {
    /// Name of the new [`ProductType`].
    pub name: String,

    /// Description of the new [`ProductType`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Indicator whether the new [`ProductType`] is active.
    pub is_active: bool,
}

impl Create for New {
    type Resource = ProductType;

    fn path(&self) -> String {
        <ProductType as api::Resource>::PATH.to_owned()
    }
}

/// Request body modifying an existing [`ProductType`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct Patch {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// New activity indicator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl api::Patch for Patch {
    type Resource = ProductType;
}

/// Filter of a [`ProductType`]s list.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Filter {
    /// Whether to list active or inactive [`ProductType`]s only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    /// Substring to search in names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl api::Resource for ProductType {
    type Id = Id;
    type Filter = Filter;

    const PATH: &'static str = "/product-types";
}
