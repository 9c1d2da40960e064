//! [`Partner`] definitions.

use common::{unit, DateTimeOf};
use derive_more::{Deref, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::company::{self, Company},
    infra::api::{self, Create},
};

/// Company reselling [`Product`]s to end customers.
///
/// [`Product`]: crate::domain::Product
#[derive(Clone, Debug, Deref, Deserialize, Serialize)]
pub struct Partner {
    /// ID of this [`Partner`].
    pub id: Id,

    /// [`Company`] details of this [`Partner`].
    #[deref]
    #[serde(flatten)]
    pub company: Company,

    /// [`DateTime`] when this [`Partner`] was created.
    ///
    /// [`DateTime`]: common::DateTime
    pub created_at: DateTimeOf<(Partner, unit::Creation)>,

    /// [`DateTime`] when this [`Partner`] was last modified.
    ///
    /// [`DateTime`]: common::DateTime
    pub updated_at: DateTimeOf<(Partner, unit::Modification)>,
}

/// ID of a [`Partner`].
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

/// Request body creating a new [`Partner`].
#[derive(Clone, Debug, From, Serialize)]
#[serde(transparent)]
pub struct New(pub Company);

impl Create for New {
    type Resource = Partner;

    fn path(&self) -> String {
        <Partner as api::Resource>::PATH.to_owned()
    }
}

/// Request body modifying an existing [`Partner`].
#[derive(Clone, Debug, Default, From, Serialize)]
#[serde(transparent)]
pub struct Patch(pub company::Patch);

impl api::Patch for Patch {
    type Resource = Partner;
}

impl api::Resource for Partner {
    type Id = Id;
    type Filter = company::Filter;

    const PATH: &'static str = "/partners";
}
