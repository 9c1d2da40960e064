//! [`Distributor`] definitions.

use common::{unit, DateTimeOf};
use derive_more::{Deref, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{
        company::{self, Company},
        partner, Partner,
    },
    infra::api::{self, Create},
};

/// Wholesaler [`Partner`]s buy [`Product`]s through.
///
/// [`Partner`]: crate::domain::Partner
/// [`Product`]: crate::domain::Product
#[derive(Clone, Debug, Deref, Deserialize, Serialize)]
pub struct Distributor {
    /// ID of this [`Distributor`].
    pub id: Id,

    /// [`Company`] details of this [`Distributor`].
    #[deref]
    #[serde(flatten)]
    pub company: Company,

    /// [`DateTime`] when this [`Distributor`] was created.
    ///
    /// [`DateTime`]: common::DateTime
    pub created_at: DateTimeOf<(Distributor, unit::Creation)>,

    /// [`DateTime`] when this [`Distributor`] was last modified.
    ///
    /// [`DateTime`]: common::DateTime
    pub updated_at: DateTimeOf<(Distributor, unit::Modification)>,
}

/// ID of a [`Distributor`].
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

/// Request body creating a new [`Distributor`].
#[derive(Clone, Debug, From, Serialize)]
#[serde(transparent)]
pub struct New(pub Company);

impl Create for New {
    type Resource = Distributor;

    fn path(&self) -> String {
        <Distributor as api::Resource>::PATH.to_owned()
    }
}

/// Request body modifying an existing [`Distributor`].
#[derive(Clone, Debug, Default, From, Serialize)]
#[serde(transparent)]
pub struct Patch(pub company::Patch);

impl api::Patch for Patch {
    type Resource = Distributor;
}

impl api::Resource for Distributor {
    type Id = Id;
    type Filter = company::Filter;

    const PATH: &'static str = "/distributors";
}

/// [`Partner`] supplied through a [`Distributor`].
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Assignment {
    /// ID of this [`Assignment`].
    pub id: AssignmentId,

    /// ID of the supplying [`Distributor`].
    pub distributor_id: Id,

    /// Supplied [`Partner`].
    pub partner: Partner,

    /// Indicator whether this [`Assignment`] is in effect.
    #[serde(default)]
    pub is_active: bool,

    /// Notes about this [`Assignment`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// [`DateTime`] when the [`Partner`] was assigned.
    ///
    /// [`DateTime`]: common::DateTime
    pub assigned_at: DateTimeOf<(Assignment, unit::Creation)>,
}

/// ID of an [`Assignment`].
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
pub struct AssignmentId(Uuid);

/// Request body assigning a [`Partner`] to a [`Distributor`].
#[derive(Clone, Debug, Serialize)]
pub struct Assign {
    /// ID of the [`Distributor`] to assign the [`Partner`] to.
    #[serde(skip)]
    pub distributor_id: Id,

    /// ID of the [`Partner`] to assign.
    pub partner_id: partner::Id,

    /// Notes about the [`Assignment`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Create for Assign {
    type Resource = Assignment;

    fn path(&self) -> String {
        format!(
            "{}/{}/partners",
            <Distributor as api::Resource>::PATH,
            self.distributor_id,
        )
    }
}
