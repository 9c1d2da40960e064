//! [`Lead`] definitions.

use common::{define_kind, money::Currency, unit, DateTime, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{distributor, partner, status},
    infra::api::{self, Create},
};

/// Sales opportunity.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Lead {
    /// ID of this [`Lead`].
    pub id: Id,

    /// Title of this [`Lead`].
    pub title: String,

    /// Prospected organization.
    pub organization: String,

    /// Contact person in the prospected organization.
    pub contact_name: String,

    /// Email of the contact person.
    #[serde(default)]
    pub contact_email: Option<String>,

    /// Phone of the contact person.
    #[serde(default)]
    pub contact_phone: Option<String>,

    /// Estimated deal value.
    #[serde(default)]
    pub value: Option<Decimal>,

    /// [`Currency`] of the estimated deal value.
    #[serde(default)]
    pub currency: Currency,

    /// Current [`Status`] of this [`Lead`].
    pub status: Status,

    /// Win probability in percents.
    #[serde(default)]
    pub probability: Option<u8>,

    /// Expected closing [`DateTime`].
    #[serde(default)]
    pub expected_close_date: Option<DateTime>,

    /// ID of the associated [`Partner`], if any.
    ///
    /// [`Partner`]: crate::domain::Partner
    #[serde(default)]
    pub partner_id: Option<partner::Id>,

    /// ID of the associated [`Distributor`], if any.
    ///
    /// [`Distributor`]: crate::domain::Distributor
    #[serde(default)]
    pub distributor_id: Option<distributor::Id>,

    /// [`DateTime`] when this [`Lead`] was created.
    ///
    /// [`DateTime`]: common::DateTime
    pub created_at: DateTimeOf<(Lead, unit::Creation)>,

    /// [`DateTime`] when this [`Lead`] was last modified.
    ///
    /// [`DateTime`]: common::DateTime
    pub updated_at: DateTimeOf<(Lead, unit::Modification)>,
}

/// ID of a [`Lead`].
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
    #[doc = "Stage of a [`Lead`] in the sales pipeline."]
    enum Status {
        #[doc = "[`Lead`] was just registered."]
        New = 1,

        #[doc = "Prospect was reached out."]
        Contacted = 2,

        #[doc = "Prospect's need was confirmed."]
        Qualified = 3,

        #[doc = "Proposal was sent."]
        Proposal = 4,

        #[doc = "Proposal terms are being discussed."]
        Negotiation = 5,

        #[doc = "Deal was closed."]
        Won = 6,

        #[doc = "Deal was lost."]
        Lost = 7,
    }
}

impl status::Lifecycle for Status {
    /// Any stage may be moved to any other one, including reopening closed
    /// [`Lead`]s.
    fn successors(self) -> &'static [Self] {
        Self::ALL
    }
}

impl status::Stateful for Lead {
    type Status = Status;

    fn status(&self) -> Status {
        self.status
    }

    fn id(&self) -> Id {
        self.id
    }
}

/// Request body creating a new [`Lead`].
#[derive(Clone, Debug, Serialize)]
pub struct New {
    /// Title of the new [`Lead`].
    pub title: String,

    /// Prospected organization.
    pub organization: String,

    /// Contact person in the prospected organization.
    pub contact_name: String,

    /// Email of the contact person.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,

    /// Phone of the contact person.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,

    /// Estimated deal value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Decimal>,

    /// [`Currency`] of the estimated deal value.
    pub currency: Currency,

    /// Initial [`Status`].
    pub status: Status,

    /// Win probability in percents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<u8>,

    /// ID of the associated [`Partner`].
    ///
    /// [`Partner`]: crate::domain::Partner
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<partner::Id>,

    /// ID of the associated [`Distributor`].
    ///
    /// [`Distributor`]: crate::domain::Distributor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distributor_id: Option<distributor::Id>,
}

impl Create for New {
    type Resource = Lead;

    fn path(&self) -> String {
        <Lead as api::Resource>::PATH.to_owned()
    }
}

/// Request body modifying an existing [`Lead`].
///
/// [`Status`] is changed via [`status::Change`] only.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Patch {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// New prospected organization.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,

    /// New contact person.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,

    /// New email of the contact person.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,

    /// New phone of the contact person.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,

    /// New estimated deal value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Decimal>,

    /// New [`Currency`] of the estimated deal value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,

    /// New win probability in percents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<u8>,

    /// New ID of the associated [`Partner`].
    ///
    /// [`Partner`]: crate::domain::Partner
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<partner::Id>,

    /// New ID of the associated [`Distributor`].
    ///
    /// [`Distributor`]: crate::domain::Distributor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distributor_id: Option<distributor::Id>,
}

impl api::Patch for Patch {
    type Resource = Lead;
}

/// Filter of a [`Lead`]s list.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct Filter {
    /// [`Status`] to list [`Lead`]s in.
    #[serde(rename = "status_filter", skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl api::Resource for Lead {
    type Id = Id;
    type Filter = Filter;

    const PATH: &'static str = "/leads";
}
