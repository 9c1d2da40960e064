//! [`Contract`] definitions.

pub mod estimate;
pub mod invoice;

use common::{define_kind, money::Currency, unit, DateTime, DateTimeOf};
use derive_more::{Display, Error, From, FromStr, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{distributor, order, partner, status},
    infra::api::{self, Create},
};

/// Agreement activated from a fulfilled [`Order`].
///
/// [`Order`]: crate::domain::Order
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Contract {
    /// ID of this [`Contract`].
    pub id: Id,

    /// Human-readable number of this [`Contract`].
    pub contract_number: String,

    /// ID of the [`Order`] this [`Contract`] was activated from.
    ///
    /// [`Order`]: crate::domain::Order
    pub order_id: order::Id,

    /// Current [`Status`] of this [`Contract`].
    pub status: Status,

    /// ID of the [`Partner`] this [`Contract`] is signed with, if any.
    ///
    /// [`Partner`]: crate::domain::Partner
    pub partner_id: Option<partner::Id>,

    /// ID of the [`Distributor`] this [`Contract`] goes through, if any.
    ///
    /// [`Distributor`]: crate::domain::Distributor
    pub distributor_id: Option<distributor::Id>,

    /// [`DateTime`] when this [`Contract`] became active.
    pub activation_date: ActivationDateTime,

    /// [`DateTime`] when this [`Contract`] ends, if ever.
    pub expiration_date: Option<ExpirationDateTime>,

    /// ID of the [`Contract`] this one renews, if any.
    #[serde(default)]
    pub renewed_from_id: Option<Id>,

    /// Total value of this [`Contract`].
    pub total_value: Decimal,

    /// [`Currency`] of the `total_value`.
    #[serde(default)]
    pub currency: Currency,

    /// Internal notes.
    #[serde(default)]
    pub notes_internal: Option<String>,

    /// IDs of the invoices issued for this [`Contract`].
    #[serde(default)]
    pub billing_invoices: Vec<String>,

    /// [`DateTime`] when this [`Contract`] was created.
    pub created_at: DateTimeOf<(Contract, unit::Creation)>,

    /// [`DateTime`] when this [`Contract`] was last modified.
    pub updated_at: DateTimeOf<(Contract, unit::Modification)>,

    /// [`DateTime`] when this [`Contract`] was cancelled, if it was.
    #[serde(default)]
    pub cancelled_at: Option<DateTimeOf<(Contract, unit::Cancellation)>>,
}

impl Contract {
    /// Indicates whether this [`Contract`] may be renewed.
    ///
    /// Only active or expired [`Contract`]s having an expiration date may be.
    #[must_use]
    pub fn can_renew(&self) -> bool {
        matches!(self.status, Status::Active | Status::Expired)
            && self.expiration_date.is_some()
    }
}

/// ID of a [`Contract`].
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
    #[doc = "Status of a [`Contract`]."]
    enum Status {
        #[doc = "[`Contract`] is running."]
        Active = 1,

        #[doc = "[`Contract`] was lost to a competitor."]
        Lost = 2,

        #[doc = "[`Contract`] was replaced by a bigger one."]
        Upgraded = 3,

        #[doc = "[`Contract`] was replaced by a smaller one."]
        Downgraded = 4,

        #[doc = "[`Contract`] reached its expiration date."]
        Expired = 5,

        #[doc = "[`Contract`] was terminated."]
        Cancelled = 6,
    }
}

impl status::Lifecycle for Status {
    fn successors(self) -> &'static [Self] {
        match self {
            Self::Active => &[
                Self::Upgraded,
                Self::Downgraded,
                Self::Expired,
                Self::Cancelled,
            ],
            Self::Upgraded | Self::Downgraded | Self::Expired => {
                &[Self::Cancelled]
            }
            Self::Lost | Self::Cancelled => &[],
        }
    }
}

impl status::Stateful for Contract {
    type Status = Status;

    fn status(&self) -> Status {
        self.status
    }

    fn id(&self) -> Id {
        self.id
    }
}

/// Filter of a [`Contract`]s list.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct Filter {
    /// [`Status`] to list [`Contract`]s in.
    #[serde(rename = "status_filter", skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl api::Resource for Contract {
    type Id = Id;
    type Filter = Filter;

    const PATH: &'static str = "/contracts";
}

/// Dates a [`Contract`] is activated with from a fulfilled [`Order`].
///
/// [`Order`]: crate::domain::Order
#[derive(Clone, Debug, Default, Serialize)]
pub struct Activation {
    /// [`DateTime`] the [`Contract`] becomes active at.
    ///
    /// The API uses the current [`DateTime`] when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activation_date: Option<ActivationDateTime>,

    /// [`DateTime`] the [`Contract`] expires at, if ever.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<ExpirationDateTime>,

    /// Internal notes of the [`Contract`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes_internal: Option<String>,
}

impl Activation {
    /// Checks the expiration date (if any) is strictly after the activation
    /// one, taking `now` for an absent activation date.
    ///
    /// # Errors
    ///
    /// If the expiration date is not after the activation one.
    pub fn check(&self, now: DateTime) -> Result<(), InvalidActivation> {
        let activation = self.activation_date.map_or(now, DateTimeOf::coerce);
        match self.expiration_date {
            Some(exp) if exp.coerce() <= activation => {
                Err(InvalidActivation {
                    activation: activation.coerce(),
                    expiration: exp,
                })
            }
            _ => Ok(()),
        }
    }
}

/// [`Activation`] expiring before it starts.
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
#[display(
    "expiration date {} must be after activation date {}",
    expiration.to_rfc3339(),
    activation.to_rfc3339(),
)]
pub struct InvalidActivation {
    /// Effective activation [`DateTime`].
    pub activation: ActivationDateTime,

    /// Requested expiration [`DateTime`].
    pub expiration: ExpirationDateTime,
}

/// Request body activating a fulfilled [`Order`] into a [`Contract`].
///
/// [`Order`]: crate::domain::Order
#[derive(Clone, Debug, Serialize)]
pub struct Activate {
    /// ID of the [`Order`] to activate.
    ///
    /// [`Order`]: crate::domain::Order
    #[serde(skip)]
    pub order_id: order::Id,

    /// Dates of the activated [`Contract`].
    #[serde(flatten)]
    pub activation: Activation,
}

impl Create for Activate {
    type Resource = Contract;

    fn path(&self) -> String {
        format!("/orders/{}/activate", self.order_id)
    }
}

/// [`DateTime`] when a [`Contract`] becomes active.
pub type ActivationDateTime = DateTimeOf<(Contract, unit::Activation)>;

/// [`DateTime`] when a [`Contract`] expires.
pub type ExpirationDateTime = DateTimeOf<(Contract, unit::Expiration)>;

#[cfg(test)]
mod spec {
    use common::DateTime;

    use crate::domain::status::Lifecycle as _;

    use super::{Activation, Contract, Status};

    fn contract(status: Status, expires: bool) -> Contract {
        serde_json::from_value(serde_json::json!({
            "id": "0b0f3f47-8b6e-4a57-a8b4-7a3e34a2d2c1",
            "contract_number": "CTR-2025-0001",
            "order_id": "9a7e0e52-2c1f-4d0e-8f7c-0d0b3c9b6a11",
            "status": status,
            "user_id": "5d1a1e9c-1f7c-4b5b-9a43-6b7c5b7f3a10",
            "partner_id": null,
            "activation_date": "2025-01-01T00:00:00",
            "expiration_date": expires.then_some("2026-01-01T00:00:00"),
            "total_value": 1200.5,
            "currency": "EUR",
            "billing_provider": "mock",
            "created_at": "2025-01-01T10:00:00.123456",
            "updated_at": "2025-01-01T10:00:00.123456",
        }))
        .unwrap()
    }

    #[test]
    fn follows_transition_table() {
        use Status as S;

        assert!(S::Active.can_transition_to(S::Upgraded));
        assert!(S::Active.can_transition_to(S::Downgraded));
        assert!(S::Active.can_transition_to(S::Expired));
        assert!(S::Active.can_transition_to(S::Cancelled));
        assert!(!S::Active.can_transition_to(S::Lost));
        assert!(!S::Active.can_transition_to(S::Active));

        for s in [S::Upgraded, S::Downgraded, S::Expired] {
            assert_eq!(s.successors(), [S::Cancelled]);
        }
        assert!(S::Cancelled.is_terminal());
        assert!(S::Lost.is_terminal());

        let err = S::Expired.transition_to(S::Active).unwrap_err();
        assert_eq!(err.to_string(), "cannot transition from expired to active");
    }

    #[test]
    fn renews_only_running_contracts_with_expiration() {
        assert!(contract(Status::Active, true).can_renew());
        assert!(contract(Status::Expired, true).can_renew());
        assert!(!contract(Status::Active, false).can_renew());
        assert!(!contract(Status::Cancelled, true).can_renew());
        assert!(!contract(Status::Upgraded, true).can_renew());
    }

    #[test]
    fn requires_expiration_after_activation() {
        let at = |s| DateTime::parse(s).unwrap();
        let now = at("2025-03-01T12:00:00Z");

        let activation = Activation {
            activation_date: Some(at("2025-01-01T00:00:00Z").coerce()),
            expiration_date: Some(at("2025-01-01T00:00:00Z").coerce()),
            ..Activation::default()
        };
        assert!(activation.check(now).is_err());

        let activation = Activation {
            expiration_date: Some(at("2025-02-01T00:00:00Z").coerce()),
            ..Activation::default()
        };
        assert!(activation.check(now).is_err(), "defaults to `now`");

        let activation = Activation {
            expiration_date: Some(at("2026-03-01T00:00:00Z").coerce()),
            ..Activation::default()
        };
        assert!(activation.check(now).is_ok());
        assert!(Activation::default().check(now).is_ok());
    }
}
