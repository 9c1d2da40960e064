//! [`Order`] definitions.

use common::{define_kind, unit, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{distributor, lead, partner, product, status},
    infra::api::{self, Create},
};

/// Order of [`Product`]s placed for a [`Partner`] or a [`Distributor`].
///
/// [`Distributor`]: crate::domain::Distributor
/// [`Partner`]: crate::domain::Partner
/// [`Product`]: crate::domain::Product
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Order {
    /// ID of this [`Order`].
    pub id: Id,

    /// Human-readable number of this [`Order`].
    pub order_number: String,

    /// Current [`Status`] of this [`Order`].
    pub status: Status,

    /// ID of the [`Partner`] this [`Order`] is placed for, if any.
    ///
    /// [`Partner`]: crate::domain::Partner
    #[serde(default)]
    pub partner_id: Option<partner::Id>,

    /// ID of the [`Distributor`] this [`Order`] goes through, if any.
    ///
    /// [`Distributor`]: crate::domain::Distributor
    #[serde(default)]
    pub distributor_id: Option<distributor::Id>,

    /// ID of the [`Lead`] this [`Order`] originates from, if any.
    ///
    /// [`Lead`]: crate::domain::Lead
    #[serde(default)]
    pub lead_id: Option<lead::Id>,

    /// Sum of the [`Item`]s subtotals.
    pub subtotal: Decimal,

    /// Sum of the [`Item`]s discounts.
    pub discount_amount: Decimal,

    /// Applied tax.
    pub tax_amount: Decimal,

    /// Amount to be paid.
    pub total_amount: Decimal,

    /// Internal notes.
    #[serde(default)]
    pub notes_internal: Option<String>,

    /// Ordered [`Item`]s, present in detailed responses only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Item>,

    /// [`DateTime`] when this [`Order`] was created.
    ///
    /// [`DateTime`]: common::DateTime
    pub created_at: DateTimeOf<(Order, unit::Creation)>,

    /// [`DateTime`] when this [`Order`] was last modified.
    ///
    /// [`DateTime`]: common::DateTime
    pub updated_at: DateTimeOf<(Order, unit::Modification)>,

    /// [`DateTime`] when this [`Order`] was cancelled, if it was.
    ///
    /// [`DateTime`]: common::DateTime
    #[serde(default)]
    pub cancelled_at: Option<DateTimeOf<(Order, unit::Cancellation)>>,
}

impl Order {
    /// Indicates whether this [`Order`] may be activated into a [`Contract`].
    ///
    /// [`Contract`]: crate::domain::Contract
    #[must_use]
    pub fn can_activate(&self) -> bool {
        self.status == Status::Fulfilled
    }
}

/// ID of an [`Order`].
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

/// Priced line of an [`Order`].
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Item {
    /// ID of the ordered [`Product`].
    ///
    /// [`Product`]: crate::domain::Product
    pub product_id: product::Id,

    /// ID of the committed [`Duration`].
    ///
    /// [`Duration`]: crate::domain::product::Duration
    pub duration_id: product::duration::Id,

    /// Ordered quantity.
    pub quantity: u32,

    /// Price of a single unit.
    pub unit_price: Decimal,

    /// Discount of the committed [`Duration`].
    ///
    /// [`Duration`]: crate::domain::product::Duration
    pub discount_percentage: Decimal,

    /// Amount to be paid for this [`Item`].
    pub total: Decimal,
}

define_kind! {
    #[doc = "Status of an [`Order`]."]
    enum Status {
        #[doc = "[`Order`] is being prepared."]
        Created = 1,

        #[doc = "[`Order`] was sent to the customer."]
        Sent = 2,

        #[doc = "[`Order`] was accepted and is being delivered."]
        InFulfillment = 3,

        #[doc = "[`Order`] was delivered."]
        Fulfilled = 4,

        #[doc = "[`Order`] was abandoned."]
        Cancelled = 5,
    }
}

impl status::Lifecycle for Status {
    fn successors(self) -> &'static [Self] {
        match self {
            Self::Created => &[Self::Sent, Self::Cancelled],
            Self::Sent => &[Self::InFulfillment, Self::Cancelled],
            Self::InFulfillment => &[Self::Fulfilled, Self::Cancelled],
            Self::Fulfilled | Self::Cancelled => &[],
        }
    }
}

impl status::Stateful for Order {
    type Status = Status;

    fn status(&self) -> Status {
        self.status
    }

    fn id(&self) -> Id {
        self.id
    }
}

/// Request body creating a new [`Order`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct New {
    /// ID of the [`Partner`] to place the [`Order`] for.
    ///
    /// [`Partner`]: crate::domain::Partner
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<partner::Id>,

    /// ID of the [`Distributor`] to place the [`Order`] through.
    ///
    /// [`Distributor`]: crate::domain::Distributor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distributor_id: Option<distributor::Id>,

    /// ID of the [`Lead`] the [`Order`] originates from.
    ///
    /// [`Lead`]: crate::domain::Lead
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<lead::Id>,

    /// Internal notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes_internal: Option<String>,

    /// Lines to order, priced by the API.
    pub items: Vec<NewItem>,
}

/// Line of a [`New`] [`Order`].
#[derive(Clone, Copy, Debug, Serialize)]
pub struct NewItem {
    /// ID of the [`Product`] to order.
    ///
    /// [`Product`]: crate::domain::Product
    pub product_id: product::Id,

    /// ID of the [`Duration`] to commit for.
    ///
    /// [`Duration`]: crate::domain::product::Duration
    pub duration_id: product::duration::Id,

    /// Quantity to order.
    pub quantity: u32,
}

impl Create for New {
    type Resource = Order;

    fn path(&self) -> String {
        <Order as api::Resource>::PATH.to_owned()
    }
}

/// Filter of an [`Order`]s list.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct Filter {
    /// [`Status`] to list [`Order`]s in.
    #[serde(rename = "status_filter", skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl api::Resource for Order {
    type Id = Id;
    type Filter = Filter;

    const PATH: &'static str = "/orders";
}

#[cfg(test)]
mod spec {
    use crate::domain::status::Lifecycle as _;

    use super::{Filter, Status};

    #[test]
    fn follows_transition_table() {
        use Status as S;

        assert_eq!(S::Created.successors(), [S::Sent, S::Cancelled]);
        assert_eq!(S::Sent.successors(), [S::InFulfillment, S::Cancelled]);
        assert_eq!(
            S::InFulfillment.successors(),
            [S::Fulfilled, S::Cancelled],
        );
        assert!(S::Fulfilled.is_terminal());
        assert!(S::Cancelled.is_terminal());
        assert!(!S::Created.can_transition_to(S::Fulfilled));
    }

    #[test]
    fn filters_by_status_in_snake_case() {
        let filter = Filter {
            status: Some(Status::InFulfillment),
        };
        assert_eq!(
            serde_json::to_value(filter).unwrap(),
            serde_json::json!({ "status_filter": "in_fulfillment" }),
        );
    }
}
