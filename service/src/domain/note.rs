//! [`Note`] definitions.

use common::{unit, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{Contract, Lead, Order},
    infra::api::{Create, Resource},
};

/// Free-form note attached to an [`Annotated`] resource.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Note {
    /// ID of this [`Note`].
    pub id: Id,

    /// Text of this [`Note`].
    pub content: String,

    /// Indicator whether this [`Note`] is hidden from customers.
    #[serde(default)]
    pub is_internal: bool,

    /// Indicator whether this [`Note`] is pinned on top.
    #[serde(default)]
    pub is_pinned: bool,

    /// [`DateTime`] when this [`Note`] was created.
    ///
    /// [`DateTime`]: common::DateTime
    pub created_at: DateTimeOf<(Note, unit::Creation)>,
}

/// ID of a [`Note`].
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

/// [`Resource`] accepting [`Note`]s.
pub trait Annotated: Resource {}

impl Annotated for Contract {}
impl Annotated for Lead {}
impl Annotated for Order {}

/// Request body attaching a new [`Note`] to an `R`.
#[derive(Clone, Debug, Serialize)]
#[serde(bound = "")]
pub struct New<R: Annotated> {
    /// ID of the annotated `R`.
    #[serde(skip)]
    pub target: R::Id,

    /// Text of the new [`Note`].
    pub content: String,

    /// Indicator whether the new [`Note`] is hidden from customers.
    pub is_internal: bool,

    /// Indicator whether the new [`Note`] is pinned on top.
    pub is_pinned: bool,
}

impl<R: Annotated> New<R> {
    /// Creates a new public unpinned [`Note`] of the `target` `R`.
    ///
    /// [`None`] is returned if the `content` is blank.
    #[must_use]
    pub fn new(target: R::Id, content: impl Into<String>) -> Option<Self> {
        let content = content.into().trim().to_owned();
        (!content.is_empty()).then_some(Self {
            target,
            content,
            is_internal: false,
            is_pinned: false,
        })
    }
}

impl<R: Annotated> Create for New<R> {
    type Resource = Note;

    fn path(&self) -> String {
        format!("{}/{}/notes", R::PATH, self.target)
    }
}

#[cfg(test)]
mod spec {
    use serde_json::json;

    use crate::{
        domain::{order, Order},
        infra::api::Create as _,
    };

    use super::New;

    const ORDER_ID: &str = "0b7c3f0e-8d4a-4f5e-9a51-2f1b6c1e9d01";

    #[test]
    fn posts_to_annotated_resource() {
        let id: order::Id = ORDER_ID.parse().unwrap();
        let mut note = New::<Order>::new(id, "  Call back on Monday ").unwrap();
        note.is_pinned = true;

        assert_eq!(note.path(), format!("/orders/{ORDER_ID}/notes"));
        assert_eq!(
            serde_json::to_value(&note).unwrap(),
            json!({
                "content": "Call back on Monday",
                "is_internal": false,
                "is_pinned": true,
            }),
        );
    }

    #[test]
    fn rejects_blank_content() {
        let id: order::Id = ORDER_ID.parse().unwrap();

        assert!(New::<Order>::new(id, " \n ").is_none());
    }
}
