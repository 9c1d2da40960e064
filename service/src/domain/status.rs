//! Status lifecycles of stateful resources.

use std::{fmt, marker::PhantomData};

use derive_more::{Display, Error};
use serde::Serialize;

use crate::infra::api;

/// Status of some resource moving through a fixed set of transitions.
pub trait Lifecycle:
    Copy + Eq + fmt::Debug + fmt::Display + 'static
{
    /// Returns the statuses this one may be directly changed to.
    fn successors(self) -> &'static [Self];

    /// Indicates whether this status may be directly changed to the `next`
    /// one.
    fn can_transition_to(self, next: Self) -> bool {
        self.successors().contains(&next)
    }

    /// Indicates whether this status can't be changed anymore.
    fn is_terminal(self) -> bool {
        self.successors().is_empty()
    }

    /// Checks whether this status may be directly changed to the `next` one.
    ///
    /// # Errors
    ///
    /// If the transition is not allowed.
    fn transition_to(self, next: Self) -> Result<Self, Forbidden<Self>> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(Forbidden {
                from: self,
                to: next,
            })
        }
    }
}

/// Resource having a [`Lifecycle`] status.
pub trait Stateful: api::Resource + fmt::Debug {
    /// [`Lifecycle`] status of this resource.
    type Status: Lifecycle + Serialize;

    /// Returns the current status of this resource.
    fn status(&self) -> Self::Status;

    /// Returns the ID of this resource.
    fn id(&self) -> Self::Id;
}

/// Transition between two [`Lifecycle`] statuses not allowed.
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
#[display("cannot transition from {from} to {to}")]
pub struct Forbidden<S: Lifecycle> {
    /// Current status.
    pub from: S,

    /// Requested status.
    pub to: S,
}

/// Request body changing the status of a [`Stateful`] resource.
#[derive(Clone, Debug, Serialize)]
#[serde(bound = "")]
pub struct Change<R: Stateful> {
    /// Status to change to.
    pub status: R::Status,

    /// Reason of the change, recorded in the status history.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Type of the resource whose status is changed.
    #[serde(skip)]
    _resource: PhantomData<R>,
}

impl<R: Stateful> Change<R> {
    /// Creates a new [`Change`] to the provided `status`.
    #[must_use]
    pub fn new(status: R::Status, reason: Option<String>) -> Self {
        Self {
            status,
            reason,
            _resource: PhantomData,
        }
    }
}

impl<R: Stateful> api::Patch for Change<R> {
    type Resource = R;

    fn path(id: &R::Id) -> String {
        format!("{}/{id}/status", R::PATH)
    }
}
