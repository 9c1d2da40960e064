//! [`Command`] for changing the status of a [`Stateful`] resource.

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        status::{self, Change, Lifecycle as _, Stateful},
        Contract, Lead, Order,
    },
    infra::{
        api::{self, Patched},
        Api,
    },
    Service,
};

use super::Command;

/// [`Command`] for changing the status of a [`Stateful`] resource.
///
/// The transition is checked against the [`Lifecycle`] of the current status
/// before being sent to the API.
///
/// [`Lifecycle`]: status::Lifecycle
#[derive(Clone, Debug)]
pub struct TransitionStatus<R: Stateful> {
    /// ID of the resource to change the status of.
    pub id: R::Id,

    /// Requested status.
    pub status: R::Status,

    /// Reason of the change.
    pub reason: Option<String>,
}

/// [`TransitionStatus`] of a [`Contract`].
pub type TransitionContractStatus = TransitionStatus<Contract>;

/// [`TransitionStatus`] of an [`Order`].
pub type TransitionOrderStatus = TransitionStatus<Order>;

/// [`TransitionStatus`] of a [`Lead`].
pub type TransitionLeadStatus = TransitionStatus<Lead>;

impl<A, R> Command<TransitionStatus<R>> for Service<A>
where
    R: Stateful,
    A: Api<
            Select<By<Option<R>, R::Id>>,
            Ok = Option<R>,
            Err = Traced<api::Error>,
        > + Api<Update<Patched<Change<R>>>, Ok = R, Err = Traced<api::Error>>,
{
    type Ok = R;
    type Err = Traced<ExecutionError<R>>;

    async fn execute(
        &self,
        cmd: TransitionStatus<R>,
    ) -> Result<Self::Ok, Self::Err> {
        let TransitionStatus { id, status, reason } = cmd;

        let current = self
            .api()
            .execute(Select(By::<Option<R>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError<R>))?
            .ok_or(ExecutionError::NotExists(id))
            .map_err(tracerr::wrap!())?;

        let status = current
            .status()
            .transition_to(status)
            .map_err(tracerr::from_and_wrap!(=> ExecutionError<R>))?;

        self.api()
            .execute(Update(Patched {
                id: current.id(),
                patch: Change::new(status, reason),
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError<R>))
    }
}

/// Error of [`TransitionStatus`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError<R: Stateful> {
    /// [`Api`] error.
    #[display("`Api` operation failed: {_0}")]
    Api(api::Error),

    /// Requested transition is not allowed.
    #[display("Status change rejected: {_0}")]
    Forbidden(status::Forbidden<R::Status>),

    /// Resource with the provided ID does not exist.
    #[display("`{}(id: {_0})` does not exist", R::PATH)]
    #[from(ignore)]
    NotExists(#[error(not(source))] R::Id),
}
