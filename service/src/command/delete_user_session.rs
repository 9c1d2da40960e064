//! [`Command`] for deleting the current [`Session`].

use common::operations::Perform;
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::user::Session;
use crate::{
    infra::{
        api::{self, Logout},
        Api,
    },
    Service,
};

use super::Command;

/// [`Command`] for forgetting the current [`Session`] locally.
#[derive(Clone, Copy, Debug)]
pub struct DeleteUserSession;

impl<A> Command<DeleteUserSession> for Service<A>
where
    A: Api<Perform<Logout>, Ok = (), Err = Traced<api::Error>>,
{
    type Ok = ();
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        DeleteUserSession: DeleteUserSession,
    ) -> Result<Self::Ok, Self::Err> {
        self.api()
            .execute(Perform(Logout))
            .await
            .map_err(tracerr::wrap!())
    }
}
