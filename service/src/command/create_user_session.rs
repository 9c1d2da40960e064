//! [`Command`] for creating a [`Session`].

use std::time::Duration;

use common::operations::Perform;
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::user::Session;
use crate::{
    domain::user::{
        session::{self, Grant},
        Credentials,
    },
    infra::{
        api::{self, Login},
        Api,
    },
    Service,
};

use super::Command;

/// [`Command`] for creating a [`Session`] by [`Credentials`].
///
/// The created [`Session`] is stored by the [`Api`], so the following calls
/// are authenticated with it.
#[derive(Clone, Debug)]
pub struct CreateUserSession {
    /// [`Credentials`] to log in with.
    pub credentials: Credentials,
}

/// Output of [`CreateUserSession`] [`Command`].
#[derive(Clone, Copy, Debug)]
pub struct Output {
    /// [`session::Kind`] of the logged in user.
    pub kind: session::Kind,

    /// [`Duration`] the created [`Session`] is valid for.
    pub expires_in: Duration,
}

impl<A> Command<CreateUserSession> for Service<A>
where
    A: Api<Perform<Login>, Ok = Grant, Err = Traced<api::Error>>,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateUserSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let grant = match self
            .api()
            .execute(Perform(Login(cmd.credentials)))
            .await
        {
            Err(e) if matches!(e.as_ref(), api::Error::Unauthorized { .. }) => {
                return Err(tracerr::new!(E::WrongCredentials));
            }
            res => res.map_err(tracerr::map_from_and_wrap!(=> E))?,
        };

        Ok(Output {
            kind: grant.user_type,
            expires_in: Duration::from_secs(grant.expires_in),
        })
    }
}

/// Error of [`CreateUserSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Api`] error.
    #[display("`Api` operation failed: {_0}")]
    Api(api::Error),

    /// [`CreateUserSession`] contains wrong [`Credentials`].
    #[display("Wrong user credentials")]
    WrongCredentials,
}
