//! Login and logout.

use serde_json::{json, Value};
use service::{
    command::{self, Command as _},
    domain::user::{Credentials, Password, Username},
};
use tracing as log;

use crate::{define_error, AsError, Error, Service};

/// Logs in as the provided user.
pub(super) async fn login(
    svc: &Service,
    username: Username,
    password: Password,
) -> Result<Value, Error> {
    let output = svc
        .execute(command::CreateUserSession {
            credentials: Credentials::new(username, password),
        })
        .await
        .map_err(AsError::into_error)?;

    log::info!(kind = %output.kind, "logged in");
    Ok(json!({
        "user_type": output.kind,
        "expires_in": output.expires_in.as_secs(),
    }))
}

/// Forgets the stored session.
pub(super) async fn logout(svc: &Service) -> Result<Value, Error> {
    svc.execute(command::DeleteUserSession)
        .await
        .map_err(AsError::into_error)?;

    log::info!("logged out");
    Ok(json!({ "logged_out": true }))
}

impl AsError for command::create_user_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "WRONG_CREDENTIALS"]
                #[exit = NotAuthenticated]
                #[message = "Provided credentials do not match any user"]
                WrongCredentials,
            }
        }

        match self {
            Self::Api(e) => e.try_as_error(),
            Self::WrongCredentials => Some(Error::WrongCredentials.into()),
        }
    }
}
