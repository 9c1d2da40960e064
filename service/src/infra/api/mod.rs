//! [`Api`]-related definitions.

pub mod list;
#[cfg(feature = "rest")]
pub mod rest;

use std::{fmt, io};

use derive_more::{Display, Error as StdError, From};
use serde::{de::DeserializeOwned, Serialize};

use crate::domain::user::Credentials;

pub use self::list::ListResponse;
#[cfg(feature = "rest")]
pub use self::rest::Rest;

/// Remote PRM API operation.
pub use common::Handler as Api;

/// Resource exposed by the [`Api`] under its own path.
pub trait Resource: DeserializeOwned {
    /// ID of this [`Resource`].
    type Id: Copy + fmt::Debug + fmt::Display;

    /// Filter of this [`Resource`]s list.
    type Filter: Default + Serialize;

    /// Path of this [`Resource`]s collection, relative to the API prefix.
    const PATH: &'static str;
}

/// Request body creating something via the [`Api`].
pub trait Create: Serialize {
    /// What is created.
    type Resource: DeserializeOwned;

    /// Returns the path to `POST` this body to.
    fn path(&self) -> String;
}

/// Request body modifying an existing [`Resource`] via the [`Api`].
pub trait Patch: Serialize {
    /// Modified [`Resource`].
    type Resource: Resource;

    /// Returns the path to `PUT` this body to.
    fn path(id: &<Self::Resource as Resource>::Id) -> String {
        format!("{}/{id}", <Self::Resource as Resource>::PATH)
    }
}

/// [`Patch`] addressed to a specific [`Resource`].
pub struct Patched<P: Patch> {
    /// ID of the [`Resource`] to modify.
    pub id: <P::Resource as Resource>::Id,

    /// [`Patch`] to apply.
    pub patch: P,
}

impl<P: Patch + Clone> Clone for Patched<P> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            patch: self.patch.clone(),
        }
    }
}

impl<P: Patch + fmt::Debug> fmt::Debug for Patched<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Patched")
            .field("id", &self.id)
            .field("patch", &self.patch)
            .finish()
    }
}

/// Exchanging [`Credentials`] for a session.
#[derive(Clone, Debug)]
pub struct Login(pub Credentials);

/// Forgetting the current session.
#[derive(Clone, Copy, Debug)]
pub struct Logout;

/// [`Api`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Request couldn't be sent or its response couldn't be received.
    #[cfg(feature = "rest")]
    #[display("HTTP transport failed: {_0}")]
    Transport(reqwest::Error),

    /// Response body doesn't match the expected shape.
    #[display("Failed to decode API response: {_0}")]
    Decode(serde_json::Error),

    /// API responded with a non-successful status.
    #[display(
        "API responded with `{status}`: {}",
        Self::or_generic(message.as_deref()),
    )]
    #[from(ignore)]
    Status {
        /// HTTP status code of the response.
        status: u16,

        /// Message provided by the API, if any.
        message: Option<String>,
    },

    /// API rejected the credentials of the request.
    #[display(
        "Not authenticated: {}",
        Self::or_generic(message.as_deref()),
    )]
    #[from(ignore)]
    Unauthorized {
        /// Message provided by the API, if any.
        message: Option<String>,
    },

    /// Session couldn't be persisted.
    #[display("Failed to persist session: {_0}")]
    Persistence(io::Error),
}

impl Error {
    /// Returns the message provided by the API, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } | Self::Unauthorized { message } => {
                message.as_deref()
            }
            #[cfg(feature = "rest")]
            Self::Transport(_) => None,
            Self::Decode(_) | Self::Persistence(_) => None,
        }
    }

    /// Returns the HTTP status code the API responded with, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Unauthorized { .. } => Some(401),
            #[cfg(feature = "rest")]
            Self::Transport(_) => None,
            Self::Decode(_) | Self::Persistence(_) => None,
        }
    }

    /// Indicates whether the requested resource doesn't exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns the provided `message` or a generic fallback.
    fn or_generic(message: Option<&str>) -> &str {
        message.unwrap_or("no details provided")
    }
}

#[cfg(test)]
mod spec {
    use super::Error;

    #[test]
    fn displays_server_message_or_fallback() {
        let err = Error::Status {
            status: 400,
            message: Some("Product Backup is not active".to_owned()),
        };
        assert_eq!(
            err.to_string(),
            "API responded with `400`: Product Backup is not active",
        );
        assert_eq!(err.message(), Some("Product Backup is not active"));

        let err = Error::Unauthorized { message: None };
        assert_eq!(err.to_string(), "Not authenticated: no details provided");
        assert_eq!(err.status(), Some(401));
        assert!(!err.is_not_found());
    }
}
