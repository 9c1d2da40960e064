//! [`Credentials`] of a console user.

pub mod session;

use std::{fmt, str::FromStr};

use derive_more::{AsRef, Display};
use secrecy::{zeroize::Zeroize, CloneableSecret, ExposeSecret as _, SecretBox};
use serde::{Serialize, Serializer};

pub use self::session::Session;

/// Username and [`Password`] pair exchanged for a [`Session`].
#[derive(Clone, Debug)]
pub struct Credentials {
    /// [`Username`] to log in as.
    pub username: Username,

    /// [`Password`] of the [`Username`].
    pub password: SecretBox<Password>,
}

impl Credentials {
    /// Creates new [`Credentials`].
    #[must_use]
    pub fn new(username: Username, password: Password) -> Self {
        Self {
            username,
            password: SecretBox::new(Box::new(password)),
        }
    }
}

impl Serialize for Credentials {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        /// Wire representation of [`Credentials`].
        #[derive(Serialize)]
        struct Body<'a> {
            username: &'a str,
            password: &'a str,
        }

        Body {
            username: self.username.as_ref(),
            password: &self.password.expose_secret().0,
        }
        .serialize(s)
    }
}

/// Login of a console user.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Username(String);

impl Username {
    /// Creates a new [`Username`] if the given `username` is valid.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Option<Self> {
        let username = username.into();
        Self::check(&username).then_some(Self(username))
    }

    /// Checks whether the given `username` is a valid [`Username`].
    fn check(username: impl AsRef<str>) -> bool {
        let username = username.as_ref();
        username.trim() == username
            && !username.is_empty()
            && username.chars().count() <= 100
    }
}

impl FromStr for Username {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Username`")
    }
}

/// Password of a console user.
#[derive(Clone, Eq, PartialEq)]
pub struct Password(String);

impl Password {
    /// Creates a new [`Password`] if the given `password` is not empty.
    #[must_use]
    pub fn new(password: impl Into<String>) -> Option<Self> {
        let password = password.into();
        (!password.is_empty()).then_some(Self(password))
    }
}

impl FromStr for Password {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Password`")
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

impl CloneableSecret for Password {}
impl Zeroize for Password {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

#[cfg(test)]
mod spec {
    use super::{Credentials, Password, Username};

    #[test]
    fn validates_username() {
        assert!(Username::new("admin").is_some());
        assert!(Username::new(" admin").is_none());
        assert!(Username::new("").is_none());
        assert!(Username::new("a".repeat(101)).is_none());
    }

    #[test]
    fn serializes_exposed_credentials_only_on_wire() {
        let creds = Credentials::new(
            Username::new("admin").unwrap(),
            Password::new("hunter2").unwrap(),
        );

        assert!(!format!("{creds:?}").contains("hunter2"));
        assert_eq!(
            serde_json::to_value(&creds).unwrap(),
            serde_json::json!({ "username": "admin", "password": "hunter2" }),
        );
    }
}
