//! [`Session`] definitions.

use std::fmt;

use common::define_kind;
use derive_more::{AsRef, Display};
use secrecy::{zeroize::Zeroize, CloneableSecret, ExposeSecret as _, SecretBox};
use serde::{Deserialize, Deserializer};

/// Authenticated session of a console user.
#[derive(Clone, Debug)]
pub struct Session {
    /// Bearer [`Token`] attached to every request.
    pub token: SecretBox<Token>,

    /// [`Kind`] of the authenticated user.
    pub kind: Option<Kind>,
}

impl Session {
    /// Creates a new [`Session`] out of the provided [`Token`].
    #[must_use]
    pub fn new(token: Token, kind: Option<Kind>) -> Self {
        Self {
            token: SecretBox::new(Box::new(token)),
            kind,
        }
    }

    /// Returns the value of the `Authorization` header authenticating this
    /// [`Session`].
    #[must_use]
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.token.expose_secret())
    }
}

impl From<Grant> for Session {
    fn from(grant: Grant) -> Self {
        Self {
            token: grant.access_token,
            kind: Some(grant.user_type),
        }
    }
}

/// Access token of a [`Session`].
#[derive(AsRef, Clone, Display, Eq, PartialEq)]
#[as_ref(str)]
pub struct Token(String);

impl Token {
    /// Creates a new [`Token`] if the given `token` is not blank.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into().trim().to_owned();
        (!token.is_empty()).then_some(Self(token))
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

impl CloneableSecret for Token {}
impl Zeroize for Token {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

define_kind! {
    #[doc = "Kind of an authenticated user."]
    enum Kind {
        #[doc = "Platform administrator."]
        Admin = 1,

        #[doc = "Partner or distributor user."]
        User = 2,
    }
}

/// Response of a successful login.
#[derive(Clone, Debug, Deserialize)]
pub struct Grant {
    /// Issued [`Token`].
    #[serde(deserialize_with = "deserialize_token")]
    pub access_token: SecretBox<Token>,

    /// Type of the issued [`Token`] (`bearer`).
    #[serde(default)]
    pub token_type: Option<String>,

    /// Number of seconds the issued [`Token`] is valid for.
    pub expires_in: u64,

    /// [`Kind`] of the logged in user.
    pub user_type: Kind,
}

/// Deserializes a non-blank [`Token`] straight into a [`SecretBox`].
fn deserialize_token<'de, D>(d: D) -> Result<SecretBox<Token>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(d)?;
    Token::new(raw)
        .map(|t| SecretBox::new(Box::new(t)))
        .ok_or_else(|| serde::de::Error::custom("blank access token"))
}
