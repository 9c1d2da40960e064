//! [`ListResponse`] definitions.

use common::pagination::PageInfo;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::read::list::Page;

/// Body of a list response, as returned by the [`Api`].
///
/// Endpoints return either a bare array of records or an envelope wrapping
/// the records with pagination metadata.
///
/// [`Api`]: super::Api
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ListResponse<T> {
    /// Bare array of records.
    Bare(Vec<T>),

    /// Records wrapped with pagination metadata.
    Envelope {
        /// Wrapped records.
        items: Vec<T>,

        /// Pagination metadata, if it's recognizable.
        pagination: Option<PageInfo>,
    },

    /// Neither an array nor an envelope with an `items` array.
    Unrecognized,
}

impl<T: DeserializeOwned> ListResponse<T> {
    /// Decodes a [`ListResponse`] from the provided JSON `body`.
    ///
    /// # Errors
    ///
    /// If the `body` is not JSON, or if the records of a recognized shape
    /// can't be decoded.
    pub fn decode(body: &[u8]) -> Result<Self, serde_json::Error> {
        Self::from_value(serde_json::from_slice(body)?)
    }

    /// Decodes a [`ListResponse`] from the provided JSON [`Value`].
    ///
    /// # Errors
    ///
    /// If the records of a recognized shape can't be decoded.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        match value {
            Value::Array(_) => serde_json::from_value(value).map(Self::Bare),
            Value::Object(mut envelope) => match envelope.remove("items") {
                Some(items @ Value::Array(_)) => Ok(Self::Envelope {
                    items: serde_json::from_value(items)?,
                    pagination: envelope
                        .remove("pagination")
                        .and_then(|p| serde_json::from_value(p).ok()),
                }),
                Some(_) | None => Ok(Self::Unrecognized),
            },
            Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::String(_) => Ok(Self::Unrecognized),
        }
    }
}

impl<T> ListResponse<T> {
    /// Returns the records of this [`ListResponse`], empty if it's
    /// [`ListResponse::Unrecognized`].
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Envelope { items, .. } => items,
            Self::Unrecognized => Vec::new(),
        }
    }

    /// Converts this [`ListResponse`] into a [`Page`].
    #[must_use]
    pub fn into_page(self) -> Page<T> {
        match self {
            Self::Bare(items) => Page { items, info: None },
            Self::Envelope { items, pagination } => Page {
                items,
                info: pagination,
            },
            Self::Unrecognized => Page::default(),
        }
    }
}
