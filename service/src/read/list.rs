//! Paginated lists definitions.

use common::pagination::{Arguments, PageInfo};
use serde::Serialize;

/// Page of a list of `T`s.
#[derive(Clone, Debug, Serialize)]
pub struct Page<T> {
    /// Items of this [`Page`].
    pub items: Vec<T>,

    /// Pagination metadata of this [`Page`], if the list is paginated.
    #[serde(rename = "pagination", skip_serializing_if = "Option::is_none")]
    pub info: Option<PageInfo>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            info: None,
        }
    }
}

/// Selector of a [`Page`] in a list filtered by `F`.
#[derive(Clone, Debug, Default)]
pub struct Selector<F> {
    /// Pagination [`Arguments`].
    pub arguments: Arguments,

    /// Filter of the list.
    pub filter: F,
}

impl<F> Selector<F> {
    /// Creates a new [`Selector`] of the first [`Page`] with the provided
    /// `page_size`, if it's valid.
    #[must_use]
    pub fn first(page_size: u32, filter: F) -> Option<Self> {
        Some(Self {
            arguments: Arguments::new(1, page_size)?,
            filter,
        })
    }
}
