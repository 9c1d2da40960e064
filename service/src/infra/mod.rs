//! Infrastructure layer.

pub mod api;

pub use self::api::Api;
#[cfg(feature = "rest")]
pub use self::api::rest::{self, Rest};
