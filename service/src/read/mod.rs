//! Read models definitions.

pub mod list;
