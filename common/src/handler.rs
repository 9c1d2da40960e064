//! [`Handler`] abstractions.

use std::future::Future;

/// Executable handler.
///
/// The same trait backs commands, queries and remote API calls, so a single
/// type may handle many different `Args` (one implementation per operation).
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
