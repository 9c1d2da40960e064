//! [`Query`] definition.

pub mod calculate_price;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{
        contract::{self, invoice::Invoices},
        distributor::{self, Assignment},
        product::Duration,
    },
    infra::{
        api::{self, Resource},
        Api,
    },
    read::list::{Page, Selector},
    Service,
};

pub use self::calculate_price::CalculatePrice;

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

/// [`Query`] [`Select`]ing a `T`ype from the [`Api`].
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct ApiQuery<T>(T);

impl<W, B> ApiQuery<By<W, B>> {
    /// Creates a new [`ApiQuery`] selecting a `W` by the provided `B`.
    #[must_use]
    pub fn by(by: B) -> Self {
        Self(By::new(by))
    }
}

impl<A, W, B> Query<ApiQuery<By<W, B>>> for Service<A>
where
    A: Api<Select<By<W, B>>, Ok = W, Err = Traced<api::Error>>,
{
    type Ok = W;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        ApiQuery(by): ApiQuery<By<W, B>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.api()
            .execute(Select(by))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Queries a [`Resource`] by its ID.
pub type ById<R> = ApiQuery<By<Option<R>, <R as Resource>::Id>>;

/// Queries a [`Page`] of a [`Resource`]s list.
pub type List<R> = ApiQuery<By<Page<R>, Selector<<R as Resource>::Filter>>>;

/// Queries all the [`Duration`]s.
pub type Durations = ApiQuery<By<Vec<Duration>, ()>>;

/// Queries the [`Invoices`] of a [`Contract`].
///
/// [`Contract`]: crate::domain::Contract
pub type ContractInvoices = ApiQuery<By<Invoices, contract::Id>>;

/// Queries the [`Assignment`]s of a [`Distributor`].
///
/// [`Distributor`]: crate::domain::Distributor
pub type DistributorPartners = ApiQuery<By<Vec<Assignment>, distributor::Id>>;
