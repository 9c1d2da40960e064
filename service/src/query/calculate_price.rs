//! [`Query`] for pricing a [`Product`].

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        product::{
            self, duration,
            pricing::{self, Quote, QuoteError},
            Duration,
        },
        Product,
    },
    infra::{api, Api},
    Service,
};

use super::Query;

/// [`Query`] for pricing some quantity of a [`Product`], optionally
/// committed for some [`Duration`].
#[derive(Clone, Copy, Debug)]
pub struct CalculatePrice {
    /// ID of the [`Product`] to price.
    pub product_id: product::Id,

    /// Quantity to price.
    pub quantity: u32,

    /// ID of the [`Duration`] to apply the discount of, if any.
    pub duration_id: Option<duration::Id>,
}

impl<A> Query<CalculatePrice> for Service<A>
where
    A: Api<
            Select<By<Option<Product>, product::Id>>,
            Ok = Option<Product>,
            Err = Traced<api::Error>,
        > + Api<
            Select<By<Vec<Duration>, ()>>,
            Ok = Vec<Duration>,
            Err = Traced<api::Error>,
        >,
{
    type Ok = Quote;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        query: CalculatePrice,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CalculatePrice {
            product_id,
            quantity,
            duration_id,
        } = query;

        let product = self
            .api()
            .execute(Select(By::<Option<Product>, _>::new(product_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ProductNotExists(product_id))
            .map_err(tracerr::wrap!())?;

        let duration = match duration_id {
            Some(id) => Some(
                self.api()
                    .execute(Select(By::<Vec<Duration>, _>::new(())))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?
                    .into_iter()
                    .find(|d| d.id == id)
                    .ok_or(E::DurationNotExists(id))
                    .map_err(tracerr::wrap!())?,
            ),
            None => None,
        };

        pricing::quote(&product, quantity, duration.as_ref())
            .map_err(tracerr::from_and_wrap!(=> E))
    }
}

/// Error of [`CalculatePrice`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Api`] error.
    #[display("`Api` operation failed: {_0}")]
    Api(api::Error),

    /// [`Duration`] with the provided ID does not exist.
    #[display("`Duration(id: {_0})` does not exist")]
    #[from(ignore)]
    DurationNotExists(#[error(not(source))] duration::Id),

    /// [`Product`] with the provided ID does not exist.
    #[display("`Product(id: {_0})` does not exist")]
    #[from(ignore)]
    ProductNotExists(#[error(not(source))] product::Id),

    /// [`Product`] can't be priced.
    #[display("Failed to price `Product`: {_0}")]
    Quote(QuoteError),
}
