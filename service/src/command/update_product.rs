//! [`Command`] for updating a [`Product`].

use common::operations::{By, Insert, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        product::{self, tier, Draft, PriceTier},
        Product,
    },
    infra::{
        api::{self, Patched},
        Api,
    },
    Service,
};

use super::Command;

/// [`Command`] for updating a [`Product`] and adding new [`PriceTier`]s to
/// it.
#[derive(Clone, Debug)]
pub struct UpdateProduct {
    /// ID of the [`Product`] to update.
    pub id: product::Id,

    /// Changes of the [`Product`] fields.
    pub patch: product::Patch,

    /// Draft of the [`Product`] [`PriceTier`]s, started from the persisted
    /// ones.
    ///
    /// Only [`PriceTier`]s not persisted yet are sent to the API.
    pub tiers: Option<Draft>,
}

impl<A> Command<UpdateProduct> for Service<A>
where
    A: Api<
            Select<By<Option<Product>, product::Id>>,
            Ok = Option<Product>,
            Err = Traced<api::Error>,
        > + Api<
            Update<Patched<product::Patch>>,
            Ok = Product,
            Err = Traced<api::Error>,
        > + Api<Insert<tier::New>, Ok = PriceTier, Err = Traced<api::Error>>,
{
    type Ok = Product;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateProduct) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateProduct { id, patch, tiers } = cmd;

        let mut product = if patch.is_empty() {
            self.api()
                .execute(Select(By::<Option<Product>, _>::new(id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::ProductNotExists(id))
                .map_err(tracerr::wrap!())?
        } else {
            self.api()
                .execute(Update(Patched { id, patch }))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
        };

        let added = tiers
            .map(Draft::into_tiers)
            .unwrap_or_default()
            .into_iter()
            .filter(|t| t.id.is_none());
        for tier in added {
            let tier = self
                .api()
                .execute(Insert(tier::New {
                    product_id: product.id,
                    tier,
                }))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            product.price_tiers.push(tier);
        }

        Ok(product)
    }
}

/// Error of [`UpdateProduct`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Api`] error.
    #[display("`Api` operation failed: {_0}")]
    Api(api::Error),

    /// [`Product`] with the provided ID does not exist.
    #[display("`Product(id: {_0})` does not exist")]
    #[from(ignore)]
    ProductNotExists(#[error(not(source))] product::Id),
}
