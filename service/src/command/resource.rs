//! Generic [`Command`]s upon any [`Resource`].

use common::operations::{By, Delete, Insert, Update};
use tracerr::Traced;

use crate::{
    infra::{
        api::{self, Create, Patch, Patched, Resource},
        Api,
    },
    Service,
};

use super::Command;

/// [`Command`] for creating something by its [`Create`] request body.
#[derive(Clone, Debug)]
pub struct CreateResource<C>(pub C);

impl<A, C> Command<CreateResource<C>> for Service<A>
where
    C: Create,
    A: Api<Insert<C>, Ok = C::Resource, Err = Traced<api::Error>>,
{
    type Ok = C::Resource;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        CreateResource(body): CreateResource<C>,
    ) -> Result<Self::Ok, Self::Err> {
        self.api()
            .execute(Insert(body))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// [`Command`] for modifying an existing [`Resource`] by a [`Patch`].
#[derive(Clone, Debug)]
pub struct UpdateResource<P: Patch>(pub Patched<P>);

impl<P: Patch> UpdateResource<P> {
    /// Creates a new [`UpdateResource`] applying the `patch` to the
    /// [`Resource`] with the provided `id`.
    #[must_use]
    pub fn new(id: <P::Resource as Resource>::Id, patch: P) -> Self {
        Self(Patched { id, patch })
    }
}

impl<A, P> Command<UpdateResource<P>> for Service<A>
where
    P: Patch,
    A: Api<Update<Patched<P>>, Ok = P::Resource, Err = Traced<api::Error>>,
{
    type Ok = P::Resource;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        UpdateResource(patched): UpdateResource<P>,
    ) -> Result<Self::Ok, Self::Err> {
        self.api()
            .execute(Update(patched))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// [`Command`] for deleting a [`Resource`] by its ID.
#[derive(Clone, Copy, Debug)]
pub struct DeleteResource<R: Resource>(By<R, R::Id>);

impl<R: Resource> DeleteResource<R> {
    /// Creates a new [`DeleteResource`] of the [`Resource`] with the provided
    /// `id`.
    #[must_use]
    pub fn new(id: R::Id) -> Self {
        Self(By::new(id))
    }
}

impl<A, R> Command<DeleteResource<R>> for Service<A>
where
    R: Resource,
    A: Api<Delete<By<R, R::Id>>, Ok = (), Err = Traced<api::Error>>,
{
    type Ok = ();
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        DeleteResource(by): DeleteResource<R>,
    ) -> Result<Self::Ok, Self::Err> {
        self.api()
            .execute(Delete(by))
            .await
            .map_err(tracerr::wrap!())
    }
}
