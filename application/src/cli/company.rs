//! Partners and distributors.

use serde::Serialize;
use serde_json::Value;
use service::{
    command::{self, Command as _},
    domain::{
        company::{self, Company},
        distributor, partner, Distributor, Partner,
    },
    infra::api::{self, Create, Resource},
    query::{self, Query as _},
};
use tracing as log;

use crate::{
    args::{self, CompanyId},
    config, define_error, AsError, Error, Service,
};

use super::{delete, get, json, list};

/// [`Resource`] described by [`Company`] details.
pub(super) trait Kind:
    Resource<Id: CompanyId, Filter = company::Filter> + Serialize
{
    /// Request body creating this [`Kind`].
    type New: Create<Resource = Self> + From<Company>;

    /// Request body modifying this [`Kind`].
    type Patch: api::Patch<Resource = Self> + From<company::Patch>;
}

impl Kind for Partner {
    type New = partner::New;
    type Patch = partner::Patch;
}

impl Kind for Distributor {
    type New = distributor::New;
    type Patch = distributor::Patch;
}

/// Runs the provided [`args::Companies`] operation upon `R`s.
pub(super) async fn run<R: Kind>(
    svc: &Service,
    cmd: args::Companies<R::Id>,
    conf: &config::List,
) -> Result<Value, Error> {
    use args::Companies as Cmd;

    match cmd {
        Cmd::List {
            page,
            inactive,
            search,
        } => {
            let filter = company::Filter {
                is_active: inactive.then_some(false),
                search,
            };
            list::<R>(svc, page, filter, conf).await
        }
        Cmd::Get { id } => get::<R>(svc, id).await,
        Cmd::Create(details) => {
            let created = svc
                .execute(command::CreateResource(R::New::from(new(details)?)))
                .await
                .map_err(AsError::into_error)?;
            log::info!(path = R::PATH, "company created");
            json(&created)
        }
        Cmd::Update {
            id,
            company,
            active,
        } => {
            let patch = R::Patch::from(patch(company, active));
            let updated = svc
                .execute(command::UpdateResource::new(id, patch))
                .await
                .map_err(AsError::into_error)?;
            json(&updated)
        }
        Cmd::Delete { id } => delete::<R>(svc, id).await,
    }
}

/// Runs the provided [`args::Distributors`] operation.
pub(super) async fn run_distributors(
    svc: &Service,
    cmd: args::Distributors,
    conf: &config::List,
) -> Result<Value, Error> {
    use args::Distributors as Cmd;

    match cmd {
        Cmd::Company(cmd) => run::<Distributor>(svc, cmd, conf).await,
        Cmd::Assign { id, partner, notes } => {
            let assignment = svc
                .execute(command::CreateResource(distributor::Assign {
                    distributor_id: id,
                    partner_id: partner,
                    notes,
                }))
                .await
                .map_err(AsError::into_error)?;
            log::info!(%id, %partner, "partner assigned");
            json(&assignment)
        }
        Cmd::Partners { id } => {
            let assigned = svc
                .execute(query::DistributorPartners::by(id))
                .await
                .map_err(AsError::into_error)?;
            json(&assigned)
        }
    }
}

/// Builds a new [`Company`] out of the provided [`args::Company`] details.
fn new(details: args::Company) -> Result<Company, Error> {
    define_error! {
        enum Error {
            #[code = "NAME_REQUIRED"]
            #[exit = Usage]
            #[message = "Company name is required"]
            NameRequired,
        }
    }

    let args::Company {
        name,
        legal_name,
        registration_number,
        email,
        phone,
        city,
        country,
    } = details;
    let name = name
        .map(|n| n.trim().to_owned())
        .filter(|n| !n.is_empty())
        .ok_or(Error::NameRequired)?;

    let default = Company::default();
    Ok(Company {
        name,
        legal_name,
        registration_number,
        email,
        phone,
        city,
        country: country.unwrap_or_else(|| default.country.clone()),
        ..default
    })
}

/// Builds a [`company::Patch`] out of the provided [`args::Company`] details.
fn patch(details: args::Company, active: Option<bool>) -> company::Patch {
    let args::Company {
        name,
        legal_name,
        registration_number,
        email,
        phone,
        city,
        country,
    } = details;
    company::Patch {
        name,
        legal_name,
        registration_number,
        email,
        phone,
        city,
        country,
        is_active: active,
        ..company::Patch::default()
    }
}
