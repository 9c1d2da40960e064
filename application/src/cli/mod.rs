//! Console operations over the [`Service`].

mod company;
mod contract;
mod lead;
mod order;
mod product;
mod session;

use serde::Serialize;
use serde_json::Value;
use service::{
    command::{self, Command as _},
    domain::{note, Partner},
    infra::api::Resource,
    query::{self, Query as _},
    read::list::Selector,
};
use tracing as log;

use crate::{
    args::{self, Command},
    config, define_error, AsError, Error, Service,
};

define_error! {
    enum ResourceError {
        #[code = "NOT_FOUND"]
        #[exit = NotFound]
        #[message = "Requested resource does not exist"]
        NotFound,

        #[code = "NOTE_REQUIRED"]
        #[exit = Usage]
        #[message = "Note content must not be blank"]
        NoteRequired,
    }
}

/// Runs the provided [`Command`], returning its JSON output.
///
/// # Errors
///
/// If the [`Command`] failed.
pub async fn run(
    svc: &Service,
    cmd: Command,
    conf: &config::List,
) -> Result<Value, Error> {
    match cmd {
        Command::Login { username, password } => {
            session::login(svc, username, password).await
        }
        Command::Logout => session::logout(svc).await,
        Command::Products(cmd) => product::run(svc, cmd, conf).await,
        Command::Tiers(args::Tiers::Check { tiers }) => product::check(tiers),
        Command::ProductTypes(cmd) => product::run_types(svc, cmd, conf).await,
        Command::Contracts(cmd) => contract::run(svc, cmd, conf).await,
        Command::Orders(cmd) => order::run(svc, cmd, conf).await,
        Command::Partners(cmd) => {
            company::run::<Partner>(svc, cmd, conf).await
        }
        Command::Distributors(cmd) => {
            company::run_distributors(svc, cmd, conf).await
        }
        Command::Leads(cmd) => lead::run(svc, cmd, conf).await,
    }
}

/// Renders the provided `value` as JSON.
fn json(value: &impl Serialize) -> Result<Value, Error> {
    serde_json::to_value(value).map_err(|e| Error::internal(&e))
}

/// Lists a page of `R`s filtered by the provided `filter`.
async fn list<R>(
    svc: &Service,
    page: args::Page,
    filter: R::Filter,
    conf: &config::List,
) -> Result<Value, Error>
where
    R: Resource + Serialize,
{
    let arguments = page.arguments(conf)?;
    let page = svc
        .execute(query::List::<R>::by(Selector { arguments, filter }))
        .await
        .map_err(AsError::into_error)?;
    log::debug!(items = page.items.len(), path = R::PATH, "listed");
    json(&page)
}

/// Shows an `R` by its ID.
async fn get<R>(svc: &Service, id: R::Id) -> Result<Value, Error>
where
    R: Resource + Serialize,
{
    let found = svc
        .execute(query::ById::<R>::by(id))
        .await
        .map_err(AsError::into_error)?
        .ok_or_else(|| Error::from(ResourceError::NotFound))?;
    json(&found)
}

/// Deletes an `R` by its ID.
async fn delete<R: Resource>(svc: &Service, id: R::Id) -> Result<Value, Error> {
    svc.execute(command::DeleteResource::<R>::new(id))
        .await
        .map_err(AsError::into_error)?;
    Ok(serde_json::json!({ "deleted": id.to_string() }))
}

/// Attaches the provided [`args::Note`] to an `R`.
async fn note<R>(
    svc: &Service,
    id: R::Id,
    input: args::Note,
) -> Result<Value, Error>
where
    R: note::Annotated,
{
    let args::Note {
        content,
        internal,
        pinned,
    } = input;
    let mut new = note::New::<R>::new(id, content)
        .ok_or_else(|| Error::from(ResourceError::NoteRequired))?;
    new.is_internal = internal;
    new.is_pinned = pinned;

    let created = svc
        .execute(command::CreateResource(new))
        .await
        .map_err(AsError::into_error)?;
    log::info!(path = R::PATH, %id, "note attached");
    json(&created)
}
