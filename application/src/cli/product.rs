//! Products, their price tiers and types.

use serde_json::Value;
use service::{
    command::{self, Command as _},
    domain::{
        product::{self, tier, Draft},
        product_type, Product, ProductType,
    },
    query::{self, calculate_price, Query as _},
};
use tracing as log;

use crate::{
    args::{self, TierArg},
    config, define_error, AsError, Error, Service,
};

use super::{delete, get, json, list};

/// Runs the provided [`args::Products`] operation.
pub(super) async fn run(
    svc: &Service,
    cmd: args::Products,
    conf: &config::List,
) -> Result<Value, Error> {
    use args::Products as Cmd;

    match cmd {
        Cmd::List {
            page,
            inactive,
            product_type,
        } => {
            let filter = product::Filter {
                is_active: inactive.then_some(false),
                product_type,
            };
            list::<Product>(svc, page, filter, conf).await
        }
        Cmd::Get { id } => get::<Product>(svc, id).await,
        Cmd::Create {
            name,
            type_id,
            unit,
            description,
            inactive,
            tiers,
        } => {
            let product = svc
                .execute(command::CreateProduct {
                    product: product::New {
                        name,
                        type_id,
                        unit,
                        description,
                        is_active: !inactive,
                    },
                    tiers: draft(Draft::new(), tiers)?,
                })
                .await
                .map_err(AsError::into_error)?;
            log::info!(id = %product.id, "product created");
            json(&product)
        }
        Cmd::Update {
            id,
            name,
            unit,
            description,
            active,
            tiers,
        } => {
            let patch = product::Patch {
                name,
                type_id: None,
                unit,
                description,
                is_active: active,
            };
            let tiers = if tiers.is_empty() {
                None
            } else {
                let current = svc
                    .execute(query::ById::<Product>::by(id))
                    .await
                    .map_err(AsError::into_error)?
                    .map(|p| p.price_tiers)
                    .unwrap_or_default();
                Some(draft(Draft::from_persisted(current), tiers)?)
            };
            let product = svc
                .execute(command::UpdateProduct { id, patch, tiers })
                .await
                .map_err(AsError::into_error)?;
            json(&product)
        }
        Cmd::Delete { id } => delete::<Product>(svc, id).await,
        Cmd::Price {
            id,
            quantity,
            duration,
        } => {
            let quote = svc
                .execute(query::CalculatePrice {
                    product_id: id,
                    quantity,
                    duration_id: duration,
                })
                .await
                .map_err(AsError::into_error)?;
            json(&quote)
        }
        Cmd::Durations => {
            let durations = svc
                .execute(query::Durations::by(()))
                .await
                .map_err(AsError::into_error)?;
            json(&durations)
        }
    }
}

/// Runs the provided [`args::ProductTypes`] operation.
pub(super) async fn run_types(
    svc: &Service,
    cmd: args::ProductTypes,
    conf: &config::List,
) -> Result<Value, Error> {
    use args::ProductTypes as Cmd;

    match cmd {
        Cmd::List { page, search } => {
            let filter = product_type::Filter {
                is_active: None,
                search,
            };
            list::<ProductType>(svc, page, filter, conf).await
        }
        Cmd::Create { name, description } => {
            let created = svc
                .execute(command::CreateResource(product_type::New {
                    name,
                    description,
                    is_active: true,
                }))
                .await
                .map_err(AsError::into_error)?;
            json(&created)
        }
    }
}

/// Checks the provided tiers as if they were added one by one to an empty
/// [`Draft`].
pub(super) fn check(tiers: Vec<TierArg>) -> Result<Value, Error> {
    let draft = draft(Draft::new(), tiers)?;
    json(&draft.into_tiers())
}

/// Adds the provided tiers one by one to the `draft`.
fn draft(mut draft: Draft, tiers: Vec<TierArg>) -> Result<Draft, Error> {
    for (n, TierArg(candidate)) in tiers.into_iter().enumerate() {
        _ = draft.add(&candidate).map_err(|v| rejected(n + 1, v))?;
    }
    Ok(draft)
}

/// Creates an [`Error`] of the `n`th tier being rejected.
fn rejected(n: usize, violation: tier::Violation) -> Error {
    let message = match violation {
        tier::Violation::Overlap {
            min_quantity,
            max_quantity: Some(max),
        } => format!("tier #{n}: {violation} with {min_quantity}..{max}"),
        tier::Violation::Overlap {
            min_quantity,
            max_quantity: None,
        } => format!("tier #{n}: {violation} with {min_quantity}.."),
        tier::Violation::MinQuantityRequired
        | tier::Violation::PriceRequired
        | tier::Violation::MaxNotAboveMin => format!("tier #{n}: {violation}"),
    };
    Error::invalid("INVALID_TIER", &message)
}

impl AsError for command::create_product::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Api(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::update_product::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "PRODUCT_NOT_EXISTS"]
                #[exit = NotFound]
                #[message = "`Product` with the provided ID does not exist"]
                ProductNotExists,
            }
        }

        match self {
            Self::Api(e) => e.try_as_error(),
            Self::ProductNotExists(_) => Some(Error::ProductNotExists.into()),
        }
    }
}

impl AsError for calculate_price::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "PRODUCT_NOT_EXISTS"]
                #[exit = NotFound]
                #[message = "`Product` with the provided ID does not exist"]
                ProductNotExists,

                #[code = "DURATION_NOT_EXISTS"]
                #[exit = NotFound]
                #[message = "`Duration` with the provided ID does not exist"]
                DurationNotExists,
            }
        }

        Some(match self {
            Self::Api(e) => return e.try_as_error(),
            Self::ProductNotExists(_) => Error::ProductNotExists.into(),
            Self::DurationNotExists(_) => Error::DurationNotExists.into(),
            Self::Quote(e) => crate::Error {
                code: "NOT_PRICEABLE",
                exit_code: crate::error::ExitCode::Rejected,
                message: e.to_string(),
                backtrace: None,
            },
        })
    }
}
