//! Contracts, their activation and value estimation.

use common::DateTimeOf;
use serde_json::Value;
use service::{
    command::{self, activate_order, transition_status, Command as _},
    domain::{
        contract::{self, estimate, Activation},
        status::Stateful,
        Contract,
    },
    query::{self, Query as _},
};
use tracing as log;

use crate::{args, config, define_error, AsError, Error, Service};

use super::{get, json, list, note};

/// Runs the provided [`args::Contracts`] operation.
pub(super) async fn run(
    svc: &Service,
    cmd: args::Contracts,
    conf: &config::List,
) -> Result<Value, Error> {
    use args::Contracts as Cmd;

    match cmd {
        Cmd::List { page, status } => {
            list::<Contract>(svc, page, contract::Filter { status }, conf)
                .await
        }
        Cmd::Get { id } => get::<Contract>(svc, id).await,
        Cmd::Estimate {
            value,
            periodicity,
            from,
            to,
        } => estimate(&estimate::Inputs {
            value_per_period: value,
            periodicity_months: periodicity,
            activation_date: from,
            expiration_date: to,
        }),
        Cmd::Status { id, status, reason } => {
            let contract = svc
                .execute(command::TransitionContractStatus {
                    id,
                    status,
                    reason,
                })
                .await
                .map_err(AsError::into_error)?;
            log::info!(%id, %status, "contract status changed");
            json(&contract)
        }
        Cmd::Note { id, note } => super::note::<Contract>(svc, id, note).await,
        Cmd::Invoices { id } => {
            let invoices = svc
                .execute(query::ContractInvoices::by(id))
                .await
                .map_err(AsError::into_error)?;
            log::debug!(%id, count = invoices.invoices.len(), "invoices read");
            json(&invoices)
        }
        Cmd::Activate {
            order,
            activation,
            expiration,
            notes,
        } => {
            let contract = svc
                .execute(command::ActivateOrder {
                    order_id: order,
                    activation: Activation {
                        activation_date: activation.map(DateTimeOf::coerce),
                        expiration_date: expiration.map(DateTimeOf::coerce),
                        notes_internal: notes,
                    },
                })
                .await
                .map_err(AsError::into_error)?;
            log::info!(
                id = %contract.id,
                number = %contract.contract_number,
                "order activated",
            );
            json(&contract)
        }
    }
}

/// Projects the total value of a [`Contract`] from the provided
/// [`estimate::Inputs`].
///
/// Renders `null` if the inputs are not enough for a projection.
fn estimate(inputs: &estimate::Inputs) -> Result<Value, Error> {
    let projection = estimate::project(inputs);
    if projection.is_none() {
        log::debug!(?inputs, "not enough inputs to estimate");
    }
    json(&projection)
}

impl AsError for activate_order::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "ORDER_NOT_EXISTS"]
                #[exit = NotFound]
                #[message = "`Order` with the provided ID does not exist"]
                OrderNotExists,
            }
        }

        Some(match self {
            Self::Api(e) => return e.try_as_error(),
            Self::OrderNotExists(_) => Error::OrderNotExists.into(),
            Self::OrderNotFulfilled { .. } => crate::Error {
                code: "ORDER_NOT_FULFILLED",
                exit_code: crate::error::ExitCode::Rejected,
                message: self.to_string(),
                backtrace: None,
            },
            Self::InvalidActivation(e) => {
                crate::Error::invalid("INVALID_ACTIVATION", e)
            }
        })
    }
}

impl<R: Stateful> AsError for transition_status::ExecutionError<R> {
    fn try_as_error(&self) -> Option<Error> {
        Some(match self {
            Self::Api(e) => return e.try_as_error(),
            Self::NotExists(_) => Error {
                code: "NOT_EXISTS",
                exit_code: crate::error::ExitCode::NotFound,
                message: self.to_string(),
                backtrace: None,
            },
            Self::Forbidden(e) => Error {
                code: "STATUS_CHANGE_FORBIDDEN",
                exit_code: crate::error::ExitCode::Rejected,
                message: e.to_string(),
                backtrace: None,
            },
        })
    }
}
