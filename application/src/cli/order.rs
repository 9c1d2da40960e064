//! Orders.

use serde_json::Value;
use service::{
    command::{self, Command as _},
    domain::{order, Order},
};
use tracing as log;

use crate::{
    args::{self, ItemArg},
    config, AsError, Error, Service,
};

use super::{get, json, list, note};

/// Runs the provided [`args::Orders`] operation.
pub(super) async fn run(
    svc: &Service,
    cmd: args::Orders,
    conf: &config::List,
) -> Result<Value, Error> {
    use args::Orders as Cmd;

    match cmd {
        Cmd::List { page, status } => {
            list::<Order>(svc, page, order::Filter { status }, conf).await
        }
        Cmd::Get { id } => get::<Order>(svc, id).await,
        Cmd::Create {
            partner,
            distributor,
            lead,
            notes,
            items,
        } => {
            let order = svc
                .execute(command::CreateResource(order::New {
                    partner_id: partner,
                    distributor_id: distributor,
                    lead_id: lead,
                    notes_internal: notes,
                    items: items.into_iter().map(|ItemArg(i)| i).collect(),
                }))
                .await
                .map_err(AsError::into_error)?;
            log::info!(id = %order.id, "order placed");
            json(&order)
        }
        Cmd::Note { id, note } => super::note::<Order>(svc, id, note).await,
        Cmd::Status { id, status, reason } => {
            let order = svc
                .execute(command::TransitionOrderStatus { id, status, reason })
                .await
                .map_err(AsError::into_error)?;
            log::info!(%id, %status, "order status changed");
            json(&order)
        }
    }
}
