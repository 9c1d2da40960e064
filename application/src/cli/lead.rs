//! Leads.

use serde_json::Value;
use service::{
    command::{self, Command as _},
    domain::{lead, Lead},
};
use tracing as log;

use crate::{args, config, AsError, Error, Service};

use super::{get, json, list, note};

/// Runs the provided [`args::Leads`] operation.
pub(super) async fn run(
    svc: &Service,
    cmd: args::Leads,
    conf: &config::List,
) -> Result<Value, Error> {
    use args::Leads as Cmd;

    match cmd {
        Cmd::List { page, status } => {
            list::<Lead>(svc, page, lead::Filter { status }, conf).await
        }
        Cmd::Get { id } => get::<Lead>(svc, id).await,
        Cmd::Create {
            title,
            organization,
            contact,
            details,
            status,
        } => {
            let args::LeadDetails {
                email,
                phone,
                value,
                currency,
                probability,
                partner,
                distributor,
            } = details;
            let lead = svc
                .execute(command::CreateResource(lead::New {
                    title,
                    organization,
                    contact_name: contact,
                    contact_email: email,
                    contact_phone: phone,
                    value,
                    currency: currency.unwrap_or_default(),
                    status,
                    probability,
                    partner_id: partner,
                    distributor_id: distributor,
                }))
                .await
                .map_err(AsError::into_error)?;
            log::info!(id = %lead.id, "lead registered");
            json(&lead)
        }
        Cmd::Update {
            id,
            title,
            organization,
            contact,
            details,
        } => {
            let lead = svc
                .execute(command::UpdateResource::new(
                    id,
                    patch(title, organization, contact, details),
                ))
                .await
                .map_err(AsError::into_error)?;
            json(&lead)
        }
        Cmd::Note { id, note } => super::note::<Lead>(svc, id, note).await,
        Cmd::Status { id, status } => {
            let lead = svc
                .execute(command::TransitionLeadStatus {
                    id,
                    status,
                    reason: None,
                })
                .await
                .map_err(AsError::into_error)?;
            log::info!(%id, %status, "lead status changed");
            json(&lead)
        }
    }
}

/// Builds a [`lead::Patch`] out of the provided fields.
fn patch(
    title: Option<String>,
    organization: Option<String>,
    contact: Option<String>,
    details: args::LeadDetails,
) -> lead::Patch {
    let args::LeadDetails {
        email,
        phone,
        value,
        currency,
        probability,
        partner,
        distributor,
    } = details;
    lead::Patch {
        title,
        organization,
        contact_name: contact,
        contact_email: email,
        contact_phone: phone,
        value,
        currency,
        probability,
        partner_id: partner,
        distributor_id: distributor,
    }
}

#[cfg(test)]
mod spec {
    use common::money::Currency;
    use serde_json::json;

    use crate::args::LeadDetails;

    use super::patch;

    #[test]
    fn patches_provided_fields_only() {
        let details = LeadDetails {
            email: None,
            phone: Some("+33 1 23 45 67 89".to_owned()),
            value: Some("1500.50".parse().unwrap()),
            currency: Some(Currency::Usd),
            probability: Some(40),
            partner: None,
            distributor: None,
        };

        assert_eq!(
            serde_json::to_value(patch(
                Some("Renewal".to_owned()),
                None,
                None,
                details,
            ))
            .unwrap(),
            json!({
                "title": "Renewal",
                "contact_phone": "+33 1 23 45 67 89",
                "value": "1500.50",
                "currency": "USD",
                "probability": 40,
            }),
        );
    }
}
