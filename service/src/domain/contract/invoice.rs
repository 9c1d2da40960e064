//! [`Invoices`] billed for a [`Contract`].
//!
//! [`Contract`]: super::Contract

use common::{money::Currency, DateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Id;

/// [`Invoice`]s of a [`Contract`] as reported by its billing provider.
///
/// [`Contract`]: super::Contract
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Invoices {
    /// ID of the billed [`Contract`].
    ///
    /// [`Contract`]: super::Contract
    pub contract_id: Id,

    /// Human-readable number of the billed [`Contract`].
    ///
    /// [`Contract`]: super::Contract
    pub contract_number: String,

    /// Linked [`Invoice`]s.
    #[serde(default)]
    pub invoices: Vec<Invoice>,

    /// Name of the billing provider.
    pub provider: String,

    /// Provider's remark about the data, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Invoice linked to a [`Contract`].
///
/// [`Contract`]: super::Contract
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Invoice {
    /// Provider's ID of this [`Invoice`].
    pub invoice_id: String,

    /// Human-readable number of this [`Invoice`].
    pub invoice_number: String,

    /// Provider's payment status of this [`Invoice`].
    pub status: String,

    /// Billed amount.
    pub amount: Decimal,

    /// [`Currency`] of the billed amount.
    #[serde(default)]
    pub currency: Currency,

    /// [`DateTime`] this [`Invoice`] was issued at, if known.
    #[serde(default)]
    pub created_at: Option<DateTime>,
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::Invoices;

    #[test]
    fn decodes_provider_response() {
        let invoices: Invoices = serde_json::from_value(json!({
            "contract_id": "5d1f7a8e-3c2b-4e6f-8a9d-0b1c2d3e4f50",
            "contract_number": "CTR-2025-0001",
            "invoices": [{
                "invoice_id": "a1b2c3d4e5f6",
                "invoice_number": "INV-A1B2C3D4",
                "status": "paid",
                "amount": 1200.5,
                "currency": "EUR",
                "created_at": "2025-02-01T00:00:00",
            }],
            "provider": "mock",
            "message": "Not integrated yet",
        }))
        .unwrap();

        assert_eq!(invoices.invoices.len(), 1);
        assert_eq!(invoices.invoices[0].amount, Decimal::new(12005, 1));
        assert_eq!(
            invoices.invoices[0].created_at.unwrap().to_rfc3339(),
            "2025-02-01T00:00:00Z",
        );
    }
}
