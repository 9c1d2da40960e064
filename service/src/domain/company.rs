//! [`Company`] details shared by [`Partner`]s and [`Distributor`]s.
//!
//! [`Distributor`]: crate::domain::Distributor
//! [`Partner`]: crate::domain::Partner

use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

/// Identification and contact details of a company.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, SmartDefault)]
pub struct Company {
    /// Commercial name.
    pub name: String,

    /// Legal name, if different from the commercial one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_name: Option<String>,

    /// Registration number (SIREN, VAT, etc).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,

    /// Contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Contact phone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Website URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// First line of the postal address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,

    /// Second line of the postal address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,

    /// City.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// Postal code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    /// Country.
    #[default("France".to_owned())]
    #[serde(default = "default_country")]
    pub country: String,

    /// Indicator whether the company is still worked with.
    #[default(true)]
    #[serde(default = "default_active")]
    pub is_active: bool,

    /// Internal notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn default_country() -> String {
    Company::default().country
}

const fn default_active() -> bool {
    true
}

/// Modification of a [`Company`].
///
/// Absent fields are left untouched.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Patch {
    /// New commercial name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New legal name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_name: Option<String>,

    /// New registration number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,

    /// New contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// New contact phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// New website URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// New first address line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,

    /// New second address line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,

    /// New city.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// New postal code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    /// New country.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// New activity indicator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    /// New internal notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Filter of a [`Company`]-based list.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Filter {
    /// Whether to list active or inactive companies only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    /// Substring to search in names, emails and cities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

#[cfg(test)]
mod spec {
    use super::Company;

    #[test]
    fn defaults_to_active_french_company() {
        let company: Company =
            serde_json::from_value(serde_json::json!({ "name": "Acme" }))
                .unwrap();

        assert_eq!(company.country, "France");
        assert!(company.is_active);
        assert_eq!(
            serde_json::to_value(&company).unwrap(),
            serde_json::json!({
                "name": "Acme",
                "country": "France",
                "is_active": true,
            }),
        );
    }
}
