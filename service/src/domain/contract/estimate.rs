//! Projected total value of a [`Contract`] being drafted.
//!
//! The projection is recomputed from scratch on every input change and is
//! never submitted on its own: the persisted [`Contract`] value stays
//! authoritative.
//!
//! [`Contract`]: super::Contract

use common::Date;
use rust_decimal::Decimal;
use serde::Serialize;

/// Number of months between billings, when not specified otherwise.
pub const DEFAULT_PERIODICITY_MONTHS: u32 = 12;

/// Raw inputs of a [`project()`]ion, any of which may be not entered yet.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Inputs {
    /// Price billed every period.
    pub value_per_period: Option<Decimal>,

    /// Number of months between billings.
    ///
    /// [`DEFAULT_PERIODICITY_MONTHS`] is used when absent or non-positive.
    pub periodicity_months: Option<i32>,

    /// [`Date`] the contract starts at.
    pub activation_date: Option<Date>,

    /// [`Date`] the contract ends at.
    pub expiration_date: Option<Date>,
}

/// Projected value of a contract.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Projection {
    /// Whole months between the activation and expiration, day-of-month
    /// ignored.
    pub month_span: u32,

    /// Effective number of months between billings.
    pub periodicity_months: u32,

    /// Number of started billing periods.
    pub periods: u32,

    /// `value_per_period × periods`.
    pub total: Decimal,
}

/// Projects the total value of a contract from the provided [`Inputs`].
///
/// Returns [`None`] if the value or any of the dates is missing, or if the
/// expiration doesn't fall at least one calendar month after the activation.
#[must_use]
pub fn project(inputs: &Inputs) -> Option<Projection> {
    let value = inputs.value_per_period?;
    let month_span = Date::month_span(
        inputs.activation_date?,
        inputs.expiration_date?,
    );
    let month_span = u32::try_from(month_span).ok().filter(|m| *m > 0)?;

    let periodicity_months = inputs
        .periodicity_months
        .and_then(|p| u32::try_from(p).ok())
        .filter(|p| *p > 0)
        .unwrap_or(DEFAULT_PERIODICITY_MONTHS);
    let periods = month_span.div_ceil(periodicity_months);

    Some(Projection {
        month_span,
        periodicity_months,
        periods,
        total: value * Decimal::from(periods),
    })
}
