//! Conversions between stored decimal amounts and JSON numbers.

use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use salvo::prelude::StatusError;

/// Renders an amount as a JSON number.
pub(crate) fn to_json_amount(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or_default()
}

/// Parses a JSON number into a two-place amount.
pub(crate) fn from_json_amount(amount: f64, field: &str) -> Result<Decimal, StatusError> {
    Decimal::from_f64(amount)
        .map(|amount| amount.round_dp(2))
        .ok_or_else(|| StatusError::bad_request().brief(format!("\"{field}\" is not a valid amount")))
}
