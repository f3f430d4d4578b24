//! Domain records for the optical retail back office.

mod appointment;
mod customer;
mod invoice;
mod patient;
mod prescription;
mod product;
mod reference;

pub use appointment::*;
pub use customer::*;
pub use invoice::*;
pub use patient::*;
pub use prescription::*;
pub use product::*;
pub use reference::*;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// An id that arrives either as a JSON number or a JSON string.
///
/// Older clients send `patientId: 3`, newer ones `patientId: "PAT003"`;
/// both end up as the string form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseId {
    Number(u64),
    Text(String),
}

impl LooseId {
    pub fn into_string(self) -> String {
        match self {
            LooseId::Number(n) => n.to_string(),
            LooseId::Text(s) => s.trim().to_string(),
        }
    }
}

/// Require a non-blank string field.
pub(crate) fn required(field: &str, value: Option<String>) -> CoreResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(CoreError::Validation(format!("{} is required", field))),
    }
}

/// Require a non-blank id given as number or string.
pub(crate) fn required_id(field: &str, value: Option<LooseId>) -> CoreResult<String> {
    required(field, value.map(LooseId::into_string))
}

/// Reject a patch that would blank out a required field.
pub(crate) fn not_blank(field: &str, value: Option<&String>) -> CoreResult<()> {
    match value {
        Some(v) if v.trim().is_empty() => {
            Err(CoreError::Validation(format!("{} is required", field)))
        }
        _ => Ok(()),
    }
}

/// Check a `YYYY-MM-DD` date.
pub(crate) fn check_date(field: &str, value: &str) -> CoreResult<()> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| CoreError::Validation(format!("{} must be a YYYY-MM-DD date", field)))
}

/// Check an `HH:MM` time.
pub(crate) fn check_time(field: &str, value: &str) -> CoreResult<()> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map(|_| ())
        .map_err(|_| CoreError::Validation(format!("{} must be an HH:MM time", field)))
}

/// Largest accepted money amount. Sums over a collection stay finite.
pub const MAX_AMOUNT: f64 = 1e12;

/// Reject negative, non-finite or out-of-range amounts.
pub(crate) fn check_amount(field: &str, value: f64) -> CoreResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::Validation(format!(
            "{} must be a non-negative number",
            field
        )));
    }
    if value > MAX_AMOUNT {
        return Err(CoreError::Validation(format!(
            "{} must not exceed {}",
            field, MAX_AMOUNT
        )));
    }
    Ok(())
}

/// Overwrite `target` when the patch carries a value.
pub(crate) fn patch_field<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(v) = value {
        *target = v.clone();
    }
}

/// Overwrite an optional `target` when the patch carries a value.
pub(crate) fn patch_optional<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
    if let Some(v) = value {
        *target = Some(v.clone());
    }
}
