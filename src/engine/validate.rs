//! Validation of raw leg input into resolved `Leg`s.
//!
//! Every leg is checked and every problem is reported with its leg index, so
//! a form can highlight all offending legs at once. Nothing is returned for a
//! request that has any problem.

use super::error::{PayoffError, ValidationErrors};
use super::types::{Leg, LegInput, LegKind, NumberInput};

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

pub fn validate_underlying(price: f64) -> Result<f64, PayoffError> {
    if is_positive(price) {
        Ok(price)
    } else {
        Err(PayoffError::InvalidUnderlying(price))
    }
}

pub fn validate_days_to_expiration(dte: f64) -> Result<f64, PayoffError> {
    if is_positive(dte) {
        Ok(dte)
    } else {
        Err(PayoffError::InvalidDaysToExpiration(dte))
    }
}

/// Upper bound on prices and premiums. Keeps sums over many legs and
/// quantities far from `f64` overflow.
pub const MAX_PRICE: f64 = 1e12;

/// Upper bound on contracts per leg.
pub const MAX_QUANTITY: u32 = 1_000_000;

enum Field {
    Missing,
    Unreadable,
    Number(f64),
}

fn read_number(
    errors: &mut ValidationErrors,
    index: usize,
    field: &str,
    value: Option<&NumberInput>,
) -> Field {
    let Some(value) = value else {
        return Field::Missing;
    };
    if let Some(v) = value.as_f64() {
        Field::Number(v)
    } else {
        errors.push(index, field, format!("must be a number, got {value}"));
        Field::Unreadable
    }
}

fn require_positive(
    errors: &mut ValidationErrors,
    index: usize,
    field: &str,
    value: Option<&NumberInput>,
) -> Option<f64> {
    match read_number(errors, index, field, value) {
        Field::Missing => {
            errors.push(index, field, "is required");
            None
        }
        Field::Unreadable => None,
        Field::Number(v) if !is_positive(v) => {
            errors.push(index, field, format!("must be a positive number, got {v}"));
            None
        }
        Field::Number(v) if v > MAX_PRICE => {
            errors.push(index, field, format!("must not exceed {MAX_PRICE}, got {v}"));
            None
        }
        Field::Number(v) => Some(v),
    }
}

fn require_premium(
    errors: &mut ValidationErrors,
    index: usize,
    value: Option<&NumberInput>,
) -> Option<f64> {
    match read_number(errors, index, "premium", value) {
        Field::Missing => {
            errors.push(index, "premium", "is required");
            None
        }
        Field::Unreadable => None,
        Field::Number(p) if !(p.is_finite() && p >= 0.0) => {
            errors.push(index, "premium", format!("must not be negative, got {p}"));
            None
        }
        Field::Number(p) if p > MAX_PRICE => {
            errors.push(index, "premium", format!("must not exceed {MAX_PRICE}, got {p}"));
            None
        }
        Field::Number(p) => Some(p),
    }
}

fn require_quantity(
    errors: &mut ValidationErrors,
    index: usize,
    value: Option<&NumberInput>,
) -> Option<u32> {
    match read_number(errors, index, "quantity", value) {
        Field::Missing => {
            errors.push(index, "quantity", "is required");
            None
        }
        Field::Unreadable => None,
        Field::Number(q) if !(q.is_finite() && q.fract() == 0.0) => {
            errors.push(index, "quantity", format!("must be a whole number, got {q}"));
            None
        }
        Field::Number(q) if q < 1.0 => {
            errors.push(index, "quantity", format!("must be at least 1, got {q}"));
            None
        }
        Field::Number(q) if q > f64::from(MAX_QUANTITY) => {
            errors.push(index, "quantity", format!("is too large: {q}"));
            None
        }
        Field::Number(q) => Some(q as u32),
    }
}

fn reject_present(
    errors: &mut ValidationErrors,
    index: usize,
    field: &str,
    value: Option<&NumberInput>,
    kind: &str,
) {
    if value.is_some() {
        errors.push(index, field, format!("must not be set on {kind} leg"));
    }
}

fn validate_leg(index: usize, input: &LegInput, errors: &mut ValidationErrors) -> Option<Leg> {
    let action = input.action;
    if action.is_none() {
        errors.push(index, "action", "is required (buy or sell)");
    }

    let quantity = require_quantity(errors, index, input.quantity.as_ref());

    let Some(kind) = input.kind else {
        errors.push(index, "kind", "is required (option or future)");
        return None;
    };

    match kind {
        LegKind::Option => {
            if input.option_type.is_none() {
                errors.push(index, "option_type", "is required (call or put)");
            }
            let strike = require_positive(errors, index, "strike", input.strike.as_ref());
            let premium = require_premium(errors, index, input.premium.as_ref());
            let entry_price = input.entry_price.as_ref();
            reject_present(errors, index, "entry_price", entry_price, "an option");

            Some(Leg::option(
                action?,
                input.option_type?,
                strike?,
                premium?,
                quantity?,
            ))
        }
        LegKind::Future => {
            let entry_price =
                require_positive(errors, index, "entry_price", input.entry_price.as_ref());
            if input.option_type.is_some() {
                errors.push(index, "option_type", "must not be set on a future leg");
            }
            reject_present(errors, index, "strike", input.strike.as_ref(), "a future");
            reject_present(errors, index, "premium", input.premium.as_ref(), "a future");

            Some(Leg::future(action?, entry_price?, quantity?))
        }
    }
}

/// Validate every leg; all-or-nothing.
pub fn validate_legs(inputs: &[LegInput]) -> Result<Vec<Leg>, PayoffError> {
    if inputs.is_empty() {
        return Err(PayoffError::NoLegs);
    }

    let mut errors = ValidationErrors::default();
    let mut legs = Vec::with_capacity(inputs.len());
    for (index, input) in inputs.iter().enumerate() {
        let before = errors.issues.len();
        let leg = validate_leg(index, input, &mut errors);
        if errors.issues.len() == before {
            if let Some(leg) = leg {
                legs.push(leg);
            }
        }
    }

    if errors.is_empty() {
        Ok(legs)
    } else {
        Err(PayoffError::Validation(errors))
    }
}
