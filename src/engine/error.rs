use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single offending field of one leg. `leg_index` is 0-based; messages
/// address the leg 1-based the way a form shows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LegIssue {
    pub leg_index: usize,
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationErrors {
    pub issues: Vec<LegIssue>,
}

impl ValidationErrors {
    pub fn push(&mut self, leg_index: usize, field: &str, message: impl Into<String>) {
        self.issues.push(LegIssue {
            leg_index,
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Distinct offending leg indices, ascending.
    pub fn leg_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self.issues.iter().map(|i| i.leg_index).collect();
        indices.sort_unstable();
        indices.dedup();
        indices
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .issues
            .iter()
            .map(|i| format!("Leg {} {}: {}", i.leg_index + 1, i.field, i.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PayoffError {
    #[error("underlying price must be a positive number, got {0}")]
    InvalidUnderlying(f64),
    #[error("days to expiration must be a positive number, got {0}")]
    InvalidDaysToExpiration(f64),
    #[error("at least one strategy leg is required")]
    NoLegs,
    #[error("invalid legs: {0}")]
    Validation(ValidationErrors),
    #[error("degenerate price domain: min={min}, max={max}, increment={increment}")]
    DegenerateDomain { min: f64, max: f64, increment: f64 },
    #[error("payoff is not a finite number at price {price}; leg values are too large")]
    NonFiniteResult { price: f64 },
    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),
}

impl From<ValidationErrors> for PayoffError {
    fn from(errors: ValidationErrors) -> Self {
        PayoffError::Validation(errors)
    }
}
