use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::error::PayoffError;

/// 100% annualized volatility.
pub const DEFAULT_IMPLIED_VOLATILITY: f64 = 1.0;
const DAYS_PER_YEAR: f64 = 365.0;

/// One- and two-standard-deviation price levels around the underlying.
/// Chart annotation only; never part of the payoff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExpectedMove {
    pub days_to_expiration: f64,
    pub implied_volatility: f64,
    /// One standard deviation in price units
    pub one_sd: f64,
    pub minus_2sd: f64,
    pub minus_1sd: f64,
    pub plus_1sd: f64,
    pub plus_2sd: f64,
}

/// `underlying * iv * sqrt(dte / 365)` and the levels it implies.
pub fn expected_move(
    underlying: f64,
    days_to_expiration: f64,
    implied_volatility: f64,
) -> Result<ExpectedMove, PayoffError> {
    if !(underlying.is_finite() && underlying > 0.0) {
        return Err(PayoffError::InvalidUnderlying(underlying));
    }
    if !(days_to_expiration.is_finite() && days_to_expiration > 0.0) {
        return Err(PayoffError::InvalidDaysToExpiration(days_to_expiration));
    }
    let one_sd = underlying * implied_volatility * (days_to_expiration / DAYS_PER_YEAR).sqrt();
    Ok(ExpectedMove {
        days_to_expiration,
        implied_volatility,
        one_sd,
        minus_2sd: underlying - 2.0 * one_sd,
        minus_1sd: underlying - one_sd,
        plus_1sd: underlying + one_sd,
        plus_2sd: underlying + 2.0 * one_sd,
    })
}
