use anyhow::{Context, Result};

use super::ai_format::format_evaluation;
use super::response_types::EvaluatePriceResponse;
use crate::engine::analysis::LivePosition;

pub fn execute(position: Option<&LivePosition>, price: f64) -> Result<EvaluatePriceResponse> {
    let position = position.context("No position calculated yet. Call calculate_payoff first.")?;
    let eval = position.evaluate(price)?;
    Ok(format_evaluation(position, eval))
}
