use super::ai_format::{format_strategies, strategy_info};
use super::response_types::StrategiesResponse;
use crate::strategies::all_strategies;

pub fn execute() -> StrategiesResponse {
    let strategies = all_strategies().iter().map(strategy_info).collect();
    format_strategies(strategies)
}
