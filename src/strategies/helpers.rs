pub use crate::engine::resolver::ResolverConfig;
pub use crate::engine::types::{
    Action, OptionType, RelativeLegTemplate, RelativePosition, RelativeStrike,
};

pub use super::StrategyDef;

/// Signed interval multiplier for advanced templates.
pub fn steps(n: i32) -> RelativeStrike {
    RelativeStrike::Intervals(n)
}

pub fn option_leg(
    action: Action,
    option_type: OptionType,
    strike: RelativeStrike,
    premium_factor: f64,
    quantity: u32,
) -> RelativeLegTemplate {
    RelativeLegTemplate {
        action,
        quantity,
        position: RelativePosition::Option {
            option_type,
            strike,
            premium_factor,
        },
    }
}

pub fn call_leg(
    action: Action,
    strike: RelativeStrike,
    premium_factor: f64,
) -> RelativeLegTemplate {
    option_leg(action, OptionType::Call, strike, premium_factor, 1)
}

pub fn put_leg(
    action: Action,
    strike: RelativeStrike,
    premium_factor: f64,
) -> RelativeLegTemplate {
    option_leg(action, OptionType::Put, strike, premium_factor, 1)
}

pub fn future_leg(action: Action, entry: RelativeStrike) -> RelativeLegTemplate {
    RelativeLegTemplate {
        action,
        quantity: 1,
        position: RelativePosition::Future { entry },
    }
}

pub fn strategy(
    name: &str,
    category: &str,
    description: &str,
    resolver: ResolverConfig,
    legs: Vec<RelativeLegTemplate>,
) -> StrategyDef {
    StrategyDef {
        name: name.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        resolver,
        legs,
    }
}
