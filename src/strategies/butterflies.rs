use super::helpers::*;

pub fn long_call_butterfly() -> StrategyDef {
    strategy(
        "long_call_butterfly",
        "Butterflies",
        "Buy 1 lower call, sell 2 ATM calls, buy 1 upper call",
        ResolverConfig::advanced(),
        vec![
            call_leg(Action::Buy, steps(-1), 1.5),
            option_leg(Action::Sell, OptionType::Call, steps(0), 1.0, 2),
            call_leg(Action::Buy, steps(1), 0.6),
        ],
    )
}

pub fn long_put_butterfly() -> StrategyDef {
    strategy(
        "long_put_butterfly",
        "Butterflies",
        "Buy 1 upper put, sell 2 ATM puts, buy 1 lower put",
        ResolverConfig::advanced(),
        vec![
            put_leg(Action::Buy, steps(1), 1.5),
            option_leg(Action::Sell, OptionType::Put, steps(0), 1.0, 2),
            put_leg(Action::Buy, steps(-1), 0.6),
        ],
    )
}

pub fn all() -> Vec<StrategyDef> {
    vec![long_call_butterfly(), long_put_butterfly()]
}
