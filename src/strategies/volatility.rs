use super::helpers::*;

// Straddles and strangles
pub fn long_straddle() -> StrategyDef {
    strategy(
        "long_straddle",
        "Volatility",
        "Buy ATM call and ATM put",
        ResolverConfig::simple(),
        vec![
            call_leg(Action::Buy, RelativeStrike::Atm, 0.03),
            put_leg(Action::Buy, RelativeStrike::Atm, 0.03),
        ],
    )
}

pub fn short_straddle() -> StrategyDef {
    strategy(
        "short_straddle",
        "Volatility",
        "Sell ATM call and ATM put",
        ResolverConfig::simple(),
        vec![
            call_leg(Action::Sell, RelativeStrike::Atm, 0.03),
            put_leg(Action::Sell, RelativeStrike::Atm, 0.03),
        ],
    )
}

pub fn long_strangle() -> StrategyDef {
    strategy(
        "long_strangle",
        "Volatility",
        "Buy OTM call and OTM put",
        ResolverConfig::simple(),
        vec![
            call_leg(Action::Buy, RelativeStrike::OtmCall, 0.02),
            put_leg(Action::Buy, RelativeStrike::OtmPut, 0.02),
        ],
    )
}

pub fn short_strangle() -> StrategyDef {
    strategy(
        "short_strangle",
        "Volatility",
        "Sell OTM call and OTM put",
        ResolverConfig::simple(),
        vec![
            call_leg(Action::Sell, RelativeStrike::OtmCall, 0.02),
            put_leg(Action::Sell, RelativeStrike::OtmPut, 0.02),
        ],
    )
}

pub fn long_wide_strangle() -> StrategyDef {
    strategy(
        "long_wide_strangle",
        "Volatility",
        "Buy call and put two intervals out of the money",
        ResolverConfig::advanced(),
        vec![
            call_leg(Action::Buy, steps(2), 0.35),
            put_leg(Action::Buy, steps(-2), 0.35),
        ],
    )
}

pub fn short_wide_strangle() -> StrategyDef {
    strategy(
        "short_wide_strangle",
        "Volatility",
        "Sell call and put two intervals out of the money",
        ResolverConfig::advanced(),
        vec![
            call_leg(Action::Sell, steps(2), 0.35),
            put_leg(Action::Sell, steps(-2), 0.35),
        ],
    )
}

pub fn all() -> Vec<StrategyDef> {
    vec![
        long_straddle(),
        short_straddle(),
        long_strangle(),
        short_strangle(),
        long_wide_strangle(),
        short_wide_strangle(),
    ]
}
