use super::helpers::*;

// Call verticals use simple 5% offsets, put verticals use 2% intervals.

pub fn bull_call_spread() -> StrategyDef {
    strategy(
        "bull_call_spread",
        "Spreads",
        "Buy ITM call, sell OTM call",
        ResolverConfig::simple(),
        vec![
            call_leg(Action::Buy, RelativeStrike::ItmCall, 0.04),
            call_leg(Action::Sell, RelativeStrike::OtmCall, 0.01),
        ],
    )
}

pub fn bear_call_spread() -> StrategyDef {
    strategy(
        "bear_call_spread",
        "Spreads",
        "Sell ITM call, buy OTM call",
        ResolverConfig::simple(),
        vec![
            call_leg(Action::Sell, RelativeStrike::ItmCall, 0.04),
            call_leg(Action::Buy, RelativeStrike::OtmCall, 0.01),
        ],
    )
}

pub fn bull_put_spread() -> StrategyDef {
    strategy(
        "bull_put_spread",
        "Spreads",
        "Sell ATM put, buy put one interval lower",
        ResolverConfig::advanced(),
        vec![
            put_leg(Action::Sell, steps(0), 1.0),
            put_leg(Action::Buy, steps(-1), 0.6),
        ],
    )
}

pub fn bear_put_spread() -> StrategyDef {
    strategy(
        "bear_put_spread",
        "Spreads",
        "Buy ATM put, sell put one interval lower",
        ResolverConfig::advanced(),
        vec![
            put_leg(Action::Buy, steps(0), 1.0),
            put_leg(Action::Sell, steps(-1), 0.6),
        ],
    )
}

pub fn all() -> Vec<StrategyDef> {
    vec![
        bull_call_spread(),
        bear_call_spread(),
        bull_put_spread(),
        bear_put_spread(),
    ]
}
