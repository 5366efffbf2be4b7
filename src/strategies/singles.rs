use super::helpers::*;

// Simple templates: premiums are a direct fraction of the underlying.

pub fn long_call() -> StrategyDef {
    strategy("long_call", "Singles", "Buy an ATM call", ResolverConfig::simple(), vec![
        call_leg(Action::Buy, RelativeStrike::Atm, 0.03),
    ])
}

pub fn short_call() -> StrategyDef {
    strategy("short_call", "Singles", "Sell an ATM call", ResolverConfig::simple(), vec![
        call_leg(Action::Sell, RelativeStrike::Atm, 0.03),
    ])
}

pub fn long_put() -> StrategyDef {
    strategy("long_put", "Singles", "Buy an ATM put", ResolverConfig::simple(), vec![
        put_leg(Action::Buy, RelativeStrike::Atm, 0.03),
    ])
}

pub fn short_put() -> StrategyDef {
    strategy("short_put", "Singles", "Sell an ATM put", ResolverConfig::simple(), vec![
        put_leg(Action::Sell, RelativeStrike::Atm, 0.03),
    ])
}

pub fn all() -> Vec<StrategyDef> {
    vec![long_call(), short_call(), long_put(), short_put()]
}
