use super::helpers::*;

pub fn long_call_condor() -> StrategyDef {
    strategy(
        "long_call_condor",
        "Condors",
        "Buy call 3 intervals below, sell calls 1 below and 1 above, buy call 3 above",
        ResolverConfig::advanced(),
        vec![
            call_leg(Action::Buy, steps(-3), 2.4),
            call_leg(Action::Sell, steps(-1), 1.5),
            call_leg(Action::Sell, steps(1), 0.6),
            call_leg(Action::Buy, steps(3), 0.2),
        ],
    )
}

pub fn long_put_condor() -> StrategyDef {
    strategy(
        "long_put_condor",
        "Condors",
        "Buy put 3 intervals above, sell puts 1 above and 1 below, buy put 3 below",
        ResolverConfig::advanced(),
        vec![
            put_leg(Action::Buy, steps(3), 2.4),
            put_leg(Action::Sell, steps(1), 1.5),
            put_leg(Action::Sell, steps(-1), 0.6),
            put_leg(Action::Buy, steps(-3), 0.2),
        ],
    )
}

pub fn all() -> Vec<StrategyDef> {
    vec![long_call_condor(), long_put_condor()]
}
