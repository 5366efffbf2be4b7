//! End-to-end payoff scenarios through the public engine API.
//!
//! Each test builds legs, runs the calculate pipeline with the default chart
//! domain and checks the curve and statistics a chart would display.

use payoff_mcp::engine::analysis::{analyze, analyze_legs, AnalysisSettings, PayoffAnalysis};
use payoff_mcp::engine::error::PayoffError;
use payoff_mcp::engine::payoff::{leg_payoff, total_payoff};
use payoff_mcp::engine::types::{Action, Bound, Leg, OptionType, RiskReward};
use payoff_mcp::strategies::{all_strategies, resolve_strategy};

mod common;
use common::{approx, future_leg, option_leg};

const S: f64 = 30_000.0;

fn run(legs: Vec<Leg>) -> PayoffAnalysis {
    analyze_legs(S, None, legs, AnalysisSettings::default()).unwrap()
}

// ─── Worked examples ─────────────────────────────────────────────────────────

#[test]
fn long_call_at_the_money() {
    let a = run(vec![Leg::call(Action::Buy, 30_000.0, 900.0, 1)]);

    assert!(approx(a.pnl_at(31_000.0), 100.0, 1e-9));
    assert!(approx(a.pnl_at(29_000.0), -900.0, 1e-9));
    assert_eq!(a.stats.max_loss, Bound::Finite(-900.0));
    assert_eq!(a.stats.max_profit, Bound::Unbounded);
    assert_eq!(a.stats.risk_reward, RiskReward::UnlimitedReward);
}

#[test]
fn bull_call_spread() {
    let a = run(vec![
        Leg::call(Action::Buy, 29_000.0, 1_200.0, 1),
        Leg::call(Action::Sell, 31_000.0, 300.0, 1),
    ]);

    assert_eq!(a.stats.max_loss, Bound::Finite(-900.0));
    assert_eq!(a.stats.max_profit, Bound::Finite(1_100.0));
    assert_eq!(a.stats.breakevens, vec![29_900.0]);
    match a.stats.risk_reward {
        RiskReward::Ratio(r) => assert!(approx(r, 1_100.0 / 900.0, 1e-12)),
        other => panic!("expected a ratio, got {other:?}"),
    }
    assert_eq!(a.stats.risk_reward.label(), "1.22");
}

#[test]
fn short_straddle() {
    let a = run(vec![
        Leg::call(Action::Sell, 30_000.0, 900.0, 1),
        Leg::put(Action::Sell, 30_000.0, 900.0, 1),
    ]);

    assert_eq!(a.plan.domain.min, 24_000.0);
    assert_eq!(a.plan.domain.max, 36_000.0);
    assert!(approx(a.plan.domain.increment, 60.0, 1e-9));

    assert_eq!(a.stats.max_loss, Bound::Unbounded);
    assert_eq!(a.stats.max_profit, Bound::Finite(1_800.0));
    assert!(approx(a.pnl_at(30_000.0), 1_800.0, 1e-9));
    assert_eq!(a.stats.breakevens, vec![28_200.0, 31_800.0]);
    assert_eq!(a.stats.risk_reward, RiskReward::UnlimitedRisk);
}

#[test]
fn iron_condor_from_catalog() {
    let legs = resolve_strategy("iron_condor", S).unwrap();
    let a = run(legs);

    // Net credit 720 on 1200-wide wings.
    assert_eq!(a.stats.max_profit, Bound::Finite(720.0));
    assert_eq!(a.stats.max_loss, Bound::Finite(-480.0));
    assert_eq!(a.stats.breakevens, vec![28_680.0, 31_320.0]);
    match a.stats.risk_reward {
        RiskReward::Ratio(r) => assert!(approx(r, 1.5, 1e-12)),
        other => panic!("expected a ratio, got {other:?}"),
    }
}

#[test]
fn covered_call_caps_upside_only() {
    let legs = resolve_strategy("covered_call", S).unwrap();
    let a = run(legs);
    assert_eq!(a.stats.max_loss, Bound::Unbounded);
    // Future gains up to the 31500 strike plus the 600 premium.
    assert_eq!(a.stats.max_profit, Bound::Finite(2_100.0));
    assert_eq!(a.stats.breakevens, vec![29_400.0]);
}

#[test]
fn long_future_is_unbounded_both_ways() {
    let a = run(vec![Leg::future(Action::Buy, 30_000.0, 2)]);
    assert_eq!(a.stats.max_profit, Bound::Unbounded);
    assert_eq!(a.stats.max_loss, Bound::Unbounded);
    assert_eq!(a.stats.risk_reward, RiskReward::UnlimitedRiskReward);
    assert_eq!(a.stats.breakevens, vec![30_000.0]);
}

// ─── Properties ──────────────────────────────────────────────────────────────

#[test]
fn bought_options_never_lose_more_than_premium() {
    for option_type in [OptionType::Call, OptionType::Put] {
        let leg = Leg::option(Action::Buy, option_type, 30_000.0, 900.0, 3);
        let a = run(vec![leg]);
        for p in a.curve.points.iter().map(|p| p.price) {
            assert!(leg_payoff(&leg, p) >= -2_700.0 - 1e-9);
        }
        assert_eq!(a.stats.max_loss, Bound::Finite(-2_700.0));
    }
}

#[test]
fn sold_options_never_gain_more_than_premium() {
    for option_type in [OptionType::Call, OptionType::Put] {
        let leg = Leg::option(Action::Sell, option_type, 30_000.0, 900.0, 2);
        let a = run(vec![leg]);
        for p in a.curve.points.iter().map(|p| p.price) {
            assert!(leg_payoff(&leg, p) <= 1_800.0 + 1e-9);
        }
        assert_eq!(a.stats.max_profit, Bound::Finite(1_800.0));
        assert_eq!(a.stats.max_loss, Bound::Unbounded);
    }
}

#[test]
fn put_call_future_parity() {
    let synthetic = [
        Leg::call(Action::Buy, 30_000.0, 950.0, 1),
        Leg::put(Action::Sell, 30_000.0, 880.0, 1),
    ];
    let future = [Leg::future(Action::Buy, 30_000.0, 1)];
    // Net premium paid: 950 - 880.
    for i in 0..=120 {
        let p = 24_000.0 + f64::from(i) * 100.0;
        assert!(approx(
            total_payoff(&synthetic, p),
            total_payoff(&future, p) - 70.0,
            1e-9
        ));
    }
}

#[test]
fn synthetic_long_from_catalog_tracks_a_future() {
    let legs = resolve_strategy("synthetic_long", S).unwrap();
    let a = run(legs);
    assert_eq!(a.stats.max_profit, Bound::Unbounded);
    assert_eq!(a.stats.max_loss, Bound::Unbounded);
    // Equal premiums cancel.
    assert!(approx(a.pnl_at(33_000.0), 3_000.0, 1e-9));
}

#[test]
fn single_call_breakeven_is_strike_plus_premium() {
    for (strike, premium) in [(30_000.0, 900.0), (31_000.0, 437.0), (28_500.0, 1_234.5)] {
        let a = run(vec![Leg::call(Action::Buy, strike, premium, 1)]);
        assert_eq!(a.stats.breakevens.len(), 1, "strike {strike}");
        assert!(
            approx(a.stats.breakevens[0], strike + premium, a.plan.domain.increment),
            "strike {strike}: got {:?}",
            a.stats.breakevens
        );
    }
}

#[test]
fn catalog_resolution_is_idempotent() {
    for s in all_strategies() {
        assert_eq!(s.resolve(31_234.0), s.resolve(31_234.0), "{}", s.name);
    }
}

#[test]
fn every_catalog_strategy_analyzes() {
    for s in all_strategies() {
        let legs = s.resolve(S).unwrap();
        let a = run(legs);
        assert_eq!(a.curve.len(), 201, "{}", s.name);
        assert!(a.curve.pnls().all(f64::is_finite), "{}", s.name);
        let sorted = a.stats.breakevens.windows(2).all(|w| w[0] < w[1]);
        assert!(sorted, "{}: {:?}", s.name, a.stats.breakevens);
    }
}

// ─── Input validation ────────────────────────────────────────────────────────

#[test]
fn raw_input_round_trip_through_validation() {
    let a = analyze(
        S,
        Some(30.0),
        &[
            option_leg(Action::Buy, OptionType::Put, 29_000.0, 700.0, 1),
            future_leg(Action::Buy, 30_000.0, 1),
        ],
        AnalysisSettings::default(),
    )
    .unwrap();
    // Protective put: loss capped at 1000 + 700 below the strike.
    assert_eq!(a.stats.max_loss, Bound::Finite(-1_700.0));
    assert_eq!(a.stats.max_profit, Bound::Unbounded);
    let m = a.expected_move.unwrap();
    assert!(approx(m.one_sd, S * (30.0_f64 / 365.0).sqrt(), 1e-9));
}

#[test]
fn validation_reports_all_bad_legs() {
    let result = analyze(
        S,
        None,
        &[
            option_leg(Action::Buy, OptionType::Call, 0.0, 900.0, 1),
            option_leg(Action::Buy, OptionType::Call, 30_000.0, 900.0, 1),
            future_leg(Action::Sell, -5.0, 0),
        ],
        AnalysisSettings::default(),
    );
    match result {
        Err(PayoffError::Validation(errors)) => {
            assert_eq!(errors.leg_indices(), vec![0, 2]);
            let text = errors.to_string();
            assert!(text.contains("Leg 1 strike"), "{text}");
            assert!(text.contains("Leg 3 entry_price"), "{text}");
            assert!(text.contains("Leg 3 quantity"), "{text}");
        }
        other => panic!("expected validation errors, got {other:?}"),
    }
}

#[test]
fn custom_sample_count() {
    let settings = AnalysisSettings {
        samples: 400,
        ..AnalysisSettings::default()
    };
    let a = analyze_legs(S, None, vec![Leg::call(Action::Buy, S, 900.0, 1)], settings).unwrap();
    assert_eq!(a.curve.len(), 401);
    assert!(approx(a.plan.domain.increment, 30.0, 1e-9));
}
