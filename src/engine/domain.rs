//! Price domains for payoff curves.
//!
//! The payoff engine samples whatever domain it is given; `plan_domain` is the
//! shared caller convention for choosing one around the underlying and the
//! strikes of a position.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::error::PayoffError;
use super::types::Leg;

pub const DEFAULT_SAMPLES: usize = 200;
pub const PREVIEW_SAMPLES: usize = 50;
pub const MAX_DOMAIN_POINTS: usize = 100_000;

const UNDERLYING_BAND: f64 = 0.2;
const STRIKE_MARGIN: f64 = 0.1;
const PREVIEW_BAND: f64 = 0.1;
const FALLBACK_HALF_WIDTH: f64 = 1_000.0;

/// Evenly spaced price grid `min, min + increment, ... <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PriceDomain {
    pub min: f64,
    pub max: f64,
    pub increment: f64,
}

impl PriceDomain {
    pub fn new(min: f64, max: f64, increment: f64) -> Result<Self, PayoffError> {
        let degenerate = PayoffError::DegenerateDomain {
            min,
            max,
            increment,
        };
        if !(min.is_finite() && max.is_finite() && increment.is_finite()) {
            return Err(degenerate);
        }
        if increment <= 0.0 || min >= max || increment > max - min {
            return Err(degenerate);
        }
        if (max - min) / increment > MAX_DOMAIN_POINTS as f64 {
            return Err(degenerate);
        }
        Ok(Self {
            min,
            max,
            increment,
        })
    }

    /// Number of sample points, always at least 2.
    pub fn len(&self) -> usize {
        self.last_index() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    fn last_index(&self) -> usize {
        // Index-based sampling; the epsilon keeps a final point that lands on
        // `max` up to floating-point noise.
        ((self.max - self.min) / self.increment + 1e-9).floor() as usize
    }

    pub fn prices(&self) -> impl Iterator<Item = f64> {
        let Self { min, increment, .. } = *self;
        (0..=self.last_index()).map(move |i| min + i as f64 * increment)
    }
}

/// A chart domain chosen for a position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DomainPlan {
    pub domain: PriceDomain,
    /// Roughly 1% of the range, for an interactive price slider.
    pub slider_step: f64,
    /// `true` when the computed range was unusable and the fixed-width
    /// fallback around the underlying was substituted.
    pub fallback_used: bool,
}

impl DomainPlan {
    fn new(domain: PriceDomain, fallback_used: bool) -> Self {
        let step = (domain.max - domain.min) / 100.0;
        let slider_step = if step >= 1.0 { step.round() } else { step };
        Self {
            domain,
            slider_step,
            fallback_used,
        }
    }
}

fn check_underlying(underlying: f64) -> Result<(), PayoffError> {
    if underlying.is_finite() && underlying > 0.0 {
        Ok(())
    } else {
        Err(PayoffError::InvalidUnderlying(underlying))
    }
}

/// Choose the chart domain for `legs` around `underlying`.
///
/// Starts from a ±20% band around the underlying, widens it to 10% beyond the
/// lowest and highest option strike, and splits it into `samples` steps.
/// Futures entry prices do not widen the band.
pub fn plan_domain(
    underlying: f64,
    legs: &[Leg],
    samples: usize,
) -> Result<DomainPlan, PayoffError> {
    check_underlying(underlying)?;
    let samples = samples.max(1) as f64;

    let mut min = underlying * (1.0 - UNDERLYING_BAND);
    let mut max = underlying * (1.0 + UNDERLYING_BAND);

    let strikes = legs.iter().filter_map(Leg::strike);
    let bounds = strikes.fold(None, |acc: Option<(f64, f64)>, k| match acc {
        Some((lo, hi)) => Some((lo.min(k), hi.max(k))),
        None => Some((k, k)),
    });
    if let Some((lo, hi)) = bounds {
        min = min.min(lo * (1.0 - STRIKE_MARGIN));
        max = max.max(hi * (1.0 + STRIKE_MARGIN));
    }

    if min >= max {
        max = min + underlying * UNDERLYING_BAND;
        if max <= min {
            max = min + FALLBACK_HALF_WIDTH;
        }
    }
    if min < 0.0 {
        min = 0.0;
    }

    let increment = (max - min) / samples;
    match PriceDomain::new(min, max, increment) {
        Ok(domain) => Ok(DomainPlan::new(domain, false)),
        Err(err) => {
            tracing::warn!(%err, underlying, "Price domain unusable, using fallback width");
            let lo = (underlying - FALLBACK_HALF_WIDTH).max(0.0);
            let hi = underlying + FALLBACK_HALF_WIDTH;
            PriceDomain::new(lo, hi, (hi - lo) / samples).map(|d| DomainPlan::new(d, true))
        }
    }
}

/// ±10% around the underlying in 50 steps, for catalog thumbnails.
pub fn preview_domain(underlying: f64) -> Result<PriceDomain, PayoffError> {
    check_underlying(underlying)?;
    let min = underlying * (1.0 - PREVIEW_BAND);
    let max = underlying * (1.0 + PREVIEW_BAND);
    PriceDomain::new(min, max, (max - min) / PREVIEW_SAMPLES as f64)
}
