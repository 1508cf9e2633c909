mod mg1;
mod mm1;
mod mm1k;
mod mm1n;
mod mms;
mod mmsk;
mod mmsn;
mod priority;

use crate::combinatorics::power_over_factorial;
use crate::error::{Error, Result};

pub use mg1::calculate_mg1;
pub use mm1::calculate_mm1;
pub use mm1k::calculate_mm1k;
pub use mm1n::calculate_mm1n;
pub use mms::calculate_mms;
pub use mmsk::calculate_mmsk;
pub use mmsn::calculate_mmsn;
pub use priority::{
    calculate_priority, calculate_priority_non_preemptive, calculate_priority_preemptive,
    ClassMetrics, Discipline, PriorityReport,
};

/// Optional probability queries for the unbounded models.
///
/// Each field is independent: `n` adds `Pn`, `r` adds `PnMaiorQueR`, `t` adds the
/// time-exceedance probabilities. An absent field is never treated as zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Query {
    pub n: Option<i64>,
    pub r: Option<i64>,
    pub t: Option<f64>,
}

impl Query {
    pub fn state(n: i64) -> Self {
        Self {
            n: Some(n),
            ..Self::default()
        }
    }

    pub fn tail(r: i64) -> Self {
        Self {
            r: Some(r),
            ..Self::default()
        }
    }

    pub fn time(t: f64) -> Self {
        Self {
            t: Some(t),
            ..Self::default()
        }
    }
}

pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::NonPositive { name, value });
    }
    Ok(())
}

pub(crate) fn require_non_negative(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::Negative { name, value });
    }
    Ok(())
}

pub(crate) fn require_count(name: &'static str, value: u32) -> Result<()> {
    if value == 0 {
        return Err(Error::NonPositive {
            name,
            value: f64::from(value),
        });
    }
    Ok(())
}

pub(crate) fn require_stable(rho: f64) -> Result<()> {
    if rho >= 1.0 {
        return Err(Error::Unstable { rho });
    }
    Ok(())
}

/// Index with no upper bound, only non-negativity.
pub(crate) fn unbounded_index(name: &'static str, value: i64) -> Result<u32> {
    if value < 0 {
        return Err(Error::Negative {
            name,
            value: value as f64,
        });
    }
    u32::try_from(value).map_err(|_| Error::OutOfRange {
        name,
        value,
        min: 0,
        max: i64::from(u32::MAX),
    })
}

/// Index into a bounded state space `0..=max`.
pub(crate) fn state_index(name: &'static str, value: i64, max: u32) -> Result<u32> {
    if value < 0 || value > i64::from(max) {
        return Err(Error::OutOfRange {
            name,
            value,
            min: 0,
            max: i64::from(max),
        });
    }
    Ok(value as u32)
}

/// Unnormalized weight of state `n` in a multi-server chain: `a^n / n!` below
/// `servers`, `a^n / (s! * s^(n - s))` from `servers` on.
pub(crate) fn multi_server_weight(offered: f64, servers: u32, n: u32) -> f64 {
    if n < servers {
        power_over_factorial(offered, n)
    } else {
        power_over_factorial(offered, servers)
            * (offered / f64::from(servers)).powf(f64::from(n - servers))
    }
}

// Weights are rescaled once they pass this bound so heavy loads never overflow.
const RESCALE_LIMIT: f64 = 1e200;

/// Stationary distribution of a birth-death chain on `0..=capacity` with
/// offered load `offered` and `min(n, servers)` busy servers in state `n`.
///
/// Built from the ratio `P(n) / P(n - 1)` and summed over the bounded state
/// space, so it holds for every load including `rho` at or near 1.
pub(crate) fn truncated_distribution(offered: f64, servers: u32, capacity: u32) -> Vec<f64> {
    let mut weights = Vec::with_capacity(capacity as usize + 1);
    let mut current = 1.0;
    weights.push(current);
    for state in 1..=capacity {
        let ratio = offered / f64::from(state.min(servers));
        if current * ratio > RESCALE_LIMIT {
            for weight in weights.iter_mut() {
                *weight /= current;
            }
            current = 1.0;
        }
        current *= ratio;
        weights.push(current);
    }
    let total: f64 = weights.iter().sum();
    weights.into_iter().map(|weight| weight / total).collect()
}

/// `sum (n - floor) * P(n)` over the states above `floor`.
pub(crate) fn expected_excess(probabilities: &[f64], floor: usize) -> f64 {
    probabilities
        .iter()
        .enumerate()
        .skip(floor + 1)
        .map(|(state, p)| (state - floor) as f64 * p)
        .sum()
}

/// Little's law division that reports 0 when nothing enters the system.
pub(crate) fn per_arrival(count: f64, rate: f64) -> f64 {
    if rate == 0.0 {
        0.0
    } else {
        count / rate
    }
}

#[cfg(test)]
pub(crate) fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} (±{tolerance}), got {actual}"
    );
}
