//! Result container shared by the single- and multi-server models.
//!
//! Every model emits `rho`, `P0`, `L`, `Lq`, `W` and `Wq`. Finite-capacity models
//! add `PK`/`lambdaEfetivo`, finite-population models add
//! `numOperacionais`/`lambdaEfetivo`, and the multi-server models add
//! `PWqIgualZero`. Query-driven probabilities (`Pn`, `PnMaiorQueR`, `PWMaiorQueT`,
//! `PWqMaiorQueT`) only appear when the caller asked for them, next to the echoed
//! query value.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Metric {
    Rho,
    P0,
    L,
    Lq,
    W,
    Wq,
    BlockingProbability,
    EffectiveArrivalRate,
    Operational,
    NoWaitProbability,
    N,
    Pn,
    R,
    TailProbability,
    T,
    SojournExceedsT,
    WaitExceedsT,
}

impl Metric {
    /// Wire name of the metric.
    pub fn as_str(self) -> &'static str {
        match self {
            Metric::Rho => "rho",
            Metric::P0 => "P0",
            Metric::L => "L",
            Metric::Lq => "Lq",
            Metric::W => "W",
            Metric::Wq => "Wq",
            Metric::BlockingProbability => "PK",
            Metric::EffectiveArrivalRate => "lambdaEfetivo",
            Metric::Operational => "numOperacionais",
            Metric::NoWaitProbability => "PWqIgualZero",
            Metric::N => "n",
            Metric::Pn => "Pn",
            Metric::R => "r",
            Metric::TailProbability => "PnMaiorQueR",
            Metric::T => "t",
            Metric::SojournExceedsT => "PWMaiorQueT",
            Metric::WaitExceedsT => "PWqMaiorQueT",
        }
    }

    /// Echoed query arguments rather than computed measures.
    pub fn is_echo(self) -> bool {
        matches!(self, Metric::N | Metric::R | Metric::T)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetricsResult {
    values: BTreeMap<Metric, f64>,
}

impl MetricsResult {
    /// Baseline set every model emits.
    pub fn baseline(rho: f64, p0: f64, l: f64, lq: f64, w: f64, wq: f64) -> Self {
        let mut result = Self::default();
        result.insert(Metric::Rho, rho);
        result.insert(Metric::P0, p0);
        result.insert(Metric::L, l);
        result.insert(Metric::Lq, lq);
        result.insert(Metric::W, w);
        result.insert(Metric::Wq, wq);
        result
    }

    pub fn insert(&mut self, metric: Metric, value: f64) {
        self.values.insert(metric, value);
    }

    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.values.get(&metric).copied()
    }

    pub fn contains(&self, metric: Metric) -> bool {
        self.values.contains_key(&metric)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        self.values.iter().map(|(metric, value)| (*metric, *value))
    }

    /// Rejects the whole result if any value overflowed or went NaN.
    pub fn checked(self) -> Result<Self> {
        match self.values.iter().find(|(_, value)| !value.is_finite()) {
            Some((metric, _)) => Err(Error::Computation(metric.as_str())),
            None => Ok(self),
        }
    }
}

impl Serialize for MetricsResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (metric, value) in &self.values {
            map.serialize_entry(metric.as_str(), value)?;
        }
        map.end()
    }
}
