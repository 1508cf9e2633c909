//! M/M/s with ordered priority classes sharing one pool of servers.
//!
//! Classes are supplied from highest to lowest priority. Both disciplines
//! accumulate `sigma_k`, the fraction of total capacity consumed by classes of
//! rank `<= k`, and derive each class's sojourn time from `sigma_{k-1}` and
//! `sigma_k`:
//!
//! - preemptive-resume: `W_k = (1/mu) / ((1 - sigma_{k-1}) (1 - sigma_k))`
//! - non-preemptive: `W_k = 1 / (A (1 - sigma_{k-1}) (1 - sigma_k)) + 1/mu`, where
//!   `A = s! (s mu - lambda) / r^s * sum_{j<s} r^j / j! + s mu` and `r = lambda / mu`.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::combinatorics::power_over_factorial;
use crate::error::{Error, Result};
use crate::queues::{require_count, require_positive, require_stable};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Discipline {
    #[default]
    Preemptive,
    NonPreemptive,
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Discipline::Preemptive => "preemptive",
            Discipline::NonPreemptive => "non-preemptive",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClassMetrics {
    #[serde(rename = "classRank")]
    pub rank: usize,
    #[serde(rename = "L")]
    pub l: f64,
    #[serde(rename = "Lq")]
    pub lq: f64,
    #[serde(rename = "W")]
    pub w: f64,
    #[serde(rename = "Wq")]
    pub wq: f64,
    pub lambda: f64,
    pub sigma: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PriorityReport {
    #[serde(skip)]
    pub discipline: Discipline,
    pub rho: f64,
    #[serde(rename = "lambdaTotal")]
    pub lambda_total: f64,
    #[serde(rename = "capacidadeTotal")]
    pub capacity: f64,
    /// Residual-service constant `A`; only the non-preemptive discipline has one.
    #[serde(rename = "termoA", skip_serializing_if = "Option::is_none")]
    pub residual_term: Option<f64>,
    pub classes: Vec<ClassMetrics>,
}

impl PriorityReport {
    fn checked(self) -> Result<Self> {
        let system = [
            ("rho", Some(self.rho)),
            ("lambdaTotal", Some(self.lambda_total)),
            ("capacidadeTotal", Some(self.capacity)),
            ("termoA", self.residual_term),
        ];
        for (name, value) in system {
            if value.is_some_and(|value| !value.is_finite()) {
                return Err(Error::Computation(name));
            }
        }
        for class in &self.classes {
            let values = [
                ("L", class.l),
                ("Lq", class.lq),
                ("W", class.w),
                ("Wq", class.wq),
                ("sigma", class.sigma),
            ];
            if let Some((name, _)) = values.iter().find(|(_, value)| !value.is_finite()) {
                return Err(Error::Computation(*name));
            }
        }
        Ok(self)
    }
}

pub fn calculate_priority(
    servers: u32,
    mu: f64,
    lambdas: &[f64],
    discipline: Discipline,
) -> Result<PriorityReport> {
    require_count("s", servers)?;
    require_positive("mu", mu)?;
    if lambdas.is_empty() {
        return Err(Error::InvalidParameter(
            "at least one priority class is required".to_string(),
        ));
    }
    for lambda in lambdas {
        require_positive("lambda", *lambda)?;
    }

    let lambda_total: f64 = lambdas.iter().sum();
    let capacity = f64::from(servers) * mu;
    let rho = lambda_total / capacity;
    require_stable(rho)?;

    let residual_term = match discipline {
        Discipline::Preemptive => None,
        Discipline::NonPreemptive => Some(residual_term(servers, mu, lambda_total)),
    };

    let mut classes = Vec::with_capacity(lambdas.len());
    let mut sigma_prev = 0.0;
    for (idx, &lambda) in lambdas.iter().enumerate() {
        let sigma = sigma_prev + lambda / capacity;
        let congestion = (1.0 - sigma_prev) * (1.0 - sigma);
        let w = match residual_term {
            None => (1.0 / mu) / congestion,
            Some(a) => 1.0 / (a * congestion) + 1.0 / mu,
        };
        let wq = w - 1.0 / mu;
        classes.push(ClassMetrics {
            rank: idx + 1,
            l: lambda * w,
            lq: lambda * wq,
            w,
            wq,
            lambda,
            sigma,
        });
        sigma_prev = sigma;
    }

    debug!(
        %discipline,
        servers,
        classes = classes.len(),
        rho,
        "evaluated priority classes"
    );

    PriorityReport {
        discipline,
        rho,
        lambda_total,
        capacity,
        residual_term,
        classes,
    }
    .checked()
}

pub fn calculate_priority_preemptive(
    servers: u32,
    mu: f64,
    lambdas: &[f64],
) -> Result<PriorityReport> {
    calculate_priority(servers, mu, lambdas, Discipline::Preemptive)
}

pub fn calculate_priority_non_preemptive(
    servers: u32,
    mu: f64,
    lambdas: &[f64],
) -> Result<PriorityReport> {
    calculate_priority(servers, mu, lambdas, Discipline::NonPreemptive)
}

fn residual_term(servers: u32, mu: f64, lambda_total: f64) -> f64 {
    let offered = lambda_total / mu;
    let capacity = f64::from(servers) * mu;
    let partial: f64 = (0..servers)
        .map(|j| power_over_factorial(offered, j))
        .sum();
    // s! / r^s folded into a single ratio.
    (capacity - lambda_total) * partial / power_over_factorial(offered, servers) + capacity
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ErrorKind};
    use crate::queues::assert_close;

    const LAMBDAS: [f64; 3] = [2.0, 3.0, 1.0];

    #[test]
    fn preemptive_sojourn_times() {
        let report = calculate_priority_preemptive(2, 5.0, &LAMBDAS).unwrap();
        assert_close(report.rho, 0.6, 1e-12);
        assert_close(report.lambda_total, 6.0, 1e-12);
        assert_close(report.capacity, 10.0, 1e-12);
        assert!(report.residual_term.is_none());

        let w: Vec<f64> = report.classes.iter().map(|class| class.w).collect();
        assert_close(w[0], 0.25, 1e-12);
        assert_close(w[1], 0.5, 1e-12);
        assert_close(w[2], 1.0, 1e-12);

        let first = &report.classes[0];
        assert_eq!(first.rank, 1);
        assert_close(first.wq, 0.05, 1e-12);
        assert_close(first.l, 0.5, 1e-12);
        assert_close(first.lq, 0.1, 1e-12);
    }

    #[test]
    fn non_preemptive_uses_residual_term() {
        let report = calculate_priority_non_preemptive(2, 5.0, &LAMBDAS).unwrap();
        let a = report.residual_term.unwrap();
        assert_close(a, 22.222_222, 1e-5);
        assert_close(report.classes[0].w, 1.0 / (a * 0.8) + 0.2, 1e-12);
        assert_close(report.classes[2].w, 1.0 / (a * 0.5 * 0.4) + 0.2, 1e-12);
    }

    #[test]
    fn sigma_is_cumulative_and_ends_at_rho() {
        for discipline in [Discipline::Preemptive, Discipline::NonPreemptive] {
            let report = calculate_priority(2, 5.0, &LAMBDAS, discipline).unwrap();
            let sigmas: Vec<f64> = report.classes.iter().map(|class| class.sigma).collect();
            assert!(sigmas.windows(2).all(|pair| pair[0] <= pair[1]));
            assert_close(*sigmas.last().unwrap(), report.rho, 1e-12);
        }
    }

    #[test]
    fn lower_priority_waits_longer() {
        let report = calculate_priority_non_preemptive(3, 2.0, &[1.0, 1.0, 1.0, 1.0]).unwrap();
        let waits: Vec<f64> = report.classes.iter().map(|class| class.wq).collect();
        assert!(waits.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn saturated_system_is_unstable_for_both_disciplines() {
        for discipline in [Discipline::Preemptive, Discipline::NonPreemptive] {
            let err = calculate_priority(2, 5.0, &[4.0, 6.0], discipline).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Stability);
        }
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        assert!(calculate_priority_preemptive(2, 5.0, &[]).is_err());
        assert!(calculate_priority_preemptive(0, 5.0, &LAMBDAS).is_err());
        assert!(calculate_priority_preemptive(2, 0.0, &LAMBDAS).is_err());
        assert!(calculate_priority_preemptive(2, 5.0, &[1.0, -1.0]).is_err());
    }

    #[test]
    fn non_finite_values_are_reported_by_name() {
        let report = calculate_priority_preemptive(2, 5.0, &LAMBDAS).unwrap();

        let mut broken = report.clone();
        broken.rho = f64::NAN;
        assert!(matches!(broken.checked(), Err(Error::Computation("rho"))));

        let mut broken = report.clone();
        broken.lambda_total = f64::INFINITY;
        assert!(matches!(broken.checked(), Err(Error::Computation("lambdaTotal"))));

        let mut broken = report.clone();
        broken.residual_term = Some(f64::NAN);
        assert!(matches!(broken.checked(), Err(Error::Computation("termoA"))));

        let mut broken = report;
        broken.classes[1].wq = f64::INFINITY;
        assert!(matches!(broken.checked(), Err(Error::Computation("Wq"))));
    }

    #[test]
    fn serializes_with_wire_names() {
        let report = calculate_priority_non_preemptive(2, 5.0, &LAMBDAS).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["lambdaTotal"], 6.0);
        assert_eq!(json["capacidadeTotal"], 10.0);
        assert!(json["termoA"].is_number());
        assert_eq!(json["classes"][1]["classRank"], 2);
        assert!(json.get("discipline").is_none());

        let preemptive = calculate_priority_preemptive(2, 5.0, &LAMBDAS).unwrap();
        let json = serde_json::to_value(&preemptive).unwrap();
        assert!(json.get("termoA").is_none());
    }
}
