use crate::combinatorics::binomial_row;
use crate::error::Result;
use crate::metrics::{Metric, MetricsResult};
use crate::queues::{expected_excess, per_arrival, require_count, require_positive, state_index};

/// M/M/1/N: one server fed by a closed population of `population` sources.
///
/// Each source outside the system arrives at rate `lambda`; utilization is
/// reported population-wide as `N * lambda / mu`.
pub fn calculate_mm1n(
    lambda: f64,
    mu: f64,
    population: u32,
    n: Option<i64>,
) -> Result<MetricsResult> {
    require_positive("lambda", lambda)?;
    require_positive("mu", mu)?;
    require_count("N", population)?;

    let ratio = lambda / mu;
    let size = f64::from(population);
    let rho = size * lambda / mu;

    let mut power = 1.0;
    let weights: Vec<f64> = binomial_row(population)
        .into_iter()
        .map(|coefficient| {
            let weight = coefficient * power;
            power *= ratio;
            weight
        })
        .collect();
    let p0 = 1.0 / weights.iter().sum::<f64>();
    let probabilities: Vec<f64> = weights.iter().map(|weight| weight * p0).collect();

    let l = expected_excess(&probabilities, 0);
    let lq = expected_excess(&probabilities, 1);

    let lambda_eff = lambda * (size - l);
    let w = per_arrival(l, lambda_eff);
    let wq = per_arrival(lq, lambda_eff);

    let mut metrics = MetricsResult::baseline(rho, p0, l, lq, w, wq);
    metrics.insert(Metric::EffectiveArrivalRate, lambda_eff);
    metrics.insert(Metric::Operational, size - l);

    if let Some(n) = n {
        let n = state_index("n", n, population)?;
        metrics.insert(Metric::N, f64::from(n));
        metrics.insert(Metric::Pn, probabilities[n as usize]);
    }

    metrics.checked()
}
