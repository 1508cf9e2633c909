use crate::combinatorics::{binomial_row, factorial};
use crate::error::{Error, Result};
use crate::metrics::{Metric, MetricsResult};
use crate::queues::{expected_excess, per_arrival, require_positive, state_index};

/// M/M/s/N: `servers` parallel servers fed by a closed population of
/// `population` sources.
pub fn calculate_mmsn(
    lambda: f64,
    mu: f64,
    servers: u32,
    population: u32,
    n: Option<i64>,
) -> Result<MetricsResult> {
    require_positive("lambda", lambda)?;
    require_positive("mu", mu)?;
    if servers < 2 {
        return Err(Error::InvalidParameter(format!(
            "s must be at least 2 (got {servers})"
        )));
    }
    if population <= servers {
        return Err(Error::InvalidParameter(format!(
            "N must be greater than s (got N = {population}, s = {servers})"
        )));
    }

    let ratio = lambda / mu;
    let s = f64::from(servers);
    let size = f64::from(population);
    let rho = size * lambda / (s * mu);
    let servers_factorial = factorial(servers);

    let mut power = 1.0;
    let weights: Vec<f64> = binomial_row(population)
        .into_iter()
        .zip(0..=population)
        .map(|(coefficient, state)| {
            let base = coefficient * power;
            power *= ratio;
            if state < servers {
                base
            } else {
                // s^(s - n) / s!, the exponent is zero or negative here.
                base * s.powf(f64::from(servers) - f64::from(state)) / servers_factorial
            }
        })
        .collect();
    let p0 = 1.0 / weights.iter().sum::<f64>();
    let probabilities: Vec<f64> = weights.iter().map(|weight| weight * p0).collect();

    let l = expected_excess(&probabilities, 0);
    let lq = expected_excess(&probabilities, servers as usize);
    let no_wait: f64 = probabilities.iter().take(servers as usize).sum();

    let lambda_eff = lambda * (size - l);
    let w = per_arrival(l, lambda_eff);
    let wq = per_arrival(lq, lambda_eff);

    let mut metrics = MetricsResult::baseline(rho, p0, l, lq, w, wq);
    metrics.insert(Metric::EffectiveArrivalRate, lambda_eff);
    metrics.insert(Metric::Operational, size - l);
    metrics.insert(Metric::NoWaitProbability, no_wait);

    if let Some(n) = n {
        let n = state_index("n", n, population)?;
        metrics.insert(Metric::N, f64::from(n));
        metrics.insert(Metric::Pn, probabilities[n as usize]);
    }

    metrics.checked()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queues::assert_close;

    #[test]
    fn small_population_by_hand() {
        // Weights for lambda/mu = 1, s = 2, N = 3: 1, 3, 1.5, 0.25.
        let result = calculate_mmsn(1.0, 1.0, 2, 3, Some(3)).unwrap();
        let total = 5.75;
        assert_close(result.get(Metric::P0).unwrap(), 1.0 / total, 1e-12);
        assert_close(result.get(Metric::Pn).unwrap(), 0.25 / total, 1e-12);
        assert_close(result.get(Metric::L).unwrap(), 6.75 / total, 1e-12);
        assert_close(result.get(Metric::Lq).unwrap(), 0.25 / total, 1e-12);
        assert_close(result.get(Metric::NoWaitProbability).unwrap(), 4.0 / total, 1e-12);
        assert_close(result.get(Metric::Rho).unwrap(), 1.5, 1e-12);
    }

    #[test]
    fn state_probabilities_partition_the_sample_space() {
        let total: f64 = (0..=6)
            .map(|n| {
                calculate_mmsn(0.4, 1.1, 3, 6, Some(n))
                    .unwrap()
                    .get(Metric::Pn)
                    .unwrap()
            })
            .sum();
        assert_close(total, 1.0, 1e-12);
    }

    #[test]
    fn littles_law_and_bounds() {
        let result = calculate_mmsn(0.7, 1.3, 2, 5, None).unwrap();
        let l = result.get(Metric::L).unwrap();
        let lq = result.get(Metric::Lq).unwrap();
        let lambda_eff = result.get(Metric::EffectiveArrivalRate).unwrap();
        assert!(l <= 5.0);
        assert!(l >= lq);
        assert_close(l, lambda_eff * result.get(Metric::W).unwrap(), 1e-12);
        assert_close(lq, lambda_eff * result.get(Metric::Wq).unwrap(), 1e-12);
        assert_close(result.get(Metric::Operational).unwrap(), 5.0 - l, 1e-12);
    }

    #[test]
    fn population_must_exceed_servers() {
        let err = calculate_mmsn(1.0, 1.0, 3, 3, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "N must be greater than s (got N = 3, s = 3)"
        );
        assert!(calculate_mmsn(1.0, 1.0, 1, 3, None).is_err());
    }

    #[test]
    fn state_query_is_bounded_by_population() {
        assert!(calculate_mmsn(1.0, 1.0, 2, 3, Some(4)).is_err());
        assert!(calculate_mmsn(1.0, 1.0, 2, 3, Some(-1)).is_err());
    }
}
