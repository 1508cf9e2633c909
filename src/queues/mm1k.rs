use tracing::debug;

use crate::error::Result;
use crate::metrics::{Metric, MetricsResult};
use crate::queues::{
    expected_excess, per_arrival, require_count, require_positive, state_index,
    truncated_distribution,
};

/// M/M/1/K: one server, at most `k` customers present.
///
/// `rho` may exceed 1; the capacity bound keeps the chain ergodic.
pub fn calculate_mm1k(lambda: f64, mu: f64, k: u32, n: Option<i64>) -> Result<MetricsResult> {
    require_positive("lambda", lambda)?;
    require_positive("mu", mu)?;
    require_count("K", k)?;

    let rho = lambda / mu;
    let probabilities = truncated_distribution(rho, 1, k);
    debug!(k, rho, "evaluated M/M/1/K state distribution");

    let p0 = probabilities[0];
    let pk = probabilities[k as usize];
    let lambda_eff = lambda * (1.0 - pk);
    let l = expected_excess(&probabilities, 0);
    let lq = expected_excess(&probabilities, 1);
    let w = per_arrival(l, lambda_eff);
    let wq = per_arrival(lq, lambda_eff);

    let mut metrics = MetricsResult::baseline(rho, p0, l, lq, w, wq);
    metrics.insert(Metric::BlockingProbability, pk);
    metrics.insert(Metric::EffectiveArrivalRate, lambda_eff);

    if let Some(n) = n {
        let n = state_index("n", n, k)?;
        metrics.insert(Metric::N, f64::from(n));
        metrics.insert(Metric::Pn, probabilities[n as usize]);
    }

    metrics.checked()
}
