use tracing::debug;

use crate::error::{Error, Result};
use crate::metrics::{Metric, MetricsResult};
use crate::queues::{
    expected_excess, per_arrival, require_positive, state_index, truncated_distribution,
};

/// M/M/s/K: `servers` parallel servers, at most `capacity` customers present.
pub fn calculate_mmsk(
    lambda: f64,
    mu: f64,
    servers: u32,
    capacity: u32,
    n: Option<i64>,
) -> Result<MetricsResult> {
    require_positive("lambda", lambda)?;
    require_positive("mu", mu)?;
    if servers < 2 {
        return Err(Error::InvalidParameter(format!(
            "s must be at least 2 (got {servers})"
        )));
    }
    if capacity < servers {
        return Err(Error::InvalidParameter(format!(
            "K must be at least s (got K = {capacity}, s = {servers})"
        )));
    }

    let rho = lambda / (f64::from(servers) * mu);
    let probabilities = truncated_distribution(lambda / mu, servers, capacity);
    debug!(servers, capacity, rho, "evaluated M/M/s/K state distribution");

    let p0 = probabilities[0];
    let pk = probabilities[capacity as usize];
    let lambda_eff = lambda * (1.0 - pk);
    let l = expected_excess(&probabilities, 0);
    let lq = expected_excess(&probabilities, servers as usize);
    let w = per_arrival(l, lambda_eff);
    let wq = per_arrival(lq, lambda_eff);

    let mut metrics = MetricsResult::baseline(rho, p0, l, lq, w, wq);
    metrics.insert(Metric::BlockingProbability, pk);
    metrics.insert(Metric::EffectiveArrivalRate, lambda_eff);

    if let Some(n) = n {
        let n = state_index("n", n, capacity)?;
        metrics.insert(Metric::N, f64::from(n));
        metrics.insert(Metric::Pn, probabilities[n as usize]);
    }

    metrics.checked()
}
