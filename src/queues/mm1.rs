use crate::error::Result;
use crate::metrics::{Metric, MetricsResult};
use crate::queues::{require_non_negative, require_positive, require_stable, unbounded_index, Query};

/// M/M/1: one server, unbounded capacity and population.
pub fn calculate_mm1(lambda: f64, mu: f64, query: Query) -> Result<MetricsResult> {
    require_positive("lambda", lambda)?;
    require_positive("mu", mu)?;
    let rho = lambda / mu;
    require_stable(rho)?;

    let p0 = 1.0 - rho;
    let l = rho / (1.0 - rho);
    let lq = rho * rho / (1.0 - rho);
    let w = 1.0 / (mu - lambda);
    let wq = lambda / (mu * (mu - lambda));
    let mut metrics = MetricsResult::baseline(rho, p0, l, lq, w, wq);

    if let Some(n) = query.n {
        let n = unbounded_index("n", n)?;
        metrics.insert(Metric::N, f64::from(n));
        metrics.insert(Metric::Pn, p0 * rho.powf(f64::from(n)));
    }

    if let Some(r) = query.r {
        let r = unbounded_index("r", r)?;
        metrics.insert(Metric::R, f64::from(r));
        metrics.insert(Metric::TailProbability, rho.powf(f64::from(r) + 1.0));
    }

    if let Some(t) = query.t {
        require_non_negative("t", t)?;
        let decay = (-(mu - lambda) * t).exp();
        metrics.insert(Metric::T, t);
        metrics.insert(Metric::SojournExceedsT, decay);
        metrics.insert(Metric::WaitExceedsT, rho * decay);
    }

    metrics.checked()
}
