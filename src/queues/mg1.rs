use crate::error::Result;
use crate::metrics::MetricsResult;
use crate::queues::{require_non_negative, require_positive, require_stable};

/// M/G/1 via Pollaczek-Khinchin, using only the first two service-time moments.
pub fn calculate_mg1(lambda: f64, mean_service: f64, var_service: f64) -> Result<MetricsResult> {
    require_positive("lambda", lambda)?;
    require_positive("meanService", mean_service)?;
    require_non_negative("varService", var_service)?;

    let mu = 1.0 / mean_service;
    let rho = lambda / mu;
    require_stable(rho)?;

    let p0 = 1.0 - rho;
    let lq = (lambda * lambda * var_service + rho * rho) / (2.0 * (1.0 - rho));
    let wq = lq / lambda;
    let l = rho + lq;
    let w = wq + mean_service;

    MetricsResult::baseline(rho, p0, l, lq, w, wq).checked()
}
