use crate::combinatorics::power_over_factorial;
use crate::error::Result;
use crate::metrics::{Metric, MetricsResult};
use crate::queues::{
    multi_server_weight, require_count, require_non_negative, require_positive, require_stable,
    unbounded_index, Query,
};

/// M/M/s: `servers` parallel servers sharing one unbounded queue.
pub fn calculate_mms(lambda: f64, mu: f64, servers: u32, query: Query) -> Result<MetricsResult> {
    require_positive("lambda", lambda)?;
    require_positive("mu", mu)?;
    require_count("s", servers)?;

    let s = f64::from(servers);
    let rho = lambda / (s * mu);
    require_stable(rho)?;

    let erlang = Erlang::new(lambda / mu, rho, servers);
    let p0 = erlang.p0;
    let lq = p0 * power_over_factorial(erlang.offered, servers) * rho / (1.0 - rho).powi(2);
    let l = lq + lambda / mu;
    let wq = lq / lambda;
    let w = wq + 1.0 / mu;
    let wait_probability = erlang.wait_probability();

    let mut metrics = MetricsResult::baseline(rho, p0, l, lq, w, wq);
    metrics.insert(Metric::NoWaitProbability, 1.0 - wait_probability);

    if let Some(n) = query.n {
        let n = unbounded_index("n", n)?;
        metrics.insert(Metric::N, f64::from(n));
        metrics.insert(Metric::Pn, erlang.state_probability(n));
    }

    if let Some(r) = query.r {
        let r = unbounded_index("r", r)?;
        let tail = if r >= servers {
            erlang.state_probability(r) * rho / (1.0 - rho)
        } else {
            1.0 - (0..=r).map(|i| erlang.state_probability(i)).sum::<f64>()
        };
        metrics.insert(Metric::R, f64::from(r));
        metrics.insert(Metric::TailProbability, tail);
    }

    if let Some(t) = query.t {
        require_non_negative("t", t)?;
        let drain = s * mu * (1.0 - rho);
        let sojourn = if t > 1.0 / mu {
            wait_probability * (-drain * (t - 1.0 / mu)).exp()
        } else {
            1.0
        };
        metrics.insert(Metric::T, t);
        metrics.insert(Metric::WaitExceedsT, wait_probability * (-drain * t).exp());
        metrics.insert(Metric::SojournExceedsT, sojourn);
    }

    metrics.checked()
}

/// Erlang-C normalization for an infinite-capacity multi-server queue.
struct Erlang {
    offered: f64,
    rho: f64,
    servers: u32,
    p0: f64,
}

impl Erlang {
    fn new(offered: f64, rho: f64, servers: u32) -> Self {
        let below: f64 = (0..servers)
            .map(|n| power_over_factorial(offered, n))
            .sum();
        let queued = power_over_factorial(offered, servers) / (1.0 - rho);
        Self {
            offered,
            rho,
            servers,
            p0: 1.0 / (below + queued),
        }
    }

    /// Erlang-C probability that an arrival has to wait.
    fn wait_probability(&self) -> f64 {
        self.p0 * power_over_factorial(self.offered, self.servers) / (1.0 - self.rho)
    }

    fn state_probability(&self, n: u32) -> f64 {
        self.p0 * multi_server_weight(self.offered, self.servers, n)
    }
}
