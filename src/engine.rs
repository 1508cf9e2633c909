use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::metrics::MetricsResult;
use crate::models::ModelConfig;
use crate::queues::{
    calculate_mg1, calculate_mm1, calculate_mm1k, calculate_mm1n, calculate_mms, calculate_mmsk,
    calculate_mmsn, calculate_priority, PriorityReport,
};

/// Outcome of one scenario: a flat metric mapping, or per-class records for the
/// priority models.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
    Metrics(MetricsResult),
    Priority(PriorityReport),
}

impl Report {
    pub fn metrics(&self) -> Option<&MetricsResult> {
        match self {
            Report::Metrics(metrics) => Some(metrics),
            Report::Priority(_) => None,
        }
    }

    pub fn priority(&self) -> Option<&PriorityReport> {
        match self {
            Report::Priority(report) => Some(report),
            Report::Metrics(_) => None,
        }
    }
}

pub fn evaluate(config: &ModelConfig) -> Result<Report> {
    debug!(model = config.id(), "evaluating scenario");
    let result = dispatch(config);
    match &result {
        Ok(_) => debug!(model = config.id(), "scenario evaluated"),
        Err(err) => info!(model = config.id(), error = %err, "scenario rejected"),
    }
    result
}

fn dispatch(config: &ModelConfig) -> Result<Report> {
    let report = match config {
        ModelConfig::Mm1(params) => {
            Report::Metrics(calculate_mm1(params.lambda, params.mu, params.query())?)
        }
        ModelConfig::Mm1k(params) => Report::Metrics(calculate_mm1k(
            params.lambda,
            params.mu,
            params.capacity,
            params.n,
        )?),
        ModelConfig::Mm1n(params) => Report::Metrics(calculate_mm1n(
            params.lambda,
            params.mu,
            params.population,
            params.n,
        )?),
        ModelConfig::Mg1(params) => Report::Metrics(calculate_mg1(
            params.lambda,
            params.resolved_mean_service()?,
            params.var_service.unwrap_or(0.0),
        )?),
        ModelConfig::Mms(params) => Report::Metrics(calculate_mms(
            params.lambda,
            params.mu,
            params.s,
            params.query(),
        )?),
        ModelConfig::Mmsk(params) => Report::Metrics(calculate_mmsk(
            params.lambda,
            params.mu,
            params.s,
            params.capacity,
            params.n,
        )?),
        ModelConfig::Mmsn(params) => Report::Metrics(calculate_mmsn(
            params.lambda,
            params.mu,
            params.s,
            params.population,
            params.n,
        )?),
        ModelConfig::Priority(params) => Report::Priority(calculate_priority(
            params.s,
            params.mu,
            &params.lambdas,
            params.discipline,
        )?),
    };
    Ok(report)
}
