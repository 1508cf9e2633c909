use serde::Deserialize;

use crate::error::{Error, Result};
use crate::queues::{require_positive, Discipline, Query};

/// One scenario: a model selector plus that model's own parameters.
///
/// Field names follow the wire format (`lambda`, `mu`, `s`, `K`, `N`,
/// `meanService`, `varService`, `lambdas`, `discipline`, `n`, `r`, `t`). Optional
/// query fields that are absent stay `None`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(tag = "model", rename_all = "lowercase")]
pub enum ModelConfig {
    Mm1(Mm1Config),
    Mm1k(Mm1kConfig),
    Mm1n(Mm1nConfig),
    Mg1(Mg1Config),
    Mms(MmsConfig),
    Mmsk(MmskConfig),
    Mmsn(MmsnConfig),
    Priority(PriorityConfig),
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Mm1Config {
    pub lambda: f64,
    pub mu: f64,
    #[serde(default)]
    pub n: Option<i64>,
    #[serde(default)]
    pub r: Option<i64>,
    #[serde(default)]
    pub t: Option<f64>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Mm1kConfig {
    pub lambda: f64,
    pub mu: f64,
    #[serde(rename = "K")]
    pub capacity: u32,
    #[serde(default)]
    pub n: Option<i64>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Mm1nConfig {
    pub lambda: f64,
    pub mu: f64,
    #[serde(rename = "N")]
    pub population: u32,
    #[serde(default)]
    pub n: Option<i64>,
}

/// Service is given either as `meanService` or as a rate `mu`; `varService`
/// defaults to 0 (deterministic service).
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Mg1Config {
    pub lambda: f64,
    #[serde(rename = "meanService", default)]
    pub mean_service: Option<f64>,
    #[serde(default)]
    pub mu: Option<f64>,
    #[serde(rename = "varService", default)]
    pub var_service: Option<f64>,
}

impl Mg1Config {
    pub fn resolved_mean_service(&self) -> Result<f64> {
        match (self.mean_service, self.mu) {
            (Some(mean), None) => Ok(mean),
            (None, Some(mu)) => {
                require_positive("mu", mu)?;
                Ok(1.0 / mu)
            }
            (Some(_), Some(_)) => Err(Error::InvalidParameter(
                "give either meanService or mu, not both".to_string(),
            )),
            (None, None) => Err(Error::InvalidParameter(
                "meanService (or mu) is required".to_string(),
            )),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MmsConfig {
    pub lambda: f64,
    pub mu: f64,
    pub s: u32,
    #[serde(default)]
    pub n: Option<i64>,
    #[serde(default)]
    pub r: Option<i64>,
    #[serde(default)]
    pub t: Option<f64>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MmskConfig {
    pub lambda: f64,
    pub mu: f64,
    pub s: u32,
    #[serde(rename = "K")]
    pub capacity: u32,
    #[serde(default)]
    pub n: Option<i64>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MmsnConfig {
    pub lambda: f64,
    pub mu: f64,
    pub s: u32,
    #[serde(rename = "N")]
    pub population: u32,
    #[serde(default)]
    pub n: Option<i64>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PriorityConfig {
    pub s: u32,
    pub mu: f64,
    pub lambdas: Vec<f64>,
    #[serde(default)]
    pub discipline: Discipline,
}

impl ModelConfig {
    /// Identifiers accepted by the `model` field and as CLI subcommands.
    pub const IDS: [&'static str; 8] = [
        "mm1", "mm1k", "mm1n", "mg1", "mms", "mmsk", "mmsn", "priority",
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ModelConfig::Mm1(_) => "mm1",
            ModelConfig::Mm1k(_) => "mm1k",
            ModelConfig::Mm1n(_) => "mm1n",
            ModelConfig::Mg1(_) => "mg1",
            ModelConfig::Mms(_) => "mms",
            ModelConfig::Mmsk(_) => "mmsk",
            ModelConfig::Mmsn(_) => "mmsn",
            ModelConfig::Priority(_) => "priority",
        }
    }

    /// Kendall notation for display.
    pub fn label(&self) -> String {
        match self {
            ModelConfig::Mm1(_) => "M/M/1".to_string(),
            ModelConfig::Mm1k(_) => "M/M/1/K".to_string(),
            ModelConfig::Mm1n(_) => "M/M/1/N".to_string(),
            ModelConfig::Mg1(_) => "M/G/1".to_string(),
            ModelConfig::Mms(_) => "M/M/s".to_string(),
            ModelConfig::Mmsk(_) => "M/M/s/K".to_string(),
            ModelConfig::Mmsn(_) => "M/M/s/N".to_string(),
            ModelConfig::Priority(config) => format!("M/M/s priority ({})", config.discipline),
        }
    }
}

impl Mm1Config {
    pub fn query(&self) -> Query {
        Query {
            n: self.n,
            r: self.r,
            t: self.t,
        }
    }
}

impl MmsConfig {
    pub fn query(&self) -> Query {
        Query {
            n: self.n,
            r: self.r,
            t: self.t,
        }
    }
}
