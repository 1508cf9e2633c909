use clap::error::ErrorKind as ClapErrorKind;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::load_config;
use crate::error::{Error, Result};
use crate::models::{
    Mg1Config, Mm1Config, Mm1kConfig, Mm1nConfig, MmsConfig, MmskConfig, MmsnConfig, ModelConfig,
    PriorityConfig,
};
use crate::queues::Discipline;

#[derive(Parser, Debug)]
#[command(
    name = "queue-calc",
    version,
    about = "Steady-state metrics for birth-death queueing models"
)]
pub struct Args {
    #[arg(long, value_enum, default_value_t = FormatArg::Human, global = true)]
    pub format: FormatArg,
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum FormatArg {
    Human,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// M/M/1: one server, unbounded capacity
    Mm1(Mm1Args),
    /// M/M/1/K: one server, at most K customers present
    Mm1k(Mm1kArgs),
    /// M/M/1/N: one server, closed population of N sources
    Mm1n(Mm1nArgs),
    /// M/G/1: one server, general service given by mean and variance
    Mg1(Mg1Args),
    /// M/M/s: s servers, unbounded capacity
    Mms(MmsArgs),
    /// M/M/s/K: s servers, at most K customers present
    Mmsk(MmskArgs),
    /// M/M/s/N: s servers, closed population of N sources
    Mmsn(MmsnArgs),
    /// M/M/s with ordered priority classes
    Priority(PriorityArgs),
    /// Evaluate a scenario described in a TOML or JSON file
    Run {
        #[arg(long)]
        config: PathBuf,
    },
    /// Print the supported model identifiers
    ListModels,
}

#[derive(ClapArgs, Debug)]
pub struct RateArgs {
    /// Arrival rate
    #[arg(long, allow_negative_numbers = true)]
    pub lambda: f64,
    /// Service rate per server
    #[arg(long, allow_negative_numbers = true)]
    pub mu: f64,
}

#[derive(ClapArgs, Debug)]
pub struct StateArgs {
    /// Report P(n) for this number of customers
    #[arg(short = 'n', long = "state", allow_negative_numbers = true)]
    pub n: Option<i64>,
}

#[derive(ClapArgs, Debug)]
pub struct QueryArgs {
    #[command(flatten)]
    pub state: StateArgs,
    /// Report P(more than r customers)
    #[arg(short = 'r', long = "tail", allow_negative_numbers = true)]
    pub r: Option<i64>,
    /// Report P(W > t) and P(Wq > t)
    #[arg(short = 't', long = "time", allow_negative_numbers = true)]
    pub t: Option<f64>,
}

#[derive(ClapArgs, Debug)]
pub struct Mm1Args {
    #[command(flatten)]
    pub rates: RateArgs,
    #[command(flatten)]
    pub query: QueryArgs,
}

#[derive(ClapArgs, Debug)]
pub struct Mm1kArgs {
    #[command(flatten)]
    pub rates: RateArgs,
    /// System capacity
    #[arg(short = 'K', long)]
    pub capacity: u32,
    #[command(flatten)]
    pub state: StateArgs,
}

#[derive(ClapArgs, Debug)]
pub struct Mm1nArgs {
    #[command(flatten)]
    pub rates: RateArgs,
    /// Population size
    #[arg(short = 'N', long)]
    pub population: u32,
    #[command(flatten)]
    pub state: StateArgs,
}

#[derive(ClapArgs, Debug)]
pub struct Mg1Args {
    /// Arrival rate
    #[arg(long, allow_negative_numbers = true)]
    pub lambda: f64,
    /// Mean service time
    #[arg(
        long,
        allow_negative_numbers = true,
        required_unless_present = "mu",
        conflicts_with = "mu"
    )]
    pub mean_service: Option<f64>,
    /// Service rate, as an alternative to --mean-service
    #[arg(long, allow_negative_numbers = true)]
    pub mu: Option<f64>,
    /// Service time variance (0 when omitted)
    #[arg(long, allow_negative_numbers = true)]
    pub var_service: Option<f64>,
}

#[derive(ClapArgs, Debug)]
pub struct MmsArgs {
    #[command(flatten)]
    pub rates: RateArgs,
    /// Number of servers
    #[arg(short = 's', long)]
    pub servers: u32,
    #[command(flatten)]
    pub query: QueryArgs,
}

#[derive(ClapArgs, Debug)]
pub struct MmskArgs {
    #[command(flatten)]
    pub rates: RateArgs,
    /// Number of servers
    #[arg(short = 's', long)]
    pub servers: u32,
    /// System capacity
    #[arg(short = 'K', long)]
    pub capacity: u32,
    #[command(flatten)]
    pub state: StateArgs,
}

#[derive(ClapArgs, Debug)]
pub struct MmsnArgs {
    #[command(flatten)]
    pub rates: RateArgs,
    /// Number of servers
    #[arg(short = 's', long)]
    pub servers: u32,
    /// Population size
    #[arg(short = 'N', long)]
    pub population: u32,
    #[command(flatten)]
    pub state: StateArgs,
}

#[derive(ClapArgs, Debug)]
pub struct PriorityArgs {
    /// Number of servers
    #[arg(short = 's', long)]
    pub servers: u32,
    /// Service rate per server
    #[arg(long, allow_negative_numbers = true)]
    pub mu: f64,
    /// Arrival rate per class, highest priority first (comma separated)
    #[arg(
        long,
        required = true,
        value_delimiter = ',',
        allow_negative_numbers = true
    )]
    pub lambdas: Vec<f64>,
    #[arg(long, value_enum, default_value_t = DisciplineArg::Preemptive)]
    pub discipline: DisciplineArg,
}

#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum DisciplineArg {
    Preemptive,
    NonPreemptive,
}

impl From<DisciplineArg> for Discipline {
    fn from(value: DisciplineArg) -> Self {
        match value {
            DisciplineArg::Preemptive => Discipline::Preemptive,
            DisciplineArg::NonPreemptive => Discipline::NonPreemptive,
        }
    }
}

/// What the binary should do once arguments are resolved.
#[derive(Debug, PartialEq)]
pub enum Invocation {
    Evaluate(ModelConfig),
    ListModels,
}

pub fn parse_args() -> Result<Args> {
    Args::try_parse().map_err(|err| match err.kind() {
        ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => err.exit(),
        _ => Error::Cli(err.to_string().trim_end().to_string()),
    })
}

pub fn resolve(command: Command) -> Result<Invocation> {
    let model = match command {
        Command::ListModels => return Ok(Invocation::ListModels),
        Command::Run { config } => load_config(&config)?,
        Command::Mm1(args) => ModelConfig::Mm1(Mm1Config {
            lambda: args.rates.lambda,
            mu: args.rates.mu,
            n: args.query.state.n,
            r: args.query.r,
            t: args.query.t,
        }),
        Command::Mm1k(args) => ModelConfig::Mm1k(Mm1kConfig {
            lambda: args.rates.lambda,
            mu: args.rates.mu,
            capacity: args.capacity,
            n: args.state.n,
        }),
        Command::Mm1n(args) => ModelConfig::Mm1n(Mm1nConfig {
            lambda: args.rates.lambda,
            mu: args.rates.mu,
            population: args.population,
            n: args.state.n,
        }),
        Command::Mg1(args) => ModelConfig::Mg1(Mg1Config {
            lambda: args.lambda,
            mean_service: args.mean_service,
            mu: args.mu,
            var_service: args.var_service,
        }),
        Command::Mms(args) => ModelConfig::Mms(MmsConfig {
            lambda: args.rates.lambda,
            mu: args.rates.mu,
            s: args.servers,
            n: args.query.state.n,
            r: args.query.r,
            t: args.query.t,
        }),
        Command::Mmsk(args) => ModelConfig::Mmsk(MmskConfig {
            lambda: args.rates.lambda,
            mu: args.rates.mu,
            s: args.servers,
            capacity: args.capacity,
            n: args.state.n,
        }),
        Command::Mmsn(args) => ModelConfig::Mmsn(MmsnConfig {
            lambda: args.rates.lambda,
            mu: args.rates.mu,
            s: args.servers,
            population: args.population,
            n: args.state.n,
        }),
        Command::Priority(args) => ModelConfig::Priority(PriorityConfig {
            s: args.servers,
            mu: args.mu,
            lambdas: args.lambdas,
            discipline: args.discipline.into(),
        }),
    };
    Ok(Invocation::Evaluate(model))
}
