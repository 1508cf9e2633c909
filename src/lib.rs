pub mod cli;
pub mod combinatorics;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod output;
pub mod queues;
