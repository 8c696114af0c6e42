//! cashwise: a household budget kept in a single JSON file.
//!
//! The `store` module owns the budget document, `report` aggregates it into per-bucket spending
//! and an income time series, and `chart` and `export` turn those results into ECharts JSON and
//! CSV. The `commands` module wires all of it to the CLI.

pub mod args;
mod backup;
pub mod chart;
pub mod commands;
mod config;
mod error;
pub mod export;
pub mod model;
pub mod report;
pub mod store;
mod utils;


pub use backup::Backup;
pub use config::Config;
pub use error::{Error, ErrorType, IntoResult, Result};
pub use store::Store;
