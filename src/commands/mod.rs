//! Command handlers for the cashwise CLI.
//!
//! This module contains implementations for all CLI subcommands. Each handler loads the store,
//! does its work, saves the store if anything changed, and returns an `Out`.

mod accounts;
mod entries;
mod export;
mod goals;
mod init;
mod report;

use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result, Store};
use serde::Serialize;
use std::fmt::Debug;
use tracing::info;

pub use accounts::account;
pub use entries::{balance, budget, carry, expense, income, note, show, MonthSummary};
pub use export::export;
pub use goals::{goal, recurring};
pub use init::init;
pub use report::{chart_groups, chart_income, report_groups, report_income};

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to stdout.
    pub fn print(&self) -> Result<()> {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            let json = serde_json::to_string_pretty(structure).pub_result(ErrorType::Export)?;
            println!("{json}");
        }
        Ok(())
    }
}

async fn open(config: &Config) -> Result<Store> {
    Store::load(config).await.pub_result(ErrorType::Store)
}

async fn save(store: &Store) -> Result<()> {
    store.save().await.pub_result(ErrorType::Store)
}
