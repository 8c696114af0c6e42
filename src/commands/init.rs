use crate::commands::{open, save, Out};
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;
use tracing::debug;

/// Creates the data directory, its subdirectories and:
/// - Creates an initial `config.json` file with default settings
/// - Creates an empty `budget.json`
///
/// Running it again is harmless: an existing `config.json` or `budget.json` is kept as it is.
///
/// # Arguments
/// - `cashwise_home` - The directory that will be the root of data directory, e.g.
///   `$HOME/cashwise`
///
/// # Errors
/// - Returns an error if any file operations fail.
pub async fn init(cashwise_home: &Path) -> Result<Out<()>> {
    let config = Config::create(cashwise_home)
        .await
        .context("Unable to create the data directory and configs")
        .pub_result(ErrorType::Config)?;

    if config.store_path().is_file() {
        debug!("Keeping the existing {}", config.store_path().display());
    } else {
        save(&open(&config).await?).await?;
    }
    Ok(format!(
        "Successfully created the cashwise directory at {}",
        config.root().display()
    )
    .into())
}
