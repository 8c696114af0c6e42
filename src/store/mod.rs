//! The budget store: the whole `BudgetData` document plus the place it is saved to.
//!
//! A `Store` is loaded once at the start of a command, changed in memory, and written back with
//! `save`. Reports are computed from the in-memory snapshot and never touch the file.

mod accounts;
mod entries;
mod goals;

use crate::backup::Backup;
use crate::error::Res;
use crate::model::{Amount, BudgetData, MonthKey, MonthRecord};
use crate::report::{self, GroupAggregates, IncomeSeries, ViewMode};
use crate::{utils, Config};
use anyhow::{ensure, Context};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
    backup: Backup,
    data: BudgetData,
}

impl Store {
    /// Creates a store over `data` that will be saved to `path`.
    pub fn new(path: impl Into<PathBuf>, backup: Backup, data: BudgetData) -> Self {
        Self {
            path: path.into(),
            backup,
            data,
        }
    }

    /// Loads the budget file named by `config`. A missing file is an empty budget.
    pub async fn load(config: &Config) -> Res<Self> {
        let path = config.store_path();
        let data = if path.is_file() {
            utils::deserialize(path)
                .await
                .context("Unable to load the budget file")?
        } else {
            info!(
                "No budget file at {}, starting an empty budget",
                path.display()
            );
            BudgetData::default()
        };
        debug!(
            "Loaded {} months from {}",
            data.monthly_budgets.len(),
            path.display()
        );
        Ok(Self::new(path, config.backup(), data))
    }

    /// Writes the budget file, backing up the previous version first.
    ///
    /// The new content is written next to the budget file and then moved over it, so a failed
    /// write never leaves a truncated budget behind.
    pub async fn save(&self) -> Res<()> {
        if self.path.is_file() {
            self.backup.copy_budget(&self.path).await?;
        }
        let json =
            serde_json::to_string_pretty(&self.data).context("Unable to serialize the budget")?;
        let staging = self.path.with_extension("json.tmp");
        utils::write(&staging, json).await?;
        utils::rename(&staging, &self.path).await?;
        debug!("Saved budget to {}", self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &BudgetData {
        &self.data
    }

    /// Every monthly record, oldest first.
    pub fn months(&self) -> &BTreeMap<MonthKey, MonthRecord> {
        &self.data.monthly_budgets
    }

    pub fn record(&self, month: MonthKey) -> Option<&MonthRecord> {
        self.data.monthly_budgets.get(&month)
    }

    /// The most recent month that has a record.
    pub fn latest_month(&self) -> Option<MonthKey> {
        self.data.monthly_budgets.keys().next_back().copied()
    }

    /// Spending grouped into buckets for `view`. See `report::group_aggregates`.
    pub fn group_aggregates(&self, view: ViewMode) -> GroupAggregates {
        report::group_aggregates(self.months(), view)
    }

    /// Income per source over time. See `report::income_series`.
    pub fn income_series(&self) -> Option<IncomeSeries> {
        report::income_series(self.months())
    }

    /// The record for `month`, created empty if it does not exist yet.
    fn record_mut(&mut self, month: MonthKey) -> &mut MonthRecord {
        self.data.monthly_budgets.entry(month).or_default()
    }

    fn next_transaction_id(&mut self) -> u64 {
        self.data.transaction_counter += 1;
        self.data.transaction_counter
    }
}

fn ensure_not_negative(amount: Amount) -> Res<()> {
    ensure!(
        !amount.is_negative(),
        "Amounts must not be negative, got {amount}"
    );
    Ok(())
}

fn ensure_name(name: &str, what: &str) -> Res<String> {
    let name = name.trim();
    ensure!(!name.is_empty(), "The {what} name must not be empty");
    Ok(name.to_string())
}

#[cfg(test)]
pub(crate) fn scratch_store() -> Store {
    Store::new(
        "/nonexistent/budget.json",
        Backup::new("/nonexistent/.backups", 0),
        BudgetData::default(),
    )
}
