//! Commands that record against a single month.

use crate::args::{BalanceArgs, BudgetArgs, CarryArgs, ExpenseArgs, IncomeArgs, NoteArgs};
use crate::commands::{open, save, Out};
use crate::error::{ErrorType, IntoResult};
use crate::model::{Amount, MonthKey, MonthRecord, Transaction};
use crate::{Config, Result};
use anyhow::anyhow;
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything recorded for one month.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    pub month: MonthKey,
    pub record: MonthRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carried_balances: Option<BTreeMap<String, Amount>>,
}

pub async fn income(config: Config, args: IncomeArgs) -> Result<Out<Transaction>> {
    let mut store = open(&config).await?;
    let txn = store
        .record_income(args.month, &args.source, args.amount, args.account.as_deref())
        .pub_result(ErrorType::Validation)?;
    save(&store).await?;
    Ok(Out::new(
        format!("Recorded {} of income from {} in {}", txn.amount, txn.category, args.month),
        txn,
    ))
}

pub async fn expense(config: Config, args: ExpenseArgs) -> Result<Out<Transaction>> {
    let mut store = open(&config).await?;
    let txn = store
        .record_expense(
            args.month,
            &args.category,
            args.amount,
            args.account.as_deref(),
        )
        .pub_result(ErrorType::Validation)?;
    save(&store).await?;
    Ok(Out::new(
        format!("Recorded {} spent on {} in {}", txn.amount, txn.category, args.month),
        txn,
    ))
}

pub async fn budget(config: Config, args: BudgetArgs) -> Result<Out<()>> {
    let mut store = open(&config).await?;
    store
        .set_budget(args.month, &args.category, args.amount)
        .pub_result(ErrorType::Validation)?;
    save(&store).await?;
    Ok(format!(
        "Budgeted {} for {} in {}",
        args.amount,
        args.category.trim(),
        args.month
    )
    .into())
}

pub async fn balance(config: Config, args: BalanceArgs) -> Result<Out<()>> {
    let mut store = open(&config).await?;
    store
        .set_balance(args.month, &args.account, args.amount)
        .pub_result(ErrorType::Validation)?;
    save(&store).await?;
    Ok(format!(
        "Set the balance of {} to {} in {}",
        args.account, args.amount, args.month
    )
    .into())
}

pub async fn note(config: Config, args: NoteArgs) -> Result<Out<()>> {
    let mut store = open(&config).await?;
    store
        .set_note(args.month, &args.text)
        .pub_result(ErrorType::Validation)?;
    save(&store).await?;
    Ok(match store.note(args.month) {
        Some(_) => format!("Saved the note for {}", args.month),
        None => format!("Cleared the note for {}", args.month),
    }
    .into())
}

/// Shows a month's record, note and carried balances.
///
/// # Errors
/// - `ErrorType::NoData` when nothing has been recorded for the month.
pub async fn show(config: Config, month: MonthKey) -> Result<Out<MonthSummary>> {
    let store = open(&config).await?;
    let record = store
        .record(month)
        .cloned()
        .ok_or_else(|| anyhow!("There is no record for {month}"))
        .pub_result(ErrorType::NoData)?;
    let summary = MonthSummary {
        month,
        note: store.note(month).map(str::to_string),
        carried_balances: store.carried_balances(month).cloned(),
        record,
    };
    let spent: Amount = summary.record.expense_map.values().sum();
    Ok(Out::new(
        format!(
            "{month}: income {}, spent {}",
            summary.record.income, spent
        ),
        summary,
    ))
}

pub async fn carry(config: Config, args: CarryArgs) -> Result<Out<BTreeMap<String, Amount>>> {
    let to = match args.to {
        Some(to) => to,
        None => args.from.next().pub_result(ErrorType::Validation)?,
    };
    let mut store = open(&config).await?;
    let carried = store
        .carry_forward(args.from, to)
        .pub_result(ErrorType::Validation)?;
    save(&store).await?;
    Ok(Out::new(
        format!("Carried {} balances from {} to {to}", carried.len(), args.from),
        carried,
    ))
}
