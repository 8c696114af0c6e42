//! Report and chart commands.

use crate::chart::{self, ChartSpec};
use crate::commands::{open, Out};
use crate::error::{ErrorType, IntoResult};
use crate::model::Amount;
use crate::report::{GroupAggregates, IncomeSeries, ViewMode};
use crate::{utils, Config, Result};
use anyhow::Context;
use serde::Serialize;
use std::fmt::Debug;
use std::path::Path;

const NO_MONTHS: &str = "No monthly records found.";
const NO_INCOME: &str = "No income transactions found.";

/// Spending per category and as a percentage of income, grouped by `view`. When `view` is not
/// given the `default_view` from the config is used.
pub async fn report_groups(
    config: Config,
    view: Option<ViewMode>,
) -> Result<Out<GroupAggregates>> {
    let view = view.unwrap_or(config.default_view());
    let store = open(&config).await?;
    let groups = store.group_aggregates(view);
    if groups.is_empty() {
        return Ok(NO_MONTHS.into());
    }
    let without_income = groups.values().filter(|g| !g.has_income()).count();
    let mut message = format!("{} {view} buckets", groups.len());
    if without_income > 0 {
        message.push_str(&format!(", {without_income} with no income recorded"));
    }
    Ok(Out::new(message, groups))
}

/// Income per source for every month that has income transactions.
pub async fn report_income(config: Config) -> Result<Out<IncomeSeries>> {
    let store = open(&config).await?;
    let Some(series) = store.income_series() else {
        return Ok(NO_INCOME.into());
    };
    let total: Amount = series.totals().into_iter().sum();
    Ok(Out::new(
        format!(
            "{} income sources over {} months, {total} in total",
            series.series.len(),
            series.months.len()
        ),
        series,
    ))
}

/// One pie chart per bucket. With `output` the charts are written there instead of printed.
pub async fn chart_groups(
    config: Config,
    view: Option<ViewMode>,
    output: Option<&Path>,
) -> Result<Out<Vec<ChartSpec>>> {
    let view = view.unwrap_or(config.default_view());
    let store = open(&config).await?;
    let groups = store.group_aggregates(view);
    if groups.is_empty() {
        return Ok(NO_MONTHS.into());
    }
    let charts = chart::spending_charts(&groups, view).pub_result(ErrorType::Export)?;
    let message = format!("Built {} {view} spending charts", charts.len());
    emit(message, charts, output).await
}

/// A line chart of income by source. With `output` the chart is written there instead of
/// printed.
pub async fn chart_income(config: Config, output: Option<&Path>) -> Result<Out<ChartSpec>> {
    let store = open(&config).await?;
    let Some(series) = store.income_series() else {
        return Ok(NO_INCOME.into());
    };
    let chart = chart::income_chart(&series).pub_result(ErrorType::Export)?;
    emit("Built the income chart".to_string(), chart, output).await
}

async fn emit<T>(message: String, structure: T, output: Option<&Path>) -> Result<Out<T>>
where
    T: Serialize + Clone + Debug,
{
    let Some(path) = output else {
        return Ok(Out::new(message, structure));
    };
    let json = serde_json::to_string_pretty(&structure)
        .context("Unable to serialize the chart")
        .pub_result(ErrorType::Export)?;
    utils::write(path, json).await.pub_result(ErrorType::Export)?;
    Ok(format!("{message}, wrote {}", path.display()).into())
}
