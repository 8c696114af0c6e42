//! Chart generation for reports.
//!
//! This module turns report data into ECharts option documents:
//! - **Spending charts**: one pie per reporting bucket showing each category as a percentage of
//!   that bucket's income
//! - **Income chart**: a line per income source over time
//!
//! The output is JSON ready to be passed to `echarts.init(...).setOption(...)`.

use crate::error::Res;
use crate::report::{GroupAggregates, IncomeSeries, ViewMode};
use anyhow::Context;
use charming::{
    component::{Axis, Legend, Title},
    element::{AreaStyle, AxisType, Color, Tooltip, Trigger},
    series::{Line, Pie},
    Chart,
};
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

/// A chart with an element ID and its ECharts configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    /// The HTML element ID to use for the chart.
    pub id: String,
    /// The ECharts configuration.
    pub options: serde_json::Value,
}

impl ChartSpec {
    fn new(id: impl Into<String>, chart: &Chart) -> Res<Self> {
        let id = id.into();
        let options = serde_json::to_value(chart)
            .with_context(|| format!("Unable to serialize the chart '{id}'"))?;
        Ok(Self { id, options })
    }
}

/// One pie chart per bucket, in bucket order.
///
/// Buckets without income have no percentages to show, so their pie is left empty and the
/// subtitle says so.
pub fn spending_charts(groups: &GroupAggregates, view: ViewMode) -> Res<Vec<ChartSpec>> {
    groups
        .iter()
        .map(|(label, group)| {
            let names: Vec<&String> = group.categories.keys().collect();
            let mut title = Title::new().text(format!("{label} Spending as % of Income"));
            let mut pie = Pie::new()
                .name(format!("% of {view} income"))
                .radius("60%");

            if group.has_income() {
                let slices: Vec<(f64, &str)> = group
                    .percentages
                    .iter()
                    .filter_map(|(name, pct)| Some((pct.as_ref()?.to_f64()?, name.as_str())))
                    .collect();
                pie = pie.data(slices);
            } else {
                title = title.subtext("No income recorded");
            }

            let chart = Chart::new()
                .title(title)
                .tooltip(Tooltip::new().trigger(Trigger::Item))
                .legend(Legend::new().bottom("0%"))
                .color(palette(names.len(), 45, "60%"))
                .series(pie);
            ChartSpec::new(format!("chart_{label}"), &chart)
        })
        .collect()
}

/// A line chart of every income source over time.
pub fn income_chart(series: &IncomeSeries) -> Res<ChartSpec> {
    let labels: Vec<String> = series.months.iter().map(|m| m.to_string()).collect();

    let mut chart = Chart::new()
        .title(Title::new().text("Income Analysis by Source Over Time"))
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .legend(Legend::new().bottom("0%"))
        .color(palette(series.series.len(), 60, "50%"))
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .name("Month")
                .data(labels),
        )
        .y_axis(Axis::new().type_(AxisType::Value).name("Amount"));

    for (source, points) in &series.series {
        let values: Vec<f64> = points
            .iter()
            .map(|a| a.value().to_f64().unwrap_or_default())
            .collect();
        chart = chart.series(
            Line::new()
                .name(source.as_str())
                .area_style(AreaStyle::new().opacity(0.4))
                .data(values),
        );
    }

    ChartSpec::new("incomeAnalysisChart", &chart)
}

/// Evenly spread hues: `hsl((i * step) % 360, 70%, lightness)`.
fn palette(len: usize, step: usize, lightness: &str) -> Vec<Color> {
    (0..len)
        .map(|i| Color::from(format!("hsl({}, 70%, {lightness})", (i * step) % 360).as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amount, MonthKey, MonthRecord, Transaction};
    use crate::report::{group_aggregates, income_series};
    use std::collections::BTreeMap;

    fn month(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    fn months() -> BTreeMap<MonthKey, MonthRecord> {
        let mut jan = MonthRecord {
            income: Amount::from(1000),
            ..MonthRecord::default()
        };
        let _ = jan.expense_map.insert("Food".to_string(), Amount::from(250));
        jan.transactions
            .push(Transaction::income("Salary", Amount::from(1000)));

        let mut feb = MonthRecord::default();
        let _ = feb.expense_map.insert("Food".to_string(), Amount::from(90));

        let mut map = BTreeMap::new();
        map.insert(month("2024-01"), jan);
        map.insert(month("2024-02"), feb);
        map
    }

    #[test]
    fn test_spending_charts() {
        let groups = group_aggregates(&months(), ViewMode::Monthly);
        let charts = spending_charts(&groups, ViewMode::Monthly).unwrap();
        assert_eq!(charts.len(), 2);
        assert_eq!(charts[0].id, "chart_2024-01");

        let jan = &charts[0].options;
        let json = jan.to_string();
        assert!(json.contains("2024-01 Spending as % of Income"));
        let data = jan["series"][0]["data"].as_array().unwrap();
        assert_eq!(data.len(), 3);
        assert!(json.contains("% of monthly income"));
        assert!(json.contains("hsl(45, 70%, 60%)"));
    }

    #[test]
    fn test_zero_income_bucket_has_no_slices() {
        let groups = group_aggregates(&months(), ViewMode::Monthly);
        let charts = spending_charts(&groups, ViewMode::Monthly).unwrap();
        let feb = charts[1].options.to_string();
        assert!(feb.contains("No income recorded"));
        assert!(!feb.contains("NaN"));
        assert!(!feb.contains("inf"));
    }

    #[test]
    fn test_income_chart() {
        let series = income_series(&months()).unwrap();
        let chart = income_chart(&series).unwrap();
        assert_eq!(chart.id, "incomeAnalysisChart");
        let json = chart.options.to_string();
        assert!(json.contains("Income Analysis by Source Over Time"));
        assert!(json.contains("Salary"));
        assert!(json.contains("2024-01"));
        assert!(!json.contains("2024-02"));
    }
}
