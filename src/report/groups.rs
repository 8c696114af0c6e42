use crate::model::{Amount, MonthKey, MonthRecord};
use crate::report::ViewMode;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use tracing::trace;

/// Budget lines that are folded into the spending categories of every bucket.
pub const SYNTHETIC_CATEGORIES: [&str; 2] = ["Tithe", "Savings"];

/// The buckets of a grouped report keyed by bucket label, in label order.
pub type GroupAggregates = BTreeMap<String, GroupAggregate>;

/// The summed figures for one reporting bucket.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct GroupAggregate {
    /// Total income of the months in this bucket.
    pub income: Amount,
    /// Category name to the total spent (or, for `Tithe` and `Savings`, spent plus budgeted).
    pub categories: BTreeMap<String, Amount>,
    /// Category name to its share of `income` in percent. Every value is `None` when the bucket
    /// has no income.
    #[serde(serialize_with = "serialize_percentages")]
    pub percentages: BTreeMap<String, Option<Decimal>>,
}

impl GroupAggregate {
    fn add_month(&mut self, record: &MonthRecord) {
        self.income += record.income;
        for (category, amount) in &record.expense_map {
            *self.categories.entry(category.clone()).or_default() += *amount;
        }
        for category in SYNTHETIC_CATEGORIES {
            *self.categories.entry(category.to_string()).or_default() +=
                record.budgeted(category);
        }
    }

    fn compute_percentages(&mut self) {
        self.percentages = self
            .categories
            .iter()
            .map(|(category, amount)| (category.clone(), percent_of(*amount, self.income)))
            .collect();
    }

    /// True when the bucket has no income to divide by.
    pub fn has_income(&self) -> bool {
        !self.income.is_zero()
    }
}

/// `part` as a percentage of `whole`, rounded to two decimal places. `None` if `whole` is zero or
/// the percentage is too large for a `Decimal`.
pub fn percent_of(part: Amount, whole: Amount) -> Option<Decimal> {
    if whole.is_zero() {
        return None;
    }
    let pct = part
        .value()
        .checked_div(whole.value())?
        .checked_mul(Decimal::ONE_HUNDRED)?;
    Some(pct.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// Folds every month into its bucket for `view`.
///
/// Each bucket sums the months' income and `expenseMap` entries, then adds each month's budgeted
/// `Tithe` and `Savings` into the same-named categories. The result does not depend on the order
/// in which months are visited, and an empty input gives an empty result.
pub fn group_aggregates(
    months: &BTreeMap<MonthKey, MonthRecord>,
    view: ViewMode,
) -> GroupAggregates {
    let mut groups = GroupAggregates::new();
    for (month, record) in months {
        let key = view.group_key(*month);
        trace!("Adding {month} to bucket {key}");
        groups.entry(key).or_default().add_month(record);
    }
    for group in groups.values_mut() {
        group.compute_percentages();
    }
    groups
}

fn serialize_percentages<S>(
    percentages: &BTreeMap<String, Option<Decimal>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    use rust_decimal::prelude::ToPrimitive;
    use serde::ser::SerializeMap;

    let mut map = serializer.serialize_map(Some(percentages.len()))?;
    for (category, pct) in percentages {
        map.serialize_entry(category, &pct.and_then(|p| p.to_f64()))?;
    }
    map.end()
}
