use crate::model::{Amount, MonthKey, MonthRecord};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Income per source over time, positionally aligned with `months`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct IncomeSeries {
    /// Every month that has at least one income transaction, oldest first.
    pub months: Vec<MonthKey>,
    /// Income source to one total per entry of `months`.
    pub series: BTreeMap<String, Vec<Amount>>,
}

impl IncomeSeries {
    /// Total income per month across all sources.
    pub fn totals(&self) -> Vec<Amount> {
        (0..self.months.len())
            .map(|ix| self.series.values().map(|points| points[ix]).sum::<Amount>())
            .collect()
    }
}

/// Pivots every income transaction into one series per income source.
///
/// Returns `None` when there are no income transactions at all, so that callers can tell "no
/// data" apart from a series that is all zeros.
pub fn income_series(months: &BTreeMap<MonthKey, MonthRecord>) -> Option<IncomeSeries> {
    let mut totals: BTreeMap<(&str, MonthKey), Amount> = BTreeMap::new();
    let mut sources = BTreeSet::new();
    let mut income_months = BTreeSet::new();

    for (month, record) in months {
        for txn in record.income_transactions() {
            sources.insert(txn.category.as_str());
            income_months.insert(*month);
            *totals.entry((txn.category.as_str(), *month)).or_default() += txn.amount;
        }
    }

    if sources.is_empty() {
        return None;
    }

    let months: Vec<MonthKey> = income_months.into_iter().collect();
    let series = sources
        .into_iter()
        .map(|source| {
            let points = months
                .iter()
                .map(|month| totals.get(&(source, *month)).copied().unwrap_or_default())
                .collect();
            (source.to_string(), points)
        })
        .collect();

    Some(IncomeSeries { months, series })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Transaction;

    fn month(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    fn with_transactions(transactions: Vec<Transaction>) -> MonthRecord {
        MonthRecord {
            transactions,
            ..MonthRecord::default()
        }
    }

    #[test]
    fn test_pivot_alignment() {
        let mut months = BTreeMap::new();
        months.insert(
            month("2024-02"),
            with_transactions(vec![Transaction::income("Salary", Amount::from(1100))]),
        );
        months.insert(
            month("2024-01"),
            with_transactions(vec![Transaction::income("Salary", Amount::from(1000))]),
        );

        let series = income_series(&months).unwrap();
        assert_eq!(series.months, vec![month("2024-01"), month("2024-02")]);
        assert_eq!(
            series.series["Salary"],
            vec![Amount::from(1000), Amount::from(1100)]
        );
    }

    #[test]
    fn test_missing_points_are_zero_and_same_month_sums() {
        let mut months = BTreeMap::new();
        months.insert(
            month("2024-01"),
            with_transactions(vec![
                Transaction::income("Salary", Amount::from(1000)),
                Transaction::income("Side Gig", Amount::from(150)),
                Transaction::income("Side Gig", Amount::from(50)),
            ]),
        );
        months.insert(
            month("2024-03"),
            with_transactions(vec![Transaction::income("Salary", Amount::from(1000))]),
        );

        let series = income_series(&months).unwrap();
        assert_eq!(series.months.len(), 2);
        assert_eq!(
            series.series["Side Gig"],
            vec![Amount::from(200), Amount::ZERO]
        );
        assert_eq!(series.totals(), vec![Amount::from(1200), Amount::from(1000)]);
    }

    #[test]
    fn test_expenses_and_income_free_months_are_ignored() {
        let mut months = BTreeMap::new();
        months.insert(
            month("2024-01"),
            with_transactions(vec![
                Transaction::expense("Food", Amount::from(20)),
                Transaction::income("Salary", Amount::from(900)),
            ]),
        );
        months.insert(
            month("2024-02"),
            with_transactions(vec![Transaction::expense("Food", Amount::from(40))]),
        );

        let series = income_series(&months).unwrap();
        assert_eq!(series.months, vec![month("2024-01")]);
        assert_eq!(series.series.len(), 1);
        assert!(!series.series.contains_key("Food"));
    }

    #[test]
    fn test_no_income_transactions_is_none() {
        assert_eq!(income_series(&BTreeMap::new()), None);

        let mut months = BTreeMap::new();
        let mut record = with_transactions(vec![Transaction::expense("Rent", Amount::from(700))]);
        // Month-level income without any income transactions does not count.
        record.income = Amount::from(2000);
        months.insert(month("2024-01"), record);
        assert_eq!(income_series(&months), None);
    }

    #[test]
    fn test_zero_amount_income_is_still_data() {
        let mut months = BTreeMap::new();
        months.insert(
            month("2024-01"),
            with_transactions(vec![Transaction::income("Gift", Amount::ZERO)]),
        );
        let series = income_series(&months).unwrap();
        assert_eq!(series.series["Gift"], vec![Amount::ZERO]);
    }
}
