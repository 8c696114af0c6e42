//! CSV export of a single month.
//!
//! The export has a `Category,Amount` header followed by the month's budget lines, then what was
//! spent per category (labelled `<category> (spent)`), then account balances (labelled
//! `<account> Balance`).

use crate::error::Res;
use crate::model::{Amount, MonthKey, MonthRecord};
use anyhow::Context;
use serde::Serialize;
use std::io::Write;

const HEADER: [&str; 2] = ["Category", "Amount"];

/// One line of a month export.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct ExportRow {
    pub label: String,
    pub value: Amount,
}

impl ExportRow {
    fn new(label: impl Into<String>, value: Amount) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Flattens a month into labelled rows: budget lines, then spending, then balances.
pub fn export_rows(record: &MonthRecord) -> Vec<ExportRow> {
    let budget = record
        .budget_map
        .iter()
        .map(|(k, v)| ExportRow::new(k.as_str(), *v));
    let spent = record
        .expense_map
        .iter()
        .map(|(k, v)| ExportRow::new(format!("{k} (spent)"), *v));
    let balances = record
        .account_balances
        .iter()
        .map(|(k, v)| ExportRow::new(format!("{k} Balance"), *v));
    budget.chain(spent).chain(balances).collect()
}

/// Writes `rows` as CSV. Labels containing commas, quotes or line breaks are quoted.
pub fn write_csv<W: Write>(rows: &[ExportRow], writer: W) -> Res<()> {
    let mut csv = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    csv.write_record(HEADER)
        .context("Unable to write the CSV header")?;
    for row in rows {
        let value = row.value.value().to_string();
        csv.write_record([row.label.as_str(), value.as_str()])
            .with_context(|| format!("Unable to write the CSV row for '{}'", row.label))?;
    }
    csv.flush().context("Unable to flush the CSV output")?;
    Ok(())
}

/// Renders `rows` as a CSV `String`.
pub fn to_csv_string(rows: &[ExportRow]) -> Res<String> {
    let mut buf = Vec::new();
    write_csv(rows, &mut buf)?;
    String::from_utf8(buf).context("The CSV output is not valid UTF-8")
}

/// The file name an export of `month` is saved under by default.
pub fn default_file_name(month: MonthKey) -> String {
    format!("{month}_Cashwise_Export.csv")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::str::FromStr;

    fn amounts(entries: &[(&str, &str)]) -> BTreeMap<String, Amount> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), Amount::from_str(v).unwrap()))
            .collect()
    }

    fn sample() -> MonthRecord {
        MonthRecord {
            income: Amount::from(3000),
            budget_map: amounts(&[("Food", "400"), ("Tithe", "300")]),
            expense_map: amounts(&[("Food", "385.50")]),
            account_balances: amounts(&[("Bank 1", "2500"), ("Cash at Home", "-12.25")]),
            transactions: Vec::new(),
        }
    }

    #[test]
    fn test_rows_order_and_labels() {
        let labels: Vec<String> = export_rows(&sample()).into_iter().map(|r| r.label).collect();
        assert_eq!(
            labels,
            vec![
                "Food",
                "Tithe",
                "Food (spent)",
                "Bank 1 Balance",
                "Cash at Home Balance"
            ]
        );
    }

    #[test]
    fn test_csv_text() {
        let csv = to_csv_string(&export_rows(&sample())).unwrap();
        assert_eq!(
            csv,
            "Category,Amount\n\
             Food,400\n\
             Tithe,300\n\
             Food (spent),385.50\n\
             Bank 1 Balance,2500\n\
             Cash at Home Balance,-12.25\n"
        );
    }

    #[test]
    fn test_csv_quotes_awkward_labels() {
        let rows = vec![
            ExportRow::new("Dining, Takeout", Amount::from(60)),
            ExportRow::new("Kids \"fun\" money", Amount::from(5)),
        ];
        let csv = to_csv_string(&rows).unwrap();
        assert_eq!(
            csv,
            "Category,Amount\n\"Dining, Takeout\",60\n\"Kids \"\"fun\"\" money\",5\n"
        );

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let labels: Vec<String> = reader
            .records()
            .map(|r| r.unwrap()[0].to_string())
            .collect();
        assert_eq!(labels, vec!["Dining, Takeout", "Kids \"fun\" money"]);
    }

    #[test]
    fn test_empty_month_is_header_only() {
        let csv = to_csv_string(&export_rows(&MonthRecord::default())).unwrap();
        assert_eq!(csv, "Category,Amount\n");
    }

    #[test]
    fn test_default_file_name() {
        let month = MonthKey::from_str("2024-07").unwrap();
        assert_eq!(default_file_name(month), "2024-07_Cashwise_Export.csv");
    }
}
