use crate::args::ExportArgs;
use crate::commands::{open, Out};
use crate::error::{ErrorType, IntoResult};
use crate::export::{self, ExportRow};
use crate::{utils, Config, Result};
use anyhow::anyhow;
use std::path::PathBuf;

/// Writes one month to a CSV file.
///
/// The month defaults to the latest month with a record, and the file defaults to
/// `<month>_Cashwise_Export.csv` in the current directory.
///
/// # Errors
/// - `ErrorType::NoData` when the month has no record, or there are no records at all.
/// - `ErrorType::Export` when the file cannot be written.
pub async fn export(config: Config, args: ExportArgs) -> Result<Out<Vec<ExportRow>>> {
    let store = open(&config).await?;
    let month = args
        .month
        .or_else(|| store.latest_month())
        .ok_or_else(|| anyhow!("There are no monthly records to export"))
        .pub_result(ErrorType::NoData)?;
    let record = store
        .record(month)
        .ok_or_else(|| anyhow!("There is no record for {month} to export"))
        .pub_result(ErrorType::NoData)?;

    let rows = export::export_rows(record);
    let csv = export::to_csv_string(&rows).pub_result(ErrorType::Export)?;
    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(export::default_file_name(month)));
    utils::write(&path, csv).await.pub_result(ErrorType::Export)?;

    Ok(Out::new(
        format!("Exported {} rows for {month} to {}", rows.len(), path.display()),
        rows,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amount, MonthKey};
    use crate::test::TestEnv;
    use crate::Store;

    #[tokio::test]
    async fn test_export_latest_month() {
        let env = TestEnv::new().await;
        let mut store = Store::load(&env.config()).await.unwrap();
        let jan: MonthKey = "2024-01".parse().unwrap();
        let feb: MonthKey = "2024-02".parse().unwrap();
        store.set_budget(jan, "Food", Amount::from(1)).unwrap();
        store.set_budget(feb, "Dining, Out", Amount::from(75)).unwrap();
        store
            .record_expense(feb, "Dining, Out", Amount::from(60), Some("Bank 2"))
            .unwrap();
        store.save().await.unwrap();

        let path = env.config().root().join("feb.csv");
        let args = ExportArgs {
            month: None,
            output: Some(path.clone()),
        };
        let out = export(env.config(), args).await.unwrap();
        assert_eq!(out.structure().unwrap().len(), 3);

        let csv = utils::read(&path).await.unwrap();
        assert_eq!(
            csv,
            "Category,Amount\n\
             \"Dining, Out\",75\n\
             \"Dining, Out (spent)\",60\n\
             Bank 2 Balance,-60\n"
        );
    }

    #[tokio::test]
    async fn test_export_missing_month() {
        let env = TestEnv::new().await;
        let args = ExportArgs {
            month: None,
            output: Some(env.config().root().join("none.csv")),
        };
        let err = export(env.config(), args).await.unwrap_err();
        assert_eq!(err.error_type(), ErrorType::NoData);

        let args = ExportArgs {
            month: Some("2030-01".parse().unwrap()),
            output: Some(env.config().root().join("none.csv")),
        };
        let err = export(env.config(), args).await.unwrap_err();
        assert_eq!(err.error_type(), ErrorType::NoData);
        assert!(err.to_string().contains("no record for 2030-01"));
    }
}
