use crate::model::MonthKey;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The label of the single bucket used by the annual view.
pub const ANNUAL: &str = "Annual";

/// How months are grouped into reporting buckets.
#[derive(
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// One bucket per month.
    #[default]
    #[value(alias = "1")]
    #[serde(alias = "1")]
    Monthly,
    /// One bucket per calendar quarter.
    #[value(alias = "2")]
    #[serde(alias = "2")]
    Quarterly,
    /// Every month in a single bucket.
    #[value(alias = "3")]
    #[serde(alias = "3")]
    Annual,
}

impl ViewMode {
    /// Derives the bucket label that `month` belongs to under this view.
    ///
    /// ```
    /// # use cashwise::model::MonthKey;
    /// # use cashwise::report::ViewMode;
    /// let month: MonthKey = "2024-05".parse().unwrap();
    /// assert_eq!(ViewMode::Monthly.group_key(month), "2024-05");
    /// assert_eq!(ViewMode::Quarterly.group_key(month), "2024-Q2");
    /// assert_eq!(ViewMode::Annual.group_key(month), "Annual");
    /// ```
    pub fn group_key(&self, month: MonthKey) -> String {
        match self {
            ViewMode::Monthly => month.to_string(),
            ViewMode::Quarterly => format!("{:04}-Q{}", month.year(), month.quarter()),
            ViewMode::Annual => ANNUAL.to_string(),
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Monthly => "monthly",
            ViewMode::Quarterly => "quarterly",
            ViewMode::Annual => "annual",
        }
    }
}

impl Display for ViewMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
