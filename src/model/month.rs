//! The `YYYY-MM` month identifier that keys every monthly record.

use anyhow::{bail, Context};
use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A validated month identifier of the form `YYYY-MM`.
///
/// Ordering is chronological, which is also the lexicographic order of the string form.
///
/// ```
/// # use cashwise::model::MonthKey;
/// let month: MonthKey = "2024-05".parse().unwrap();
/// assert_eq!(month.year(), 2024);
/// assert_eq!(month.quarter(), 2);
/// assert!("2024-5".parse::<MonthKey>().is_err());
/// ```
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: u16,
    month: u8,
}

impl MonthKey {
    /// Creates a month key, failing if `month` is outside `1..=12` or `year` is not four digits.
    pub fn new(year: u16, month: u8) -> crate::error::Res<Self> {
        if !(1000..=9999).contains(&year) {
            bail!("The year {year} is not a four digit year");
        }
        if !(1..=12).contains(&month) {
            bail!("The month number {month} is not between 1 and 12");
        }
        Ok(Self { year, month })
    }

    /// The month containing today's local date.
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self {
            year: today.year() as u16,
            month: today.month() as u8,
        }
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    /// The 1-based month number.
    pub fn month(&self) -> u8 {
        self.month
    }

    /// The quarter this month falls in, `ceil(month / 3)`, always 1 through 4.
    pub fn quarter(&self) -> u8 {
        self.month.div_ceil(3)
    }

    /// The month after this one. Fails after `9999-12`.
    pub fn next(&self) -> crate::error::Res<Self> {
        if self.month == 12 {
            MonthKey::new(self.year + 1, 1)
                .with_context(|| format!("There is no month after {self}"))
        } else {
            MonthKey::new(self.year, self.month + 1)
        }
    }
}

impl Display for MonthKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Invalid month '{s}', expected the form YYYY-MM");
        let (year, month) = s.split_once('-').with_context(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            bail!(invalid());
        }
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            bail!(invalid());
        }
        let year: u16 = year.parse().with_context(invalid)?;
        let month: u8 = month.parse().with_context(invalid)?;
        MonthKey::new(year, month).with_context(invalid)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(value: MonthKey) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_parse_and_display() {
        let m = MonthKey::from_str("2024-01").unwrap();
        assert_eq!(m.year(), 2024);
        assert_eq!(m.month(), 1);
        assert_eq!(m.to_string(), "2024-01");
    }

    #[test]
    fn test_quarters() {
        let quarter = |s: &str| MonthKey::from_str(s).unwrap().quarter();
        assert_eq!(quarter("2024-01"), 1);
        assert_eq!(quarter("2024-03"), 1);
        assert_eq!(quarter("2024-04"), 2);
        assert_eq!(quarter("2024-09"), 3);
        assert_eq!(quarter("2024-10"), 4);
        assert_eq!(quarter("2024-12"), 4);
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in ["2024-13", "2024-00", "2024-1", "24-01", "2024/01", "2024-0a", "", "2024-011"] {
            let err = MonthKey::from_str(bad).unwrap_err();
            assert!(
                err.to_string().contains("expected the form YYYY-MM"),
                "{bad}: {err}"
            );
        }
    }

    #[test]
    fn test_ordering_is_chronological() {
        let mut months: Vec<MonthKey> = ["2024-10", "2023-12", "2024-02"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        months.sort();
        let sorted: Vec<String> = months.iter().map(|m| m.to_string()).collect();
        assert_eq!(sorted, vec!["2023-12", "2024-02", "2024-10"]);
    }

    #[test]
    fn test_next() {
        let dec = MonthKey::from_str("2023-12").unwrap();
        assert_eq!(dec.next().unwrap().to_string(), "2024-01");
        let jun = MonthKey::from_str("2024-06").unwrap();
        assert_eq!(jun.next().unwrap().to_string(), "2024-07");
    }

    #[test]
    fn test_no_month_after_the_last() {
        let last = MonthKey::from_str("9999-12").unwrap();
        let err = last.next().unwrap_err();
        assert!(err.to_string().contains("no month after 9999-12"));
    }

    #[test]
    fn test_serde_as_map_key() {
        let mut map = BTreeMap::new();
        map.insert(MonthKey::from_str("2024-02").unwrap(), 2);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"2024-02":2}"#);

        let parsed: BTreeMap<MonthKey, i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, map);

        let bad: Result<BTreeMap<MonthKey, i32>, _> = serde_json::from_str(r#"{"2024-2":2}"#);
        assert!(bad.is_err());
    }
}
