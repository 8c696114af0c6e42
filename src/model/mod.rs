//! Types that represent the core data model, such as `MonthRecord` and `Transaction`.
mod amount;
mod goal;
mod month;
mod record;

pub use amount::{Amount, AmountError};
pub use goal::{RecurringIncome, SavingsGoal};
pub use month::MonthKey;
pub use record::{MonthRecord, Transaction, TransactionType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The accounts a fresh budget starts with.
pub const DEFAULT_ACCOUNTS: [&str; 4] = ["Cash at Home", "Cash with Spouse", "Bank 1", "Bank 2"];

/// Represents the whole budget file.
///
/// The field names are the keys the budget has always been stored under, so an older export of
/// the same data can be dropped in as `budget.json`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetData {
    #[serde(default)]
    pub monthly_budgets: BTreeMap<MonthKey, MonthRecord>,
    /// Opening balances copied into a month from the month before it.
    #[serde(default)]
    pub carry_forward_balances: BTreeMap<MonthKey, BTreeMap<String, Amount>>,
    #[serde(default)]
    pub monthly_notes: BTreeMap<MonthKey, String>,
    #[serde(default)]
    pub savings_goals: Vec<SavingsGoal>,
    #[serde(default)]
    pub transaction_counter: u64,
    #[serde(default = "default_accounts")]
    pub account_list: Vec<String>,
    #[serde(default)]
    pub recurring_income: Vec<RecurringIncome>,
}

impl Default for BudgetData {
    fn default() -> Self {
        Self {
            monthly_budgets: BTreeMap::new(),
            carry_forward_balances: BTreeMap::new(),
            monthly_notes: BTreeMap::new(),
            savings_goals: Vec::new(),
            transaction_counter: 0,
            account_list: default_accounts(),
            recurring_income: Vec::new(),
        }
    }
}

fn default_accounts() -> Vec<String> {
    DEFAULT_ACCOUNTS.iter().map(|s| s.to_string()).collect()
}
