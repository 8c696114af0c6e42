use crate::model::Amount;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whether a transaction brought money in or sent it out.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Income,
    Expense,
}

serde_plain::derive_display_from_serialize!(TransactionType);
serde_plain::derive_fromstr_from_deserialize!(TransactionType);

/// A single income or expense entry within a month.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Sequence number handed out by the store's transaction counter. Older data may lack it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// The income source or the expense category.
    pub category: String,
    pub amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
}

impl Transaction {
    pub fn income(category: impl Into<String>, amount: Amount) -> Self {
        Self {
            id: None,
            kind: TransactionType::Income,
            category: category.into(),
            amount,
            account: None,
        }
    }

    pub fn expense(category: impl Into<String>, amount: Amount) -> Self {
        Self {
            id: None,
            kind: TransactionType::Expense,
            category: category.into(),
            amount,
            account: None,
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_account(mut self, account: Option<String>) -> Self {
        self.account = account;
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }
}

/// Everything recorded for one calendar month.
///
/// Field names match the keys used by the budget file, so a record reads like:
/// ```json
/// {
///   "income": 3200,
///   "budgetMap": { "Food": 400, "Tithe": 320, "Savings": 500 },
///   "expenseMap": { "Food": 385.5 },
///   "accountBalances": { "Bank 1": 2814.5 },
///   "transactions": [ { "id": 1, "type": "income", "category": "Salary", "amount": 3200 } ]
/// }
/// ```
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthRecord {
    #[serde(default)]
    pub income: Amount,
    #[serde(default)]
    pub budget_map: BTreeMap<String, Amount>,
    #[serde(default)]
    pub expense_map: BTreeMap<String, Amount>,
    #[serde(default)]
    pub account_balances: BTreeMap<String, Amount>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl MonthRecord {
    /// The planned amount for `category`, zero when nothing was budgeted.
    pub fn budgeted(&self, category: &str) -> Amount {
        self.budget_map.get(category).copied().unwrap_or_default()
    }

    /// Income transactions in entry order.
    pub fn income_transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(|t| t.is_income())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_sparse_record() {
        let record: MonthRecord = serde_json::from_str(r#"{ "income": 100 }"#).unwrap();
        assert_eq!(record.income, Amount::from(100));
        assert!(record.budget_map.is_empty());
        assert!(record.transactions.is_empty());
        assert_eq!(record.budgeted("Tithe"), Amount::ZERO);
    }

    #[test]
    fn test_deserialize_record_without_transaction_ids() {
        let json = r#"{
            "income": 1000,
            "budgetMap": { "Tithe": 100 },
            "expenseMap": { "Food": 50 },
            "accountBalances": { "Bank 1": 850 },
            "transactions": [
                { "type": "income", "category": "Salary", "amount": 1000 },
                { "type": "expense", "category": "Food", "amount": 50 }
            ]
        }"#;
        let record: MonthRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.budgeted("Tithe"), Amount::from(100));
        assert_eq!(record.transactions.len(), 2);
        assert_eq!(record.transactions[0].id, None);
        let incomes: Vec<&Transaction> = record.income_transactions().collect();
        assert_eq!(incomes.len(), 1);
        assert_eq!(incomes[0].category, "Salary");
    }

    #[test]
    fn test_transaction_json_shape() {
        let t = Transaction::expense("Food", Amount::from(12)).with_id(7);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(
            json,
            r#"{"id":7,"type":"expense","category":"Food","amount":12.0}"#
        );
    }

    #[test]
    fn test_transaction_type_from_str() {
        assert_eq!(
            "income".parse::<TransactionType>().unwrap(),
            TransactionType::Income
        );
        assert!("refund".parse::<TransactionType>().is_err());
    }
}
