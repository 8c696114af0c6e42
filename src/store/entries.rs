//! Recording income, expenses, budget lines, balances and notes against a month.

use crate::error::Res;
use crate::model::{Amount, MonthKey, MonthRecord, Transaction};
use crate::store::{ensure_name, ensure_not_negative, Store};
use anyhow::Context;
use std::collections::BTreeMap;
use tracing::debug;

impl Store {
    /// Records income from `source`. The month's income goes up by `amount`, and so does the
    /// balance of `account` when one is given.
    pub fn record_income(
        &mut self,
        month: MonthKey,
        source: &str,
        amount: Amount,
        account: Option<&str>,
    ) -> Res<Transaction> {
        let source = ensure_name(source, "income source")?;
        ensure_not_negative(amount)?;
        if let Some(account) = account {
            self.ensure_account(account)?;
        }

        let existing = self.record(month);
        let income = existing
            .map(|r| r.income)
            .unwrap_or_default()
            .checked_add(amount)
            .with_context(|| format!("Adding {amount} would overflow the income of {month}"))?;
        let balance = account
            .map(|a| adjusted_balance(existing, a, amount, Amount::checked_add))
            .transpose()?;

        let id = self.next_transaction_id();
        let txn = Transaction::income(source, amount)
            .with_id(id)
            .with_account(account.map(str::to_string));

        let record = self.record_mut(month);
        record.income = income;
        if let (Some(account), Some(balance)) = (account, balance) {
            let _ = record.account_balances.insert(account.to_string(), balance);
        }
        record.transactions.push(txn.clone());
        debug!("Recorded income {} in {month}", txn.amount);
        Ok(txn)
    }

    /// Records spending in `category`. The category's spent total goes up by `amount` and the
    /// balance of `account`, when given, goes down.
    pub fn record_expense(
        &mut self,
        month: MonthKey,
        category: &str,
        amount: Amount,
        account: Option<&str>,
    ) -> Res<Transaction> {
        let category = ensure_name(category, "category")?;
        ensure_not_negative(amount)?;
        if let Some(account) = account {
            self.ensure_account(account)?;
        }

        let existing = self.record(month);
        let spent = existing
            .and_then(|r| r.expense_map.get(&category))
            .copied()
            .unwrap_or_default()
            .checked_add(amount)
            .with_context(|| {
                format!("Adding {amount} would overflow the spending on {category} in {month}")
            })?;
        let balance = account
            .map(|a| adjusted_balance(existing, a, amount, Amount::checked_sub))
            .transpose()?;

        let id = self.next_transaction_id();
        let txn = Transaction::expense(category.clone(), amount)
            .with_id(id)
            .with_account(account.map(str::to_string));

        let record = self.record_mut(month);
        let _ = record.expense_map.insert(category, spent);
        if let (Some(account), Some(balance)) = (account, balance) {
            let _ = record.account_balances.insert(account.to_string(), balance);
        }
        record.transactions.push(txn.clone());
        debug!("Recorded expense {} in {month}", txn.amount);
        Ok(txn)
    }

    /// Sets the planned amount for `category` in `month`.
    pub fn set_budget(&mut self, month: MonthKey, category: &str, amount: Amount) -> Res<()> {
        let category = ensure_name(category, "category")?;
        ensure_not_negative(amount)?;
        let _ = self.record_mut(month).budget_map.insert(category, amount);
        Ok(())
    }

    /// Sets the balance of `account` in `month`. Balances may be negative, e.g. an overdraft.
    pub fn set_balance(&mut self, month: MonthKey, account: &str, amount: Amount) -> Res<()> {
        self.ensure_account(account)?;
        let _ = self
            .record_mut(month)
            .account_balances
            .insert(account.to_string(), amount);
        Ok(())
    }

    pub fn note(&self, month: MonthKey) -> Option<&str> {
        self.data.monthly_notes.get(&month).map(String::as_str)
    }

    /// Sets the note for `month`. Blank text removes the note.
    pub fn set_note(&mut self, month: MonthKey, text: &str) -> Res<()> {
        let text = text.trim();
        if text.is_empty() {
            let _ = self.data.monthly_notes.remove(&month);
        } else {
            let _ = self.data.monthly_notes.insert(month, text.to_string());
        }
        Ok(())
    }

    /// Opening balances that were carried into `month`, if any.
    pub fn carried_balances(&self, month: MonthKey) -> Option<&BTreeMap<String, Amount>> {
        self.data.carry_forward_balances.get(&month)
    }

    /// Copies the account balances of `from` into `to` as its opening balances.
    ///
    /// Balances already set in `to` for other accounts are kept; balances for the carried
    /// accounts are overwritten.
    pub fn carry_forward(
        &mut self,
        from: MonthKey,
        to: MonthKey,
    ) -> Res<BTreeMap<String, Amount>> {
        anyhow::ensure!(
            from != to,
            "Cannot carry balances from {from} into the same month"
        );
        let balances = self
            .record(from)
            .with_context(|| format!("There is no record for {from} to carry forward"))?
            .account_balances
            .clone();

        self.record_mut(to)
            .account_balances
            .extend(balances.iter().map(|(k, v)| (k.clone(), *v)));
        let _ = self
            .data
            .carry_forward_balances
            .insert(to, balances.clone());
        debug!("Carried {} balances from {from} to {to}", balances.len());
        Ok(balances)
    }
}

/// The balance of `account` in `record` after applying `op` with `amount`, failing on overflow.
fn adjusted_balance(
    record: Option<&MonthRecord>,
    account: &str,
    amount: Amount,
    op: fn(Amount, Amount) -> Option<Amount>,
) -> Res<Amount> {
    let current = record
        .and_then(|r| r.account_balances.get(account))
        .copied()
        .unwrap_or_default();
    op(current, amount)
        .with_context(|| format!("Moving {amount} would overflow the balance of {account}"))
}
