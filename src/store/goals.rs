//! Savings goals and recurring income.

use crate::error::Res;
use crate::model::{Amount, MonthKey, RecurringIncome, SavingsGoal, Transaction};
use crate::store::{ensure_name, ensure_not_negative, Store};
use anyhow::{bail, ensure, Context};
use tracing::info;

impl Store {
    pub fn goals(&self) -> &[SavingsGoal] {
        &self.data.savings_goals
    }

    pub fn add_goal(&mut self, name: &str, target: Amount) -> Res<&SavingsGoal> {
        let name = ensure_name(name, "goal")?;
        ensure_not_negative(target)?;
        ensure!(
            !self.data.savings_goals.iter().any(|g| g.name == name),
            "A savings goal named '{name}' already exists"
        );
        self.data.savings_goals.push(SavingsGoal::new(name, target));
        Ok(&self.data.savings_goals[self.data.savings_goals.len() - 1])
    }

    /// Adds `amount` to what has been saved toward the goal called `name`.
    pub fn contribute(&mut self, name: &str, amount: Amount) -> Res<&SavingsGoal> {
        ensure_not_negative(amount)?;
        let goal = self
            .data
            .savings_goals
            .iter_mut()
            .find(|g| g.name == name)
            .with_context(|| format!("There is no savings goal named '{name}'"))?;
        goal.saved = goal
            .saved
            .checked_add(amount)
            .with_context(|| format!("Adding {amount} would overflow the savings goal '{name}'"))?;
        if goal.remaining().is_zero() {
            info!("The savings goal '{}' has been reached", goal.name);
        }
        Ok(&*goal)
    }

    pub fn recurring(&self) -> &[RecurringIncome] {
        &self.data.recurring_income
    }

    /// Registers income that arrives every month.
    pub fn add_recurring(&mut self, source: &str, amount: Amount, account: Option<&str>) -> Res<()> {
        let source = ensure_name(source, "income source")?;
        ensure_not_negative(amount)?;
        if let Some(account) = account {
            self.ensure_account(account)?;
        }
        ensure!(
            !self.data.recurring_income.iter().any(|r| r.source == source),
            "Recurring income from '{source}' already exists"
        );
        self.data.recurring_income.push(RecurringIncome {
            source,
            amount,
            account: account.map(str::to_string),
        });
        Ok(())
    }

    pub fn remove_recurring(&mut self, source: &str) -> Res<()> {
        let Some(ix) = self
            .data
            .recurring_income
            .iter()
            .position(|r| r.source == source)
        else {
            bail!("There is no recurring income from '{source}'");
        };
        let _ = self.data.recurring_income.remove(ix);
        Ok(())
    }

    /// Records one income transaction in `month` for every recurring income entry.
    ///
    /// Sources that already have an income transaction in `month` are skipped, so applying
    /// twice records nothing the second time.
    pub fn apply_recurring(&mut self, month: MonthKey) -> Res<Vec<Transaction>> {
        let recurring = self.data.recurring_income.clone();
        let mut recorded = Vec::new();
        for r in &recurring {
            let already = self
                .record(month)
                .is_some_and(|rec| rec.income_transactions().any(|t| t.category == r.source));
            if already {
                info!("Income from '{}' is already recorded in {month}", r.source);
                continue;
            }
            recorded.push(self.record_income(month, &r.source, r.amount, r.account.as_deref())?);
        }
        Ok(recorded)
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{Amount, MonthKey};
    use crate::store::scratch_store;

    #[test]
    fn test_goals() {
        let mut store = scratch_store();
        store.add_goal("Emergency Fund", Amount::from(1000)).unwrap();
        store.contribute("Emergency Fund", Amount::from(250)).unwrap();
        let goal = store.contribute("Emergency Fund", Amount::from(250)).unwrap();
        assert_eq!(goal.saved, Amount::from(500));
        assert_eq!(goal.remaining(), Amount::from(500));
        assert_eq!(store.goals().len(), 1);
    }

    #[test]
    fn test_goal_errors() {
        let mut store = scratch_store();
        store.add_goal("Car", Amount::from(5000)).unwrap();
        assert!(store.add_goal("Car", Amount::from(1)).is_err());
        assert!(store.add_goal("", Amount::from(1)).is_err());
        let err = store.contribute("Boat", Amount::from(1)).unwrap_err();
        assert!(err.to_string().contains("no savings goal named 'Boat'"));
        assert!(store.contribute("Car", Amount::from(-5)).is_err());
    }

    #[test]
    fn test_contribution_that_overflows_is_rejected() {
        let mut store = scratch_store();
        let max = Amount::from(rust_decimal::Decimal::MAX);
        store.add_goal("Moon", max).unwrap();
        store.contribute("Moon", max).unwrap();
        let err = store.contribute("Moon", Amount::from(1)).unwrap_err();
        assert!(err.to_string().contains("overflow the savings goal 'Moon'"));
        assert_eq!(store.goals()[0].saved, max);
    }

    #[test]
    fn test_apply_recurring() {
        let mut store = scratch_store();
        store
            .add_recurring("Salary", Amount::from(3000), Some("Bank 1"))
            .unwrap();
        store.add_recurring("Rental", Amount::from(800), None).unwrap();

        let month: MonthKey = "2024-03".parse().unwrap();
        let recorded = store.apply_recurring(month).unwrap();
        assert_eq!(recorded.len(), 2);

        let record = store.record(month).unwrap();
        assert_eq!(record.income, Amount::from(3800));
        assert_eq!(record.account_balances["Bank 1"], Amount::from(3000));

        let series = store.income_series().unwrap();
        assert_eq!(series.series["Rental"], vec![Amount::from(800)]);
    }

    #[test]
    fn test_apply_recurring_twice_records_once() {
        let mut store = scratch_store();
        store.add_recurring("Salary", Amount::from(3000), None).unwrap();
        store.add_recurring("Rental", Amount::from(800), None).unwrap();
        let month: MonthKey = "2024-03".parse().unwrap();
        store
            .record_income(month, "Rental", Amount::from(750), None)
            .unwrap();

        let recorded = store.apply_recurring(month).unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].category, "Salary");

        assert!(store.apply_recurring(month).unwrap().is_empty());
        let record = store.record(month).unwrap();
        assert_eq!(record.income, Amount::from(3750));
        assert_eq!(record.income_transactions().count(), 2);
    }

    #[test]
    fn test_recurring_add_remove() {
        let mut store = scratch_store();
        store.add_recurring("Salary", Amount::from(3000), None).unwrap();
        assert!(store.add_recurring("Salary", Amount::from(1), None).is_err());
        assert!(store
            .add_recurring("Bonus", Amount::from(1), Some("Vault"))
            .is_err());
        store.remove_recurring("Salary").unwrap();
        assert!(store.recurring().is_empty());
        assert!(store.remove_recurring("Salary").is_err());
    }
}
