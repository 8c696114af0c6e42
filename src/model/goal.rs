use crate::model::Amount;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Something the user is saving toward.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub name: String,
    pub target: Amount,
    #[serde(default)]
    pub saved: Amount,
}

impl SavingsGoal {
    pub fn new(name: impl Into<String>, target: Amount) -> Self {
        Self {
            name: name.into(),
            target,
            saved: Amount::ZERO,
        }
    }

    /// Percent of the target saved so far, rounded to two places. `None` when the target is zero
    /// or the percentage is too large for a `Decimal`.
    pub fn progress(&self) -> Option<Decimal> {
        if self.target.is_zero() {
            return None;
        }
        let pct = self
            .saved
            .value()
            .checked_div(self.target.value())?
            .checked_mul(Decimal::ONE_HUNDRED)?;
        Some(pct.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }

    /// How much is still needed, never less than zero.
    pub fn remaining(&self) -> Amount {
        let remaining = self.target - self.saved;
        if remaining.is_negative() {
            Amount::ZERO
        } else {
            remaining
        }
    }
}

/// Income that arrives every month, e.g. a salary.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringIncome {
    pub source: String,
    pub amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_progress() {
        let mut goal = SavingsGoal::new("Car", Amount::from(3000));
        assert_eq!(goal.progress(), Some(Decimal::ZERO));
        goal.saved = Amount::from(1000);
        assert_eq!(goal.progress(), Some(Decimal::from_str("33.33").unwrap()));
        assert_eq!(goal.remaining(), Amount::from(2000));
    }

    #[test]
    fn test_progress_zero_target() {
        let goal = SavingsGoal::new("Nothing", Amount::ZERO);
        assert_eq!(goal.progress(), None);
    }

    #[test]
    fn test_progress_too_large() {
        let mut goal = SavingsGoal::new("Penny", Amount::from_str("0.01").unwrap());
        goal.saved = Amount::from_str("100000000000000000000000000").unwrap();
        assert_eq!(goal.progress(), None);
        assert_eq!(goal.remaining(), Amount::ZERO);
    }

    #[test]
    fn test_overfunded_goal() {
        let mut goal = SavingsGoal::new("Trip", Amount::from(200));
        goal.saved = Amount::from(250);
        assert_eq!(goal.progress(), Some(Decimal::from_str("125").unwrap()));
        assert_eq!(goal.remaining(), Amount::ZERO);
    }
}
