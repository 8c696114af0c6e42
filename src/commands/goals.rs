//! Savings goal and recurring income commands.

use crate::args::{GoalSubcommand, RecurringSubcommand};
use crate::commands::{open, save, Out};
use crate::error::{ErrorType, IntoResult};
use crate::model::{RecurringIncome, SavingsGoal};
use crate::{Config, Result};

/// Adds, funds or lists savings goals. Every action returns the resulting goal list.
pub async fn goal(config: Config, action: &GoalSubcommand) -> Result<Out<Vec<SavingsGoal>>> {
    let mut store = open(&config).await?;
    let message = match action {
        GoalSubcommand::Add { name, target } => {
            let goal = store.add_goal(name, *target).pub_result(ErrorType::Validation)?;
            let message = format!("Added the savings goal '{}' of {}", goal.name, goal.target);
            save(&store).await?;
            message
        }
        GoalSubcommand::Contribute { name, amount } => {
            let goal = store
                .contribute(name, *amount)
                .pub_result(ErrorType::Validation)?;
            let message = match goal.progress() {
                Some(pct) => format!(
                    "'{}' is {}% funded, {} to go",
                    goal.name,
                    pct.normalize(),
                    goal.remaining()
                ),
                None => format!("Saved {} toward '{}'", goal.saved, goal.name),
            };
            save(&store).await?;
            message
        }
        GoalSubcommand::List => format!("{} savings goals", store.goals().len()),
    };
    Ok(Out::new(message, store.goals().to_vec()))
}

/// Adds, removes, lists or applies recurring income.
///
/// `apply` records one income transaction per entry in the given month, skipping sources that
/// already have income there.
pub async fn recurring(
    config: Config,
    action: &RecurringSubcommand,
) -> Result<Out<Vec<RecurringIncome>>> {
    let mut store = open(&config).await?;
    let message = match action {
        RecurringSubcommand::Add {
            source,
            amount,
            account,
        } => {
            store
                .add_recurring(source, *amount, account.as_deref())
                .pub_result(ErrorType::Validation)?;
            save(&store).await?;
            format!("Added recurring income from '{}'", source.trim())
        }
        RecurringSubcommand::Remove { source } => {
            store
                .remove_recurring(source)
                .pub_result(ErrorType::Validation)?;
            save(&store).await?;
            format!("Removed recurring income from '{source}'")
        }
        RecurringSubcommand::List => {
            format!("{} recurring income entries", store.recurring().len())
        }
        RecurringSubcommand::Apply { month } => {
            let recorded = store
                .apply_recurring(*month)
                .pub_result(ErrorType::Validation)?;
            save(&store).await?;
            format!("Recorded {} recurring income entries in {month}", recorded.len())
        }
    };
    Ok(Out::new(message, store.recurring().to_vec()))
}
