use crate::error::Res;
use crate::store::{ensure_name, Store};
use anyhow::{bail, ensure};

impl Store {
    /// The account names in the order they were added.
    pub fn accounts(&self) -> &[String] {
        &self.data.account_list
    }

    pub fn has_account(&self, name: &str) -> bool {
        self.data.account_list.iter().any(|a| a == name)
    }

    /// Adds an account. Returns `false`, changing nothing, when the account already exists.
    pub fn add_account(&mut self, name: &str) -> Res<bool> {
        let name = ensure_name(name, "account")?;
        if self.has_account(&name) {
            return Ok(false);
        }
        self.data.account_list.push(name);
        Ok(true)
    }

    /// Removes an account from the list. Balances already recorded under it are kept.
    ///
    /// Fails while a recurring income entry still pays into the account.
    pub fn remove_account(&mut self, name: &str) -> Res<()> {
        let Some(ix) = self.data.account_list.iter().position(|a| a == name) else {
            bail!("There is no account named '{name}'");
        };
        if let Some(r) = self
            .data
            .recurring_income
            .iter()
            .find(|r| r.account.as_deref() == Some(name))
        {
            bail!(
                "The account '{name}' receives the recurring income from '{}', remove that first",
                r.source
            );
        }
        let _ = self.data.account_list.remove(ix);
        Ok(())
    }

    /// Fails unless `name` is a known account.
    pub(super) fn ensure_account(&self, name: &str) -> Res<()> {
        ensure!(
            self.has_account(name),
            "There is no account named '{name}', add it with 'cashwise account add'"
        );
        Ok(())
    }
}
