use crate::args::AccountSubcommand;
use crate::commands::{open, save, Out};
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};

/// Adds, removes or lists accounts. Every action returns the resulting account list.
pub async fn account(config: Config, action: &AccountSubcommand) -> Result<Out<Vec<String>>> {
    let mut store = open(&config).await?;
    let message = match action {
        AccountSubcommand::Add { name } => {
            if store.add_account(name).pub_result(ErrorType::Validation)? {
                save(&store).await?;
                format!("Added the account '{}'", name.trim())
            } else {
                format!("The account '{}' already exists", name.trim())
            }
        }
        AccountSubcommand::Remove { name } => {
            store.remove_account(name).pub_result(ErrorType::Validation)?;
            save(&store).await?;
            format!("Removed the account '{name}'")
        }
        AccountSubcommand::List => format!("{} accounts", store.accounts().len()),
    };
    Ok(Out::new(message, store.accounts().to_vec()))
}
