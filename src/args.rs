//! These structs provide the CLI interface for the cashwise CLI.

use crate::model::{Amount, MonthKey};
use crate::report::ViewMode;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// cashwise: A command-line tool for keeping a monthly household budget.
///
/// Record income and expenses against a month, plan budget lines, track account balances and
/// savings goals, and report how spending compares to income by month, quarter or year.
///
/// All data is kept in a single JSON file in the cashwise home directory. Run `cashwise init`
/// once to create it.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory, the configuration file and an empty budget.
    ///
    /// This is the first command you should run. By default the data lives in $HOME/cashwise;
    /// pass --cashwise-home or set CASHWISE_HOME to keep it somewhere else.
    Init,
    /// Add, remove or list accounts.
    Account(AccountArgs),
    /// Record income received in a month.
    Income(IncomeArgs),
    /// Record money spent in a month.
    Expense(ExpenseArgs),
    /// Set the planned amount for a category in a month.
    Budget(BudgetArgs),
    /// Set the balance of an account in a month.
    Balance(BalanceArgs),
    /// Set or clear the note for a month.
    Note(NoteArgs),
    /// Show everything recorded for a month.
    Show(ShowArgs),
    /// Carry the account balances of one month into another as its opening balances.
    Carry(CarryArgs),
    /// Manage savings goals.
    Goal(GoalArgs),
    /// Manage income that arrives every month.
    Recurring(RecurringArgs),
    /// Print spending and income reports as JSON.
    Report(ReportArgs),
    /// Produce ECharts chart configurations for the reports.
    Chart(ChartArgs),
    /// Export a month as CSV.
    Export(ExportArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where cashwise data and configuration is held. Defaults to ~/cashwise
    #[arg(long, env = "CASHWISE_HOME", default_value_t = default_cashwise_home())]
    cashwise_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, cashwise_home: PathBuf) -> Self {
        Self {
            log_level,
            cashwise_home: cashwise_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn cashwise_home(&self) -> &DisplayPath {
        &self.cashwise_home
    }
}

/// Args for the `cashwise account` command.
#[derive(Debug, Parser, Clone)]
pub struct AccountArgs {
    #[command(subcommand)]
    action: AccountSubcommand,
}

impl AccountArgs {
    pub fn new(action: AccountSubcommand) -> Self {
        Self { action }
    }

    pub fn action(&self) -> &AccountSubcommand {
        &self.action
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum AccountSubcommand {
    /// Add an account. Adding an existing account changes nothing.
    Add { name: String },
    /// Remove an account. Balances already recorded under it are kept.
    Remove { name: String },
    /// List the accounts.
    List,
}

/// Args for the `cashwise income` command.
#[derive(Debug, Parser, Clone)]
pub struct IncomeArgs {
    /// Where the money came from, e.g. "Salary".
    pub source: String,

    /// The amount received, e.g. 1250.00
    pub amount: Amount,

    /// The account the money was paid into. Its balance goes up by the amount.
    #[arg(long)]
    pub account: Option<String>,

    /// The month, in the form YYYY-MM. Defaults to the current month.
    #[arg(long, default_value_t = MonthKey::current())]
    pub month: MonthKey,
}

/// Args for the `cashwise expense` command.
#[derive(Debug, Parser, Clone)]
pub struct ExpenseArgs {
    /// The spending category, e.g. "Food".
    pub category: String,

    /// The amount spent.
    pub amount: Amount,

    /// The account the money was paid from. Its balance goes down by the amount.
    #[arg(long)]
    pub account: Option<String>,

    /// The month, in the form YYYY-MM. Defaults to the current month.
    #[arg(long, default_value_t = MonthKey::current())]
    pub month: MonthKey,
}

/// Args for the `cashwise budget` command.
#[derive(Debug, Parser, Clone)]
pub struct BudgetArgs {
    /// The category to plan for, e.g. "Tithe".
    pub category: String,

    /// The planned amount.
    pub amount: Amount,

    /// The month, in the form YYYY-MM. Defaults to the current month.
    #[arg(long, default_value_t = MonthKey::current())]
    pub month: MonthKey,
}

/// Args for the `cashwise balance` command.
#[derive(Debug, Parser, Clone)]
pub struct BalanceArgs {
    /// The account name. It must already be in the account list.
    pub account: String,

    /// The balance. This may be negative.
    #[arg(allow_hyphen_values = true)]
    pub amount: Amount,

    /// The month, in the form YYYY-MM. Defaults to the current month.
    #[arg(long, default_value_t = MonthKey::current())]
    pub month: MonthKey,
}

/// Args for the `cashwise note` command.
#[derive(Debug, Parser, Clone)]
pub struct NoteArgs {
    /// The note. An empty string removes the note.
    pub text: String,

    /// The month, in the form YYYY-MM. Defaults to the current month.
    #[arg(long, default_value_t = MonthKey::current())]
    pub month: MonthKey,
}

/// Args for the `cashwise show` command.
#[derive(Debug, Parser, Clone)]
pub struct ShowArgs {
    /// The month, in the form YYYY-MM.
    pub month: MonthKey,
}

/// Args for the `cashwise carry` command.
#[derive(Debug, Parser, Clone)]
pub struct CarryArgs {
    /// The month whose balances are carried.
    pub from: MonthKey,

    /// The month that receives them as opening balances. Defaults to the month after `from`.
    pub to: Option<MonthKey>,
}

/// Args for the `cashwise goal` command.
#[derive(Debug, Parser, Clone)]
pub struct GoalArgs {
    #[command(subcommand)]
    action: GoalSubcommand,
}

impl GoalArgs {
    pub fn new(action: GoalSubcommand) -> Self {
        Self { action }
    }

    pub fn action(&self) -> &GoalSubcommand {
        &self.action
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum GoalSubcommand {
    /// Add a savings goal.
    Add { name: String, target: Amount },
    /// Put money toward a savings goal.
    Contribute { name: String, amount: Amount },
    /// List the savings goals and their progress.
    List,
}

/// Args for the `cashwise recurring` command.
#[derive(Debug, Parser, Clone)]
pub struct RecurringArgs {
    #[command(subcommand)]
    action: RecurringSubcommand,
}

impl RecurringArgs {
    pub fn new(action: RecurringSubcommand) -> Self {
        Self { action }
    }

    pub fn action(&self) -> &RecurringSubcommand {
        &self.action
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum RecurringSubcommand {
    /// Register income that arrives every month.
    Add {
        source: String,
        amount: Amount,
        /// The account the income is paid into.
        #[arg(long)]
        account: Option<String>,
    },
    /// Stop tracking a recurring income.
    Remove { source: String },
    /// List the recurring income.
    List,
    /// Record every recurring income in a month. Sources that already have income recorded in
    /// that month are skipped, so running it again is safe.
    Apply {
        /// The month, in the form YYYY-MM. Defaults to the current month.
        #[arg(long, default_value_t = MonthKey::current())]
        month: MonthKey,
    },
}

/// Args for the `cashwise report` command.
#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    #[command(subcommand)]
    kind: ReportSubcommand,
}

impl ReportArgs {
    pub fn new(kind: ReportSubcommand) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> &ReportSubcommand {
        &self.kind
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum ReportSubcommand {
    /// Income, spending per category and spending as a percentage of income, per bucket.
    Groups {
        /// How months are grouped. Defaults to the `default_view` in config.json.
        #[arg(long, value_enum)]
        view: Option<ViewMode>,
    },
    /// Income per source for every month that has income.
    Income,
}

/// Args for the `cashwise chart` command.
#[derive(Debug, Parser, Clone)]
pub struct ChartArgs {
    #[command(subcommand)]
    kind: ChartSubcommand,
}

impl ChartArgs {
    pub fn new(kind: ChartSubcommand) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> &ChartSubcommand {
        &self.kind
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum ChartSubcommand {
    /// One pie chart per bucket of spending as a percentage of income.
    Groups {
        /// How months are grouped. Defaults to the `default_view` in config.json.
        #[arg(long, value_enum)]
        view: Option<ViewMode>,

        /// Write the chart JSON to this file instead of printing it.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// A line chart of income per source over time.
    Income {
        /// Write the chart JSON to this file instead of printing it.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Args for the `cashwise export` command.
#[derive(Debug, Parser, Clone)]
pub struct ExportArgs {
    /// The month to export. Defaults to the latest month with a record.
    #[arg(long)]
    pub month: Option<MonthKey>,

    /// The CSV file to write. Defaults to `<month>_Cashwise_Export.csv` in the current directory.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

fn default_cashwise_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("cashwise"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --cashwise-home or CASHWISE_HOME instead of relying on the \
                default cashwise home directory. If you continue using the program right now, \
                you may have problems!",
            );
            PathBuf::from("cashwise")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        let mut argv = vec!["cashwise", "--cashwise-home", "/tmp/cw"];
        argv.extend_from_slice(args);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_parse_income() {
        let args = parse(&[
            "income", "Salary", "$1,250.00", "--account", "Bank 1", "--month", "2024-03",
        ]);
        let Command::Income(income) = args.command() else {
            panic!("expected income, got {:?}", args.command());
        };
        assert_eq!(income.source, "Salary");
        assert_eq!(income.amount, "1250".parse::<Amount>().unwrap());
        assert_eq!(income.account.as_deref(), Some("Bank 1"));
        assert_eq!(income.month.to_string(), "2024-03");
        assert_eq!(args.common().cashwise_home().to_string(), "/tmp/cw");
    }

    #[test]
    fn test_month_defaults_to_current() {
        let args = parse(&["budget", "Tithe", "300"]);
        let Command::Budget(budget) = args.command() else {
            panic!("expected budget");
        };
        assert_eq!(budget.month, MonthKey::current());
    }

    #[test]
    fn test_negative_balance() {
        let args = parse(&["balance", "Bank 1", "-20.50"]);
        let Command::Balance(balance) = args.command() else {
            panic!("expected balance");
        };
        assert!(balance.amount.is_negative());
    }

    #[test]
    fn test_view_aliases() {
        let args = parse(&["report", "groups", "--view", "2"]);
        let Command::Report(report) = args.command() else {
            panic!("expected report");
        };
        assert!(matches!(
            report.kind(),
            ReportSubcommand::Groups {
                view: Some(ViewMode::Quarterly)
            }
        ));
    }

    #[test]
    fn test_rejects_bad_input() {
        let base = ["cashwise", "--cashwise-home", "/tmp/cw"];
        let bad: [&[&str]; 3] = [
            &["report", "groups", "--view", "weekly"],
            &["show", "2024-13"],
            &["expense", "Food", "lots"],
        ];
        for args in bad {
            let argv = base.iter().chain(args.iter());
            assert!(Args::try_parse_from(argv).is_err(), "{args:?}");
        }
    }
}
