use cashwise::args::{Args, ChartSubcommand, Command, ReportSubcommand};
use cashwise::{commands, Config, ErrorType, IntoResult, Result};
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().cashwise_home().path();

    // Route to appropriate command handler
    match args.command() {
        Command::Init => commands::init(home).await?.print(),

        Command::Account(account_args) => {
            commands::account(load(home).await?, account_args.action())
                .await?
                .print()
        }

        Command::Income(income_args) => commands::income(load(home).await?, income_args.clone())
            .await?
            .print(),

        Command::Expense(expense_args) => {
            commands::expense(load(home).await?, expense_args.clone())
                .await?
                .print()
        }

        Command::Budget(budget_args) => commands::budget(load(home).await?, budget_args.clone())
            .await?
            .print(),

        Command::Balance(balance_args) => {
            commands::balance(load(home).await?, balance_args.clone())
                .await?
                .print()
        }

        Command::Note(note_args) => commands::note(load(home).await?, note_args.clone())
            .await?
            .print(),

        Command::Show(show_args) => commands::show(load(home).await?, show_args.month)
            .await?
            .print(),

        Command::Carry(carry_args) => commands::carry(load(home).await?, carry_args.clone())
            .await?
            .print(),

        Command::Goal(goal_args) => commands::goal(load(home).await?, goal_args.action())
            .await?
            .print(),

        Command::Recurring(recurring_args) => {
            commands::recurring(load(home).await?, recurring_args.action())
                .await?
                .print()
        }

        Command::Report(report_args) => {
            let config = load(home).await?;
            match report_args.kind() {
                ReportSubcommand::Groups { view } => {
                    commands::report_groups(config, *view).await?.print()
                }
                ReportSubcommand::Income => commands::report_income(config).await?.print(),
            }
        }

        Command::Chart(chart_args) => {
            let config = load(home).await?;
            match chart_args.kind() {
                ChartSubcommand::Groups { view, output } => {
                    commands::chart_groups(config, *view, output.as_deref())
                        .await?
                        .print()
                }
                ChartSubcommand::Income { output } => {
                    commands::chart_income(config, output.as_deref())
                        .await?
                        .print()
                }
            }
        }

        Command::Export(export_args) => {
            commands::export(load(home).await?, export_args.clone())
                .await?
                .print()
        }
    }
}

async fn load(home: &Path) -> Result<Config> {
    Config::load(home).await.pub_result(ErrorType::Config)
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
