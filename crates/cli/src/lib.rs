pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "loanbot",
    about = "Loanbot operator CLI",
    long_about = "Exercise the loan form normalizers, submit an application to the scoring service, and inspect configuration.",
    after_help = "Examples:\n  loanbot validate annual_salary 5LPA\n  loanbot submit age=30 annual_salary=500000 credit_utilization=40\n  loanbot config"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Run one slot normalizer and print the stored value or the re-prompt")]
    Validate {
        #[arg(help = "Slot name: age, annual_salary or credit_utilization")]
        slot: String,
        #[arg(help = "Raw value as a user would type it", allow_hyphen_values = true)]
        value: String,
    },
    #[command(about = "Submit slots to the configured scoring service and print the replies")]
    Submit {
        #[arg(value_name = "SLOT=VALUE", required = true)]
        slots: Vec<String>,
    },
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Validate { slot, value } => commands::validate::run(&slot, &value),
        Command::Submit { slots } => commands::submit::run(&slots),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
