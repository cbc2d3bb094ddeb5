//! Clinic Console - Main Entry Point
//!
//! Parses the command line, loads configuration, restores the session and
//! runs one command.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use clinic_console::{Cli, Console, ConsoleConfig, commands, logging};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            for line in commands::error_report(&e) {
                eprintln!("{line}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ConsoleConfig::load(cli.config.as_deref())?;
    let console = Console::connect(&config).await?;
    let mut status = console.session.subscribe();
    status.mark_unchanged();

    let result = commands::run(
        cli.command,
        &console,
        &mut io::stdout().lock(),
        &mut io::stdin().lock(),
    )
    .await;

    // A refresh rejected mid-command surfaces here even if the command
    // itself reported something else.
    if status.has_changed().unwrap_or(false) && status.borrow_and_update().requires_login() {
        eprintln!("{}", status.borrow().message());
    }
    result
}
