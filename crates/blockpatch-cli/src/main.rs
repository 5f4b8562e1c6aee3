//! Blockpatch CLI
//!
//! The command-line interface for applying scripted block replacements
//! to a single source file, transactionally.

mod cli;
mod commands;
mod error;
mod plan;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            // No command provided - show help hint
            println!("{} Block patcher", "blockpatch".green().bold());
            println!();
            println!(
                "Run {} for available commands.",
                "blockpatch --help".cyan()
            );
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Apply {
            file,
            plan,
            dry_run,
            json,
        } => commands::run_apply(&file, &plan, dry_run, json),
        Commands::Check { file, plan, json } => commands::run_check(&file, &plan, json),
        Commands::Diff { file, plan } => commands::run_diff(&file, &plan),
    }
}
