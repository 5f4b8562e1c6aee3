//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Blockpatch - Apply scripted block replacements to a source file
#[derive(Parser, Debug)]
#[command(name = "blockpatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Apply a patch plan to a file
    ///
    /// Runs every step of the plan against the file's content and writes
    /// the result back atomically, but only if every required step
    /// matched. On any failure the file is left untouched.
    ///
    /// Examples:
    ///   blockpatch apply page.tsx --plan migrate.toml
    ///   blockpatch apply page.tsx --plan migrate.toml --dry-run
    Apply {
        /// Target file to patch
        file: PathBuf,

        /// Patch plan (TOML)
        #[arg(short, long)]
        plan: PathBuf,

        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Check which plan steps currently match the file
    ///
    /// Reports per-step match counts without writing anything. Exits
    /// non-zero when a required step matches nothing, or when a
    /// single-occurrence step matches more than once.
    Check {
        /// Target file to inspect
        file: PathBuf,

        /// Patch plan (TOML)
        #[arg(short, long)]
        plan: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Preview the changes a plan would make as a unified diff
    Diff {
        /// Target file to inspect
        file: PathBuf,

        /// Patch plan (TOML)
        #[arg(short, long)]
        plan: PathBuf,
    },
}
