//! Apply command implementation
//!
//! Runs the whole plan against the target file and persists the result
//! atomically, all-or-nothing: any failing required step aborts before
//! the write and leaves the file untouched.

use std::path::Path;

use colored::Colorize;
use serde_json::json;

use blockpatch_engine::{StepReport, apply_pipeline, unified_diff};

use crate::error::Result;
use crate::plan;

/// Run the apply command
pub fn run_apply(file: &Path, plan_path: &Path, dry_run: bool, json: bool) -> Result<()> {
    let steps = plan::load_plan(plan_path)?;
    let content = blockpatch_fs::read_text(file)?;

    let outcome = apply_pipeline(&content, &steps)?;
    let changed = outcome.output != content;

    if json {
        let payload = json!({
            "file": file.display().to_string(),
            "dry_run": dry_run,
            "changed": changed,
            "written": changed && !dry_run,
            "steps": outcome.reports,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        print_reports(&outcome.reports);
    }

    if dry_run {
        if !json {
            println!();
            let diff = unified_diff(&content, &outcome.output, &file.to_string_lossy());
            if diff.is_empty() {
                println!("{} No changes.", "OK".green().bold());
            } else {
                print!("{diff}");
            }
            println!();
            println!("{} dry-run, nothing written", "note".yellow().bold());
        }
        return Ok(());
    }

    if changed {
        blockpatch_fs::write_text(file, &outcome.output)?;
        if !json {
            println!("{} {}", "Patched".green().bold(), file.display());
        }
    } else if !json {
        println!("{} Already up to date.", "OK".green().bold());
    }

    Ok(())
}

fn print_reports(reports: &[StepReport]) {
    for report in reports {
        if report.matched {
            println!(
                "  {} {} ({} replaced)",
                "+".green(),
                report.name,
                report.count
            );
        } else {
            println!("  {} {} (no match, optional)", "-".yellow(), report.name);
        }
    }
}
