//! Diff command implementation
//!
//! Previews what apply would change without touching the file.

use std::path::Path;

use colored::Colorize;

use blockpatch_engine::{apply_pipeline, unified_diff};

use crate::error::Result;
use crate::plan;

/// Run the diff command
pub fn run_diff(file: &Path, plan_path: &Path) -> Result<()> {
    let steps = plan::load_plan(plan_path)?;
    let content = blockpatch_fs::read_text(file)?;

    let outcome = apply_pipeline(&content, &steps)?;
    let diff = unified_diff(&content, &outcome.output, &file.to_string_lossy());

    if diff.is_empty() {
        println!(
            "{} No changes. File already matches the plan output.",
            "OK".green().bold()
        );
        return Ok(());
    }

    for line in diff.lines() {
        if line.starts_with("+++") || line.starts_with("---") || line.starts_with("@@") {
            println!("{}", line.cyan());
        } else if line.starts_with('+') {
            println!("{}", line.green());
        } else if line.starts_with('-') {
            println!("{}", line.red());
        } else {
            println!("{line}");
        }
    }

    Ok(())
}
