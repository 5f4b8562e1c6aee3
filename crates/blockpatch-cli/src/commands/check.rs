//! Check command implementation
//!
//! Reports, per step, how many spans the pattern finds in the content it
//! would see. Never writes. Useful both before a migration (are the
//! anchors still valid?) and after one (the old form should be gone).

use std::path::Path;

use colored::Colorize;
use serde_json::json;

use blockpatch_engine::{Occurrence, check_pipeline};

use crate::error::{CliError, Result};
use crate::plan;

/// Run the check command
pub fn run_check(file: &Path, plan_path: &Path, json: bool) -> Result<()> {
    let steps = plan::load_plan(plan_path)?;
    let content = blockpatch_fs::read_text(file)?;

    let reports = check_pipeline(&content, &steps);

    let mut missing = Vec::new();
    let mut ambiguous = Vec::new();
    for (step, report) in steps.iter().zip(&reports) {
        if step.required && report.count == 0 {
            missing.push(report.name.clone());
        }
        if step.occurrence == Occurrence::Single && report.count > 1 {
            ambiguous.push(report.name.clone());
        }
    }

    if json {
        let payload = json!({
            "file": file.display().to_string(),
            "steps": reports,
            "missing": missing,
            "ambiguous": ambiguous,
            "ok": missing.is_empty() && ambiguous.is_empty(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        for (step, report) in steps.iter().zip(&reports) {
            let status = if report.count == 0 && step.required {
                "missing".red().bold()
            } else if report.count == 0 {
                "absent".yellow()
            } else if step.occurrence == Occurrence::Single && report.count > 1 {
                "ambiguous".red().bold()
            } else {
                "ok".green()
            };
            println!(
                "  {} {} ({} match{})",
                status,
                report.name,
                report.count,
                if report.count == 1 { "" } else { "es" }
            );
        }
    }

    if !missing.is_empty() {
        return Err(CliError::user(format!(
            "pattern not found for required step(s): {}",
            missing.join(", ")
        )));
    }
    if !ambiguous.is_empty() {
        return Err(CliError::user(format!(
            "more than one match for single-occurrence step(s): {}",
            ambiguous.join(", ")
        )));
    }

    Ok(())
}
