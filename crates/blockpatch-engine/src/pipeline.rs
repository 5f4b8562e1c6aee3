//! Ordered replacement pipelines
//!
//! A pipeline applies a sequence of named steps to one file's content;
//! each step's output feeds the next. The caller persists the final text
//! only when the whole pipeline succeeds.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::pattern::BlockPattern;
use crate::replace::{ReplaceMode, count_matches, replace};

/// How many matches a step may consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Occurrence {
    /// Replace the first matching span.
    #[default]
    First,
    /// Replace every matching span.
    All,
    /// Replace the first span, but fail if more than one span matches.
    Single,
}

/// One named replacement step.
#[derive(Debug, Clone)]
pub struct PatchStep {
    pub name: String,
    pub pattern: BlockPattern,
    pub replacement: String,
    pub occurrence: Occurrence,
    /// Required steps abort the pipeline when nothing matches; optional
    /// steps only record the miss.
    pub required: bool,
}

impl PatchStep {
    pub fn new(
        name: impl Into<String>,
        pattern: BlockPattern,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            pattern,
            replacement: replacement.into(),
            occurrence: Occurrence::default(),
            required: true,
        }
    }

    pub fn with_occurrence(mut self, occurrence: Occurrence) -> Self {
        self.occurrence = occurrence;
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// Per-step outcome. For `apply_pipeline`, `count` is the number of
/// spans replaced; for `check_pipeline`, the number of spans found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub name: String,
    pub matched: bool,
    pub count: usize,
}

/// Final text plus the ordered per-step reports.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub output: String,
    pub reports: Vec<StepReport>,
}

/// Run every step in order. Aborts with `PatternNotFound` when a
/// required step matches nothing, and with `AmbiguousMatch` when a
/// `Single` step would match more than once; nothing is ever partially
/// applied to storage because this function never touches it.
pub fn apply_pipeline(content: &str, steps: &[PatchStep]) -> Result<PipelineOutcome> {
    let mut current = content.to_string();
    let mut reports = Vec::with_capacity(steps.len());

    for step in steps {
        if step.occurrence == Occurrence::Single {
            let found = count_matches(&current, &step.pattern);
            if found > 1 {
                return Err(Error::AmbiguousMatch {
                    step: step.name.clone(),
                    count: found,
                });
            }
        }

        let mode = match step.occurrence {
            Occurrence::All => ReplaceMode::All,
            Occurrence::First | Occurrence::Single => ReplaceMode::First,
        };
        let result = replace(&current, &step.pattern, &step.replacement, mode);

        if !result.matched && step.required {
            return Err(Error::PatternNotFound {
                step: step.name.clone(),
            });
        }

        debug!(step = %step.name, count = result.count, "applied replacement step");
        reports.push(StepReport {
            name: step.name.clone(),
            matched: result.matched,
            count: result.count,
        });
        current = result.output;
    }

    Ok(PipelineOutcome {
        output: current,
        reports,
    })
}

/// Dry inspection: run the same pipeline but report how many spans each
/// step's pattern finds in the text it would see, without ever failing.
/// Callers decide which misses or surpluses are fatal.
pub fn check_pipeline(content: &str, steps: &[PatchStep]) -> Vec<StepReport> {
    let mut current = content.to_string();
    let mut reports = Vec::with_capacity(steps.len());

    for step in steps {
        let found = count_matches(&current, &step.pattern);
        let mode = match step.occurrence {
            Occurrence::All => ReplaceMode::All,
            Occurrence::First | Occurrence::Single => ReplaceMode::First,
        };
        let result = replace(&current, &step.pattern, &step.replacement, mode);

        reports.push(StepReport {
            name: step.name.clone(),
            matched: found > 0,
            count: found,
        });
        current = result.output;
    }

    reports
}
