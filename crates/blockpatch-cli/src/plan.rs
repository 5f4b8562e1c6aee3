//! Patch plan loading
//!
//! A plan is a TOML file holding an ordered list of `[[step]]` tables.
//! Each table lowers into one engine patch step; replacement text may be
//! inline or loaded from a file next to the plan.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use blockpatch_engine::{Anchor, BlockPattern, EndPolicy, Occurrence, PatchStep, SpanMode};

use crate::error::{CliError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanFile {
    #[serde(default, rename = "step")]
    pub steps: Vec<StepDef>,
}

/// One `[[step]]` table, as written in the plan.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct StepDef {
    pub name: String,
    pub start: Option<String>,
    pub start_regex: Option<String>,
    pub end: String,
    #[serde(default)]
    pub span: SpanDef,
    #[serde(default)]
    pub end_policy: EndPolicy,
    #[serde(default)]
    pub occurrence: Occurrence,
    #[serde(default = "default_required")]
    pub required: bool,
    pub replacement: Option<String>,
    pub replacement_file: Option<PathBuf>,
}

fn default_required() -> bool {
    true
}

/// Window bounds: `"single-line"`, `"unbounded"`, or a bare line count
/// (`span = 40` allows the closing marker up to 40 lines below the
/// anchor).
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum SpanDef {
    Keyword(SpanKeyword),
    Lines(usize),
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpanKeyword {
    SingleLine,
    Unbounded,
}

impl Default for SpanDef {
    fn default() -> Self {
        Self::Keyword(SpanKeyword::SingleLine)
    }
}

impl From<SpanDef> for SpanMode {
    fn from(def: SpanDef) -> Self {
        match def {
            SpanDef::Keyword(SpanKeyword::SingleLine) => SpanMode::SingleLine,
            SpanDef::Keyword(SpanKeyword::Unbounded) => SpanMode::Unbounded,
            SpanDef::Lines(max_lines) => SpanMode::MultiLine { max_lines },
        }
    }
}

/// Load a plan file and lower it into engine steps.
pub fn load_plan(path: &Path) -> Result<Vec<PatchStep>> {
    let raw = blockpatch_fs::read_text(path)?;
    let plan: PlanFile = toml::from_str(&raw).map_err(|e| CliError::plan(path, e.to_string()))?;
    if plan.steps.is_empty() {
        return Err(CliError::plan(path, "plan contains no steps"));
    }

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    plan.steps
        .into_iter()
        .map(|def| lower_step(def, base))
        .collect()
}

fn lower_step(def: StepDef, base: &Path) -> Result<PatchStep> {
    let anchor = match (&def.start, &def.start_regex) {
        (Some(text), None) => Anchor::literal(text.clone()),
        (None, Some(pattern)) => Anchor::regex(pattern),
        _ => {
            return Err(CliError::plan_step(
                &def.name,
                "exactly one of 'start' or 'start-regex' is required",
            ));
        }
    }
    .map_err(|e| CliError::plan_step(&def.name, e.to_string()))?;

    let pattern = BlockPattern::new(anchor, def.end)
        .map_err(|e| CliError::plan_step(&def.name, e.to_string()))?
        .with_span(def.span.into())
        .with_end_policy(def.end_policy);

    let replacement = match (def.replacement, def.replacement_file) {
        (Some(text), None) => text,
        (None, Some(file)) => blockpatch_fs::read_text(&base.join(file))?,
        _ => {
            return Err(CliError::plan_step(
                &def.name,
                "exactly one of 'replacement' or 'replacement-file' is required",
            ));
        }
    };

    Ok(PatchStep {
        name: def.name,
        pattern,
        replacement,
        occurrence: def.occurrence,
        required: def.required,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lower(toml_src: &str) -> Result<PatchStep> {
        let plan: PlanFile = toml::from_str(toml_src).expect("plan should parse");
        let mut steps = plan.steps;
        assert_eq!(steps.len(), 1);
        lower_step(steps.remove(0), Path::new("."))
    }

    #[test]
    fn minimal_step_parses_with_defaults() {
        let step = lower(
            r#"
            [[step]]
            name = "fix"
            start = "begin"
            end = "done"
            replacement = "new"
            "#,
        )
        .unwrap();

        assert_eq!(step.name, "fix");
        assert_eq!(step.occurrence, Occurrence::First);
        assert!(step.required);
    }

    #[test]
    fn span_accepts_keyword_and_line_count() {
        let plan: PlanFile = toml::from_str(
            r#"
            [[step]]
            name = "a"
            start = "x"
            end = "y"
            span = "unbounded"
            replacement = "r"

            [[step]]
            name = "b"
            start = "x"
            end = "y"
            span = 40
            replacement = "r"
            "#,
        )
        .unwrap();

        assert!(matches!(
            SpanMode::from(plan.steps[0].span),
            SpanMode::Unbounded
        ));
        assert!(matches!(
            SpanMode::from(plan.steps[1].span),
            SpanMode::MultiLine { max_lines: 40 }
        ));
    }

    #[test]
    fn kebab_case_enums_parse() {
        let step = lower(
            r#"
            [[step]]
            name = "fix"
            start = "begin"
            end = "done"
            end-policy = "furthest"
            occurrence = "single"
            required = false
            replacement = "new"
            "#,
        )
        .unwrap();

        assert_eq!(step.occurrence, Occurrence::Single);
        assert!(!step.required);
    }

    #[test]
    fn start_and_start_regex_are_mutually_exclusive() {
        let err = lower(
            r#"
            [[step]]
            name = "fix"
            start = "begin"
            start-regex = "begin"
            end = "done"
            replacement = "new"
            "#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("'start' or 'start-regex'"));
    }

    #[test]
    fn replacement_source_is_mandatory() {
        let err = lower(
            r#"
            [[step]]
            name = "fix"
            start = "begin"
            end = "done"
            "#,
        )
        .unwrap_err();

        assert!(
            err.to_string()
                .contains("'replacement' or 'replacement-file'")
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: std::result::Result<PlanFile, _> = toml::from_str(
            r#"
            [[step]]
            name = "fix"
            start = "begin"
            end = "done"
            replacement = "new"
            typo-field = true
            "#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn bad_regex_is_reported_with_the_step_name() {
        let err = lower(
            r#"
            [[step]]
            name = "broken"
            start-regex = "[unclosed"
            end = "done"
            replacement = "new"
            "#,
        )
        .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("broken"));
        assert!(message.contains("regex"));
    }
}
