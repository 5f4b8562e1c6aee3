//! Full migration flow across the storage and engine layers: read a
//! source file, run an ordered replacement pipeline, persist the result
//! atomically only on success.

use blockpatch_engine::{
    Anchor, BlockPattern, Error, PatchStep, SpanMode, apply_pipeline, check_pipeline,
};
use blockpatch_fs as fsx;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

const PAGE: &str = "\
import { roleService } from './services';

  const handleSubmit = (e) => {
    setSubmitting(true);
    setTimeout(() => {
      commitLocal();
      setSubmitting(false);
    }, 300);
  };

  const handleDelete = () => {
    setTimeout(() => {
      dropLocal();
    }, 300);
  };
";

fn handler_step(name: &str, anchor: &str, replacement: &str) -> PatchStep {
    let pattern = BlockPattern::new(Anchor::literal(anchor).unwrap(), "};")
        .unwrap()
        .with_span(SpanMode::MultiLine { max_lines: 24 });
    PatchStep::new(name, pattern, replacement)
}

fn migration_steps() -> Vec<PatchStep> {
    vec![
        handler_step(
            "handle-submit",
            "const handleSubmit = (e) => {",
            "const handleSubmit = async (e) => {\n    await roleService.submit();\n  };",
        ),
        handler_step(
            "handle-delete",
            "const handleDelete = () => {",
            "const handleDelete = async () => {\n    await roleService.remove();\n  };",
        ),
    ]
}

#[test]
fn read_patch_write_round_trip() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("page.tsx");
    fsx::write_text(&target, PAGE).unwrap();

    let content = fsx::read_text(&target).unwrap();
    let outcome = apply_pipeline(&content, &migration_steps()).unwrap();
    fsx::write_text(&target, &outcome.output).unwrap();

    let persisted = fs::read_to_string(&target).unwrap();
    assert!(persisted.contains("await roleService.submit();"));
    assert!(persisted.contains("await roleService.remove();"));
    assert!(!persisted.contains("setTimeout"));
    assert!(persisted.starts_with("import { roleService } from './services';"));
}

#[test]
fn failed_pipeline_never_reaches_the_file() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("page.tsx");
    fsx::write_text(&target, PAGE).unwrap();

    let mut steps = migration_steps();
    steps.push(handler_step("stale", "const handleRenamed = () => {", "x"));

    let content = fsx::read_text(&target).unwrap();
    let err = apply_pipeline(&content, &steps).unwrap_err();
    assert!(matches!(err, Error::PatternNotFound { ref step } if step == "stale"));

    // The caller aborts before writing; the file still holds the stub code.
    assert_eq!(fs::read_to_string(&target).unwrap(), PAGE);
}

#[test]
fn migrated_file_reports_clean_on_a_second_pass() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("page.tsx");
    fsx::write_text(&target, PAGE).unwrap();

    let steps = migration_steps();
    let content = fsx::read_text(&target).unwrap();
    let outcome = apply_pipeline(&content, &steps).unwrap();
    fsx::write_text(&target, &outcome.output).unwrap();

    let migrated = fsx::read_text(&target).unwrap();
    let reports = check_pipeline(&migrated, &steps);
    assert!(reports.iter().all(|r| r.count == 0));
}
