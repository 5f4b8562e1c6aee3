//! Block location and replacement for Blockpatch
//!
//! Provides pure text operations for locating structural blocks by
//! start anchor and closing marker, substituting them, and driving an
//! ordered pipeline of replacement steps over one file's content.

pub mod diff;
pub mod error;
pub mod pattern;
pub mod pipeline;
pub mod replace;

pub use diff::unified_diff;
pub use error::{Error, Result};
pub use pattern::{Anchor, BlockPattern, EndPolicy, SpanMode};
pub use pipeline::{
    Occurrence, PatchStep, PipelineOutcome, StepReport, apply_pipeline, check_pipeline,
};
pub use replace::{ReplaceMode, ReplacementResult, count_matches, replace};
