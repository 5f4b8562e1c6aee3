//! Block replacement
//!
//! A single left-to-right pass over the input. Replacement text is
//! inserted verbatim and never re-matched, so a replacement containing
//! fragments of its own pattern cannot trigger recursive substitution.

use crate::pattern::BlockPattern;

/// How many matching spans to replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplaceMode {
    /// Only the first matching span, in text order.
    #[default]
    First,
    /// Every non-overlapping matching span, left to right.
    All,
}

/// Outcome of one replacement operation.
///
/// When `matched` is false, `output` equals the input exactly. When
/// `matched` is true, `count >= 1` and every matched span was replaced
/// with the replacement text verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementResult {
    pub matched: bool,
    pub count: usize,
    pub output: String,
}

/// Replace matching blocks in `content`, preserving all text outside
/// matched spans byte for byte. Pure and deterministic; zero matches is
/// reported, not an error.
pub fn replace(
    content: &str,
    pattern: &BlockPattern,
    replacement: &str,
    mode: ReplaceMode,
) -> ReplacementResult {
    let mut output = String::with_capacity(content.len());
    let mut cursor = 0;
    let mut count = 0;

    while let Some(span) = pattern.find_span(content, cursor) {
        output.push_str(&content[cursor..span.start]);
        output.push_str(replacement);
        cursor = span.end;
        count += 1;
        if mode == ReplaceMode::First {
            break;
        }
    }

    if count == 0 {
        return ReplacementResult {
            matched: false,
            count: 0,
            output: content.to_string(),
        };
    }

    output.push_str(&content[cursor..]);
    ReplacementResult {
        matched: true,
        count,
        output,
    }
}

/// Count every non-overlapping matching span without substituting.
pub fn count_matches(content: &str, pattern: &BlockPattern) -> usize {
    let mut cursor = 0;
    let mut count = 0;
    while let Some(span) = pattern.find_span(content, cursor) {
        cursor = span.end;
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{Anchor, BlockPattern, SpanMode};

    fn pattern(start: &str, end: &str) -> BlockPattern {
        BlockPattern::new(Anchor::literal(start).unwrap(), end).unwrap()
    }

    #[test]
    fn no_match_returns_input_unchanged() {
        let result = replace("plain text", &pattern("<<", ">>"), "x", ReplaceMode::All);
        assert!(!result.matched);
        assert_eq!(result.count, 0);
        assert_eq!(result.output, "plain text");
    }

    #[test]
    fn first_mode_replaces_only_the_first_span() {
        let result = replace("<<a>> <<b>>", &pattern("<<", ">>"), "X", ReplaceMode::First);
        assert_eq!(result.output, "X <<b>>");
        assert_eq!(result.count, 1);
    }

    #[test]
    fn all_mode_replaces_every_span() {
        let result = replace("<<a>> <<b>>", &pattern("<<", ">>"), "X", ReplaceMode::All);
        assert_eq!(result.output, "X X");
        assert_eq!(result.count, 2);
    }

    #[test]
    fn inserted_text_is_never_rematched() {
        // The replacement is itself a complete block; a recursive scan
        // would loop forever.
        let result = replace("<<a>>", &pattern("<<", ">>"), "<<a>>", ReplaceMode::All);
        assert!(result.matched);
        assert_eq!(result.count, 1);
        assert_eq!(result.output, "<<a>>");
    }

    #[test]
    fn multi_line_block_is_replaced_inclusive_of_markers() {
        let content = "A\nold_block_start\nSTALE\nold_block_end\nB\n";
        let p = pattern("old_block_start", "old_block_end")
            .with_span(SpanMode::MultiLine { max_lines: 2 });
        let result = replace(content, &p, "new_block", ReplaceMode::First);
        assert!(result.matched);
        assert_eq!(result.count, 1);
        assert_eq!(result.output, "A\nnew_block\nB\n");
    }

    #[test]
    fn empty_content_never_matches() {
        let result = replace("", &pattern("<<", ">>"), "X", ReplaceMode::All);
        assert!(!result.matched);
        assert_eq!(result.output, "");
    }

    #[test]
    fn count_matches_sees_every_span() {
        let p = pattern("<<", ">>");
        assert_eq!(count_matches("<<a>> <<b>> <<c>>", &p), 3);
        assert_eq!(count_matches("no blocks", &p), 0);
    }
}
