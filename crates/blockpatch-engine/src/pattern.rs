//! Structural block patterns
//!
//! A block is a contiguous span of text bounded by a start anchor and a
//! literal closing marker. Patterns describe how to locate one: where the
//! block begins, how far the closing marker may be searched for, and which
//! occurrence of the closing marker ends the block.

use std::ops::Range;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How the start of a block is located.
#[derive(Debug, Clone)]
pub enum Anchor {
    /// An exact phrase.
    Literal(String),
    /// A compiled regular expression. Matching is linear-time.
    Regex(Regex),
}

impl Anchor {
    /// Create a literal anchor. Rejects empty phrases.
    pub fn literal(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.is_empty() {
            return Err(Error::invalid_pattern("start anchor must not be empty"));
        }
        Ok(Self::Literal(text))
    }

    /// Compile a regex anchor. Rejects malformed expressions.
    pub fn regex(pattern: &str) -> Result<Self> {
        if pattern.is_empty() {
            return Err(Error::invalid_pattern("start anchor must not be empty"));
        }
        let regex = Regex::new(pattern)
            .map_err(|e| Error::invalid_pattern(format!("bad start regex: {e}")))?;
        Ok(Self::Regex(regex))
    }

    /// Find the next occurrence at or after `from`. `from` must lie on a
    /// char boundary.
    fn find_from(&self, content: &str, from: usize) -> Option<Range<usize>> {
        match self {
            Self::Literal(text) => content[from..]
                .find(text.as_str())
                .map(|p| from + p..from + p + text.len()),
            Self::Regex(regex) => regex.find_at(content, from).map(|m| m.range()),
        }
    }
}

/// Whether a block may cross line boundaries, and how far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpanMode {
    /// The closing marker must appear on the anchor's own line.
    #[default]
    SingleLine,
    /// The closing marker may be up to `max_lines` lines below the anchor.
    MultiLine { max_lines: usize },
    /// The search window extends to the end of the input. Opt-in; never
    /// the implicit default.
    Unbounded,
}

/// Which closing marker inside the window ends the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndPolicy {
    /// The first closing marker after the anchor (lazy).
    #[default]
    Nearest,
    /// The last closing marker inside the window (greedy).
    Furthest,
}

/// A structural rule locating one block: start anchor, closing marker,
/// window bounds, and end-marker policy. Matched spans include both
/// markers.
#[derive(Debug, Clone)]
pub struct BlockPattern {
    start: Anchor,
    end: String,
    span: SpanMode,
    end_policy: EndPolicy,
}

impl BlockPattern {
    /// Create a pattern with the default single-line window and nearest
    /// end-marker policy. Rejects an empty closing marker.
    pub fn new(start: Anchor, end: impl Into<String>) -> Result<Self> {
        let end = end.into();
        if end.is_empty() {
            return Err(Error::invalid_pattern("closing marker must not be empty"));
        }
        Ok(Self {
            start,
            end,
            span: SpanMode::default(),
            end_policy: EndPolicy::default(),
        })
    }

    pub fn with_span(mut self, span: SpanMode) -> Self {
        self.span = span;
        self
    }

    pub fn with_end_policy(mut self, end_policy: EndPolicy) -> Self {
        self.end_policy = end_policy;
        self
    }

    /// Find the next complete block at or after `from`, scanning left to
    /// right. An anchor whose window holds no closing marker is skipped
    /// and the scan continues at the next anchor occurrence; backtracking
    /// is bounded by the input length.
    pub fn find_span(&self, content: &str, from: usize) -> Option<Range<usize>> {
        let mut cursor = from;
        while cursor <= content.len() {
            let anchor = self.start.find_from(content, cursor)?;
            let window_end = self.window_end(content, anchor.end);
            let window = &content[anchor.end..window_end];
            let found = match self.end_policy {
                EndPolicy::Nearest => window.find(self.end.as_str()),
                EndPolicy::Furthest => window.rfind(self.end.as_str()),
            };
            if let Some(pos) = found {
                return Some(anchor.start..anchor.end + pos + self.end.len());
            }
            cursor = next_scan_position(content, &anchor);
        }
        None
    }

    /// End of the closing-marker search window starting at `from`.
    fn window_end(&self, content: &str, from: usize) -> usize {
        match self.span {
            SpanMode::SingleLine => content[from..]
                .find('\n')
                .map_or(content.len(), |p| from + p),
            SpanMode::MultiLine { max_lines } => {
                let mut crossed = 0;
                for (i, byte) in content.as_bytes()[from..].iter().enumerate() {
                    if *byte == b'\n' {
                        if crossed == max_lines {
                            return from + i;
                        }
                        crossed += 1;
                    }
                }
                content.len()
            }
            SpanMode::Unbounded => content.len(),
        }
    }
}

/// Position to resume scanning from after an anchor with no completion.
/// A zero-width regex match is stepped over by one char so the scan
/// always makes progress.
fn next_scan_position(content: &str, anchor: &Range<usize>) -> usize {
    if anchor.end > anchor.start {
        anchor.end
    } else {
        anchor.end
            + content[anchor.end..]
                .chars()
                .next()
                .map_or(1, char::len_utf8)
    }
}
