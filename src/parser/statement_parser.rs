//! Statement segmentation for procedure bodies
//!
//! Splits a comment-free procedure definition into ordered raw segments, one
//! per hard statement keyword. This is a keyword scan, not a grammar: nested
//! blocks, subqueries and string contents are not understood, and keywords
//! inside them still start a segment.
//!
//! ## Rules
//!
//! 1. The body starts after the first whole-word `AS`; nothing before it is
//!    scanned. Without an `AS` there is no body and no segments.
//! 2. `SELECT`, `INSERT`, `UPDATE`, `DELETE`, `IF`, `ELSE` and `RETURN` each
//!    open a segment. Text up to the next keyword belongs to that segment.
//! 3. `BEGIN` and `END` open nothing. Text after them is merged into the
//!    segment that is still open.
//! 4. A segment with no text is dropped, except `ELSE`.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::model::StepType;
use crate::util::collapse_whitespace;

/// First `AS` keyword followed by whitespace: end of the procedure header
static AS_BOUNDARY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bAS\b\s+").unwrap());

static STATEMENT_KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(SELECT|INSERT|UPDATE|DELETE|IF|ELSE|RETURN|BEGIN|END)\b").unwrap()
});

/// One statement-level segment of a procedure body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSegment {
    pub step_type: StepType,
    /// Uppercased keyword followed by the segment text, whitespace collapsed
    pub content: String,
}

/// A segment still collecting text
struct OpenSegment {
    step_type: StepType,
    keyword: String,
    text: String,
}

impl OpenSegment {
    fn push_text(&mut self, text: &str) {
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(text);
    }

    fn finish(self) -> Option<RawSegment> {
        if self.text.trim().is_empty() && self.step_type != StepType::Else {
            return None;
        }
        let content = collapse_whitespace(&format!("{} {}", self.keyword, self.text));
        Some(RawSegment {
            step_type: self.step_type,
            content,
        })
    }
}

/// Split comment-free SQL into ordered statement segments.
pub fn segment_statements(clean_sql: &str) -> Vec<RawSegment> {
    let Some(boundary) = AS_BOUNDARY_RE.find(clean_sql) else {
        debug!("no AS keyword found, procedure body could not be located");
        return Vec::new();
    };

    let body = &clean_sql[boundary.end()..];
    let mut open: Vec<OpenSegment> = Vec::new();
    let mut last_end = 0;

    for m in STATEMENT_KEYWORD_RE.find_iter(body) {
        if is_qualified_word(body, m.start()) {
            continue;
        }

        let text = body[last_end..m.start()].trim();
        if !text.is_empty() {
            if let Some(segment) = open.last_mut() {
                segment.push_text(text);
            }
        }

        let keyword = m.as_str().to_uppercase();
        match StepType::from_keyword(&keyword) {
            Some(step_type) => {
                trace!(keyword = %keyword, offset = m.start(), "statement keyword");
                open.push(OpenSegment {
                    step_type,
                    keyword,
                    text: String::new(),
                });
            }
            // BEGIN / END only delimit text
            None => trace!(keyword = %keyword, offset = m.start(), "block keyword"),
        }

        last_end = m.end();
    }

    let trailing = body[last_end..].trim();
    if !trailing.is_empty() {
        if let Some(segment) = open.last_mut() {
            segment.push_text(trailing);
        }
    }

    open.into_iter().filter_map(OpenSegment::finish).collect()
}

/// Whether the word at `start` is part of a variable, temp table or
/// qualified/bracketed name (`@Update`, `#End`, `t.End`, `[Select]`).
fn is_qualified_word(text: &str, start: usize) -> bool {
    matches!(
        text[..start].chars().next_back(),
        Some('@' | '#' | '.' | '[')
    )
}
