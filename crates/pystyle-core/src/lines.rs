//! Lexical line scanner.
//!
//! Evaluates the raw-text rules (S001–S007) line by line, in a fixed order
//! that determines intra-line emission order. Blank lines only feed the
//! blank-run counter for S006.
//!
//! Comment detection for S003–S005 shares one contract: the first `#` not
//! inside a quoted span, where the quoted spans are the first greedy
//! single-quoted and first greedy double-quoted regions of the line. This is
//! a heuristic, not a tokenizer; it misfires on escaped quotes and on lines
//! mixing several quoted regions with adjacent markers.

use crate::source::{SourceLine, SourceUnit};
use crate::types::{RuleCode, Violation};

/// Lines at or beyond this character count are flagged S001.
const LINE_LIMIT: usize = 80;

/// Indentation must be a multiple of this many spaces.
const INDENT_UNIT: usize = 4;

/// Blank runs longer than this flag S006 on the line that breaks the run.
const BLANK_RUN_LIMIT: usize = 2;

/// Case-insensitive marker looked for inside comments (S005).
const TODO_MARKER: &str = "todo";

/// Scans a source unit and returns its lexical violations.
///
/// The result is ordered by line number; within a line, violations appear in
/// check order (S001, S002, S003, S004, S005, S007) with S006 last.
#[must_use]
pub fn scan(unit: &SourceUnit) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut blank_run = 0usize;

    for (number, line) in unit.lines() {
        if line.is_blank() {
            blank_run += 1;
            continue;
        }

        check_length(number, line, &mut violations);
        check_indentation(number, line, &mut violations);
        check_semicolon(number, line, &mut violations);
        check_comment_spacing(number, line, &mut violations);
        check_todo(number, line, &mut violations);
        check_keyword_spacing(number, line, &mut violations);
        if blank_run > BLANK_RUN_LIMIT {
            violations.push(Violation::new(number, RuleCode::BlankLines));
        }
        blank_run = 0;
    }

    violations
}

/// Byte range of the first greedy `quote`-delimited region, if any.
///
/// Greedy means first opening quote to last closing quote, mirroring a
/// whole-line `'.*'` / `".*"` search. A lone quote opens no span.
fn greedy_span(text: &str, quote: char) -> Option<(usize, usize)> {
    let first = text.find(quote)?;
    let last = text.rfind(quote)?;
    (last > first).then(|| (first, last + quote.len_utf8()))
}

/// Position of the first `#` that falls outside every quoted span.
fn find_comment(text: &str) -> Option<usize> {
    let spans: Vec<(usize, usize)> = ['\'', '"']
        .into_iter()
        .filter_map(|q| greedy_span(text, q))
        .collect();

    text.bytes()
        .enumerate()
        .filter(|&(_, b)| b == b'#')
        .map(|(i, _)| i)
        .find(|&i| !spans.iter().any(|&(start, end)| start <= i && i < end))
}

/// Text before the real comment marker, or the whole line without one.
fn strip_comment(text: &str) -> &str {
    match find_comment(text) {
        Some(pos) => &text[..pos],
        None => text,
    }
}

fn check_length(number: usize, line: &SourceLine, out: &mut Vec<Violation>) {
    if line.raw_len >= LINE_LIMIT {
        out.push(Violation::new(number, RuleCode::TooLong));
    }
}

// Tabs are not counted as indentation; a tab ends the leading-space run.
fn check_indentation(number: usize, line: &SourceLine, out: &mut Vec<Violation>) {
    let leading = line.text.bytes().take_while(|&b| b == b' ').count();
    if leading % INDENT_UNIT != 0 {
        out.push(Violation::new(number, RuleCode::Indentation));
    }
}

fn check_semicolon(number: usize, line: &SourceLine, out: &mut Vec<Violation>) {
    if strip_comment(&line.text).trim_end().ends_with(';') {
        out.push(Violation::new(number, RuleCode::Semicolon));
    }
}

fn check_comment_spacing(number: usize, line: &SourceLine, out: &mut Vec<Violation>) {
    // A marker in column 0 or 1 cannot have two spaces before it and is
    // not treated as an inline comment.
    if let Some(pos) = find_comment(&line.text) {
        if pos > 1 && !line.text[..pos].ends_with("  ") {
            out.push(Violation::new(number, RuleCode::CommentSpacing));
        }
    }
}

fn check_todo(number: usize, line: &SourceLine, out: &mut Vec<Violation>) {
    if let Some(pos) = find_comment(&line.text) {
        if line.text[pos..].to_lowercase().contains(TODO_MARKER) {
            out.push(Violation::new(number, RuleCode::TodoFound));
        }
    }
}

fn check_keyword_spacing(number: usize, line: &SourceLine, out: &mut Vec<Violation>) {
    let stripped = line.text.trim_start_matches(' ');
    for keyword in ["def", "class"] {
        let Some(rest) = stripped.strip_prefix(keyword) else {
            continue;
        };
        let Some(after) = rest.strip_prefix(' ') else {
            continue;
        };
        if after.starts_with(' ') {
            out.push(Violation::with_arg(number, RuleCode::KeywordSpacing, keyword));
        }
    }
}
