//! Source unit model.

use std::path::{Path, PathBuf};

/// One line of source, keyed by its 1-indexed line number in [`SourceUnit`].
#[derive(Debug, Clone)]
pub struct SourceLine {
    /// Character count of the raw line, before right-trimming.
    pub raw_len: usize,
    /// Line content with trailing whitespace removed.
    pub text: String,
}

impl SourceLine {
    /// Returns true if the line is empty after right-trimming.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

/// An immutable, fully loaded source file.
///
/// Identity is the file path as supplied by enumeration; the path is carried
/// verbatim into rendered issues.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    path: PathBuf,
    lines: Vec<SourceLine>,
}

impl SourceUnit {
    /// Creates a source unit from raw file content.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, content: &str) -> Self {
        let lines = content
            .lines()
            .map(|raw| SourceLine {
                raw_len: raw.chars().count(),
                text: raw.trim_end().to_owned(),
            })
            .collect();
        Self {
            path: path.into(),
            lines,
        }
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Iterates lines with their 1-indexed line numbers.
    pub fn lines(&self) -> impl Iterator<Item = (usize, &SourceLine)> {
        self.lines.iter().enumerate().map(|(i, l)| (i + 1, l))
    }

    /// Number of lines in the unit.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_one_indexed() {
        let unit = SourceUnit::new("a.py", "x = 1\ny = 2\n");
        let numbers: Vec<usize> = unit.lines().map(|(n, _)| n).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn trailing_whitespace_is_trimmed_but_counted() {
        let unit = SourceUnit::new("a.py", "x = 1   \n");
        let (_, line) = unit.lines().next().expect("one line");
        assert_eq!(line.text, "x = 1");
        assert_eq!(line.raw_len, 8);
    }

    #[test]
    fn whitespace_only_line_is_blank() {
        let unit = SourceUnit::new("a.py", "   \nx = 1\n");
        let blanks: Vec<bool> = unit.lines().map(|(_, l)| l.is_blank()).collect();
        assert_eq!(blanks, vec![true, false]);
    }

    #[test]
    fn raw_len_counts_characters_not_bytes() {
        let unit = SourceUnit::new("a.py", "s = 'héllo'\n");
        let (_, line) = unit.lines().next().expect("one line");
        assert_eq!(line.raw_len, 11);
    }
}
