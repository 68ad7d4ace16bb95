//! Analyzer orchestrating the checker over one or more files.
//!
//! Each file is read fully, scanned by the lexical and structural passes
//! over the same immutable source, and the two result sets are merged into
//! one line-ordered issue sequence. Files are processed in enumeration
//! order; a parse failure in any file aborts the whole run.

use crate::lines;
use crate::python::PythonParser;
use crate::source::SourceUnit;
use crate::structure;
use crate::types::{Issue, StyleReport, Violation};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Extension analyzed files must carry.
const SOURCE_EXTENSION: &str = "py";

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files or walking directories.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing a Python source file. Fatal for the whole run.
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// The supplied path does not exist.
    #[error("{} does not exist", path.display())]
    MissingPath {
        /// The missing path.
        path: PathBuf,
    },

    /// A directly-named file does not carry the `.py` extension.
    #[error("{} does not end with \".py\"", path.display())]
    NotPython {
        /// The offending path.
        path: PathBuf,
    },
}

/// The analyzer for a single root path (file or directory).
pub struct Analyzer {
    root: PathBuf,
    parser: PythonParser,
}

impl Analyzer {
    /// Creates an analyzer for the given file or directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            parser: PythonParser::new(),
        }
    }

    /// Returns the root path being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Analyzes all enumerated files and returns the ordered report.
    ///
    /// # Errors
    ///
    /// Returns a usage error for a missing path or a directly-named
    /// non-`.py` file, an IO error for unreadable files, and a parse error
    /// for the first file that is not valid Python.
    pub fn analyze(&self) -> Result<StyleReport, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let files = self.discover_files()?;
        info!("Found {} files to analyze", files.len());

        let mut report = StyleReport::new();
        for path in &files {
            report.issues.extend(self.analyze_file(path)?);
            report.files_checked += 1;
        }

        info!(
            "Analysis complete: {} issues in {} files",
            report.issues.len(),
            report.files_checked
        );

        Ok(report)
    }

    /// Analyzes a single file and returns its line-ordered issues.
    fn analyze_file(&self, path: &Path) -> Result<Vec<Issue>, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let content = std::fs::read_to_string(path)?;
        let unit = SourceUnit::new(path, &content);
        let declarations =
            self.parser
                .parse(&content)
                .map_err(|e| AnalyzerError::Parse {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;

        let lexical = lines::scan(&unit);
        let structural = structure::scan(&declarations);
        Ok(merge(&unit, lexical, structural))
    }

    /// Enumerates the files to analyze, in lexicographic order.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        if !self.root.exists() {
            return Err(AnalyzerError::MissingPath {
                path: self.root.clone(),
            });
        }

        if self.root.is_file() {
            if has_source_extension(&self.root) {
                return Ok(vec![self.root.clone()]);
            }
            return Err(AnalyzerError::NotPython {
                path: self.root.clone(),
            });
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            if entry.file_type().is_file() && has_source_extension(entry.path()) {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }
}

fn has_source_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(SOURCE_EXTENSION)
}

/// Merges the two passes into one issue sequence.
///
/// For each line present in either source, lexical violations come first in
/// their check order, then structural violations in visitor emission order.
/// Lines ascend; lines without violations emit nothing. This ordering is the
/// report contract and must be exactly reproducible.
fn merge(
    unit: &SourceUnit,
    lexical: Vec<Violation>,
    structural: BTreeMap<usize, Vec<Violation>>,
) -> Vec<Issue> {
    let mut by_line: BTreeMap<usize, Vec<Violation>> = BTreeMap::new();
    for violation in lexical {
        by_line.entry(violation.line).or_default().push(violation);
    }
    for (line, violations) in structural {
        by_line.entry(line).or_default().extend(violations);
    }

    by_line
        .into_values()
        .flatten()
        .map(|v| Issue::resolve(unit.path(), &v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RuleCode;

    #[test]
    fn missing_path_is_a_usage_error() {
        let analyzer = Analyzer::new("no/such/path.py");
        assert!(matches!(
            analyzer.analyze(),
            Err(AnalyzerError::MissingPath { .. })
        ));
    }

    #[test]
    fn merge_puts_lexical_before_structural_on_one_line() {
        let unit = SourceUnit::new("t.py", "def  Bad():\n");
        let lexical = vec![Violation::with_arg(1, RuleCode::KeywordSpacing, "def")];
        let mut structural = BTreeMap::new();
        structural.insert(
            1,
            vec![Violation::with_arg(1, RuleCode::FunctionNaming, "Bad")],
        );

        let issues = merge(&unit, lexical, structural);
        let codes: Vec<RuleCode> = issues.iter().map(|i| i.code).collect();
        assert_eq!(codes, vec![RuleCode::KeywordSpacing, RuleCode::FunctionNaming]);
    }

    #[test]
    fn merge_orders_lines_ascending() {
        let unit = SourceUnit::new("t.py", "x = 1\ny = 2\nz = 3\n");
        let lexical = vec![Violation::new(3, RuleCode::TooLong)];
        let mut structural = BTreeMap::new();
        structural.insert(1, vec![Violation::with_arg(1, RuleCode::ClassNaming, "c")]);

        let issues = merge(&unit, lexical, structural);
        let lines: Vec<usize> = issues.iter().map(|i| i.line).collect();
        assert_eq!(lines, vec![1, 3]);
    }

    #[test]
    fn source_extension_filter() {
        assert!(has_source_extension(Path::new("pkg/module.py")));
        assert!(!has_source_extension(Path::new("pkg/module.txt")));
        assert!(!has_source_extension(Path::new("pkg/module")));
    }
}
