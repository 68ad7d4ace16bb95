//! Core types for style violations and reports.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Closed set of style rule codes.
///
/// Every code is bound to exactly one message template; templates carry at
/// most one `{}` substitution slot. The set is fixed — rules cannot be added,
/// disabled, or reconfigured at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RuleCode {
    /// S001: line reaches or exceeds 80 characters.
    #[serde(rename = "S001")]
    TooLong,
    /// S002: leading-space count is not a multiple of four.
    #[serde(rename = "S002")]
    Indentation,
    /// S003: statement ends with an unnecessary semicolon.
    #[serde(rename = "S003")]
    Semicolon,
    /// S004: fewer than two spaces before an inline comment.
    #[serde(rename = "S004")]
    CommentSpacing,
    /// S005: comment contains a TODO marker.
    #[serde(rename = "S005")]
    TodoFound,
    /// S006: more than two blank lines precede this line.
    #[serde(rename = "S006")]
    BlankLines,
    /// S007: more than one space after a `def`/`class` keyword.
    #[serde(rename = "S007")]
    KeywordSpacing,
    /// S008: class name is not CamelCase.
    #[serde(rename = "S008")]
    ClassNaming,
    /// S009: function name is not snake_case.
    #[serde(rename = "S009")]
    FunctionNaming,
    /// S010: argument name is not snake_case.
    #[serde(rename = "S010")]
    ArgumentNaming,
    /// S011: local variable name is not snake_case.
    #[serde(rename = "S011")]
    VariableNaming,
    /// S012: default argument value is mutable.
    #[serde(rename = "S012")]
    MutableDefault,
}

impl RuleCode {
    /// All codes in ascending code order.
    pub const ALL: [Self; 12] = [
        Self::TooLong,
        Self::Indentation,
        Self::Semicolon,
        Self::CommentSpacing,
        Self::TodoFound,
        Self::BlankLines,
        Self::KeywordSpacing,
        Self::ClassNaming,
        Self::FunctionNaming,
        Self::ArgumentNaming,
        Self::VariableNaming,
        Self::MutableDefault,
    ];

    /// Returns the code string (e.g., `"S001"`).
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::TooLong => "S001",
            Self::Indentation => "S002",
            Self::Semicolon => "S003",
            Self::CommentSpacing => "S004",
            Self::TodoFound => "S005",
            Self::BlankLines => "S006",
            Self::KeywordSpacing => "S007",
            Self::ClassNaming => "S008",
            Self::FunctionNaming => "S009",
            Self::ArgumentNaming => "S010",
            Self::VariableNaming => "S011",
            Self::MutableDefault => "S012",
        }
    }

    /// Returns the message template bound to this code.
    ///
    /// `{}` marks the single substitution slot, present only on codes with
    /// arity one.
    #[must_use]
    pub fn template(self) -> &'static str {
        match self {
            Self::TooLong => "Too long",
            Self::Indentation => "Indentation is not a multiple of four",
            Self::Semicolon => "Unnecessary semicolon",
            Self::CommentSpacing => "At least two spaces required before inline comments",
            Self::TodoFound => "TODO found",
            Self::BlankLines => "More than two blank lines used before this line",
            Self::KeywordSpacing => "Too many spaces after '{}'",
            Self::ClassNaming => "Class name '{}' should be written in CamelCase",
            Self::FunctionNaming => "Function name '{}' should be written in snake_case",
            Self::ArgumentNaming => "Argument name '{}' should be snake_case",
            Self::VariableNaming => "Variable '{}' in function should be snake_case",
            Self::MutableDefault => "Default argument value is mutable",
        }
    }

    /// Number of arguments the message template expects (0 or 1).
    #[must_use]
    pub fn arity(self) -> usize {
        if self.template().contains("{}") {
            1
        } else {
            0
        }
    }
}

impl std::fmt::Display for RuleCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A single rule breach, not yet attached to a file path.
///
/// Arity is validated at construction: a code whose template has a `{}` slot
/// must be built with [`Violation::with_arg`], a slotless code with
/// [`Violation::new`]. Violations are produced by the scanners and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Line number (1-indexed).
    pub line: usize,
    /// Rule code.
    pub code: RuleCode,
    /// Template argument, present exactly when the code's arity is one.
    pub arg: Option<String>,
}

impl Violation {
    /// Creates a violation for a code with no template slot.
    ///
    /// # Panics
    ///
    /// Panics if `code` expects an argument.
    #[must_use]
    pub fn new(line: usize, code: RuleCode) -> Self {
        assert_eq!(code.arity(), 0, "{code} expects a template argument");
        Self {
            line,
            code,
            arg: None,
        }
    }

    /// Creates a violation for a code with a single template slot.
    ///
    /// # Panics
    ///
    /// Panics if `code` does not expect an argument.
    #[must_use]
    pub fn with_arg(line: usize, code: RuleCode, arg: impl Into<String>) -> Self {
        assert_eq!(code.arity(), 1, "{code} takes no template argument");
        Self {
            line,
            code,
            arg: Some(arg.into()),
        }
    }

    /// Renders the message with the argument substituted into the template.
    #[must_use]
    pub fn message(&self) -> String {
        match &self.arg {
            Some(arg) => self.code.template().replacen("{}", arg, 1),
            None => self.code.template().to_owned(),
        }
    }
}

/// A violation resolved against a file path and the message table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Path of the analyzed file, as supplied by enumeration.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Rule code.
    pub code: RuleCode,
    /// Rendered message.
    pub message: String,
}

impl Issue {
    /// Resolves a violation against the path of its source unit.
    #[must_use]
    pub fn resolve(file: &Path, violation: &Violation) -> Self {
        Self {
            file: file.to_path_buf(),
            line: violation.line,
            code: violation.code,
            message: violation.message(),
        }
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: Line {}: {} {}",
            self.file.display(),
            self.line,
            self.code,
            self.message
        )
    }
}

/// Result of running the checker over one or more files.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StyleReport {
    /// All issues, in file enumeration order, line-ordered within each file.
    pub issues: Vec<Issue>,
    /// Number of files analyzed.
    pub files_checked: usize,
}

impl StyleReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no issues were found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}
