//! Structural fact visitor.
//!
//! Walks the extracted declarations pre-order and applies the naming and
//! default-value checks (S008–S012). Results are keyed by line number;
//! declaration-level violations land on the `class`/`def` line, variable
//! violations on their assignment's own line.

use crate::python::{DeclKind, Declaration, DefaultKind};
use crate::types::{RuleCode, Violation};
use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

/// CamelCase: one or more capitalized word segments, no separators.
static CAMEL_CASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z][a-z]*)+$").expect("valid pattern"));

/// Lower-snake: up to two leading underscores, a lowercase word, optional
/// `_word` groups, optionally closed by exactly two trailing underscores.
static SNAKE_CASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^_{0,2}[a-z][a-z0-9]*(_[a-z0-9]+)*(__)?$").expect("valid pattern")
});

/// Scans declarations and returns structural violations keyed by line.
///
/// Violations for one line appear in visitor emission order: name, then
/// parameters, then defaults for a declaration line; target order for
/// chained assignments.
#[must_use]
pub fn scan(declarations: &[Declaration]) -> BTreeMap<usize, Vec<Violation>> {
    let mut violations = BTreeMap::new();
    for decl in declarations {
        visit(decl, &mut violations);
    }
    violations
}

fn visit(decl: &Declaration, out: &mut BTreeMap<usize, Vec<Violation>>) {
    match decl.kind {
        DeclKind::Class => check_class(decl, out),
        DeclKind::Function => check_function(decl, out),
    }
    for nested in &decl.nested {
        visit(nested, out);
    }
}

fn check_class(decl: &Declaration, out: &mut BTreeMap<usize, Vec<Violation>>) {
    if !CAMEL_CASE.is_match(&decl.name) {
        out.entry(decl.line).or_default().push(Violation::with_arg(
            decl.line,
            RuleCode::ClassNaming,
            &decl.name,
        ));
    }
}

fn check_function(decl: &Declaration, out: &mut BTreeMap<usize, Vec<Violation>>) {
    let mut at_decl = Vec::new();

    if !SNAKE_CASE.is_match(&decl.name) {
        at_decl.push(Violation::with_arg(
            decl.line,
            RuleCode::FunctionNaming,
            &decl.name,
        ));
    }

    for param in &decl.params {
        if !SNAKE_CASE.is_match(param) {
            at_decl.push(Violation::with_arg(
                decl.line,
                RuleCode::ArgumentNaming,
                param,
            ));
        }
    }

    // One violation per declaration, at the first non-literal default.
    if decl
        .defaults
        .iter()
        .any(|d| *d == DefaultKind::Computed)
    {
        at_decl.push(Violation::new(decl.line, RuleCode::MutableDefault));
    }

    if !at_decl.is_empty() {
        out.entry(decl.line).or_default().extend(at_decl);
    }

    check_local_variables(decl, out);
}

/// Flags each local variable at its first assignment only. The scope set
/// records every first-seen name, flagged or not, so reassignments are
/// never re-checked.
fn check_local_variables(decl: &Declaration, out: &mut BTreeMap<usize, Vec<Violation>>) {
    let mut scope: HashSet<&str> = HashSet::new();
    for assignment in &decl.assignments {
        for name in &assignment.targets {
            if scope.insert(name.as_str()) && !SNAKE_CASE.is_match(name) {
                out.entry(assignment.line)
                    .or_default()
                    .push(Violation::with_arg(
                        assignment.line,
                        RuleCode::VariableNaming,
                        name,
                    ));
            }
        }
    }
}
