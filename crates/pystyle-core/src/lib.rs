//! # pystyle-core
//!
//! Core engine for the pystyle Python style checker.
//!
//! This crate provides the fixed twelve-rule engine and its orchestration:
//!
//! - [`lines`] — per-line lexical checks (S001–S007)
//! - [`python`] — Tree-sitter front end extracting declaration facts
//! - [`structure`] — naming and default-value checks (S008–S012)
//! - [`Analyzer`] — file enumeration, per-file passes, keyed merge
//! - [`Issue`] / [`StyleReport`] — the rendered, line-ordered result
//!
//! ## Example
//!
//! ```ignore
//! use pystyle_core::Analyzer;
//!
//! let report = Analyzer::new("./src").analyze()?;
//! for issue in &report.issues {
//!     println!("{issue}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod source;
mod types;

pub mod lines;
pub mod python;
pub mod structure;

pub use analyzer::{Analyzer, AnalyzerError};
pub use source::{SourceLine, SourceUnit};
pub use types::{Issue, RuleCode, StyleReport, Violation};
