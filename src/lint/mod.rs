//! Lint module for content document checking
//!
//! This module reports content-authoring defects without repairing them:
//! - Dangling goto / autoAdvance / startNode targets
//! - Tokens and actions naming undeclared variables
//! - Nodes unreachable from the start node

use crate::domain::entities::ContentDocument;
use crate::domain::value_objects::NodeId;
use serde::{Deserialize, Serialize};

pub mod checks;
pub mod config;

/// Lint severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LintLevel {
    /// Error: navigation will fail here
    Error,
    /// Warning: should be reviewed
    Warning,
    /// Info: for your information
    Info,
}

/// A lint issue found in the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LintIssue {
    /// Severity level
    pub level: LintLevel,
    /// Issue message
    pub message: String,
    /// Node the issue was found in, if any
    pub node: Option<NodeId>,
    /// Category of the issue
    pub category: String,
}

/// Result of linting a document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LintResult {
    /// Issues found
    pub issues: Vec<LintIssue>,
    /// Number of errors
    pub error_count: usize,
    /// Number of warnings
    pub warning_count: usize,
    /// Number of info messages
    pub info_count: usize,
}

impl LintResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_issue(&mut self, issue: LintIssue) {
        match issue.level {
            LintLevel::Error => self.error_count += 1,
            LintLevel::Warning => self.warning_count += 1,
            LintLevel::Info => self.info_count += 1,
        }
        self.issues.push(issue);
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Lint a document with default configuration
pub fn lint(document: &ContentDocument) -> LintResult {
    lint_with_config(document, &config::LintConfig::default())
}

/// Lint a document with custom configuration
pub fn lint_with_config(document: &ContentDocument, config: &config::LintConfig) -> LintResult {
    let mut result = LintResult::new();

    if config.references.enabled {
        checks::references::check(document, &mut result, config);
    }

    if config.flow.enabled {
        checks::flow::check(document, &mut result, config);
    }

    result
}
