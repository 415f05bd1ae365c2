//! Reference integrity checking implementation

use crate::domain::entities::{Choice, ContentDocument, Node};
use crate::domain::resolution::token_names;
use crate::lint::config::LintConfig;
use crate::lint::{LintIssue, LintLevel, LintResult};

/// Check reference integrity (node targets, variables)
pub fn check(document: &ContentDocument, result: &mut LintResult, config: &LintConfig) {
    if config.references.check_targets {
        check_targets(document, result);
    }

    if config.references.check_variables {
        check_variables(document, result);
    }
}

fn check_targets(document: &ContentDocument, result: &mut LintResult) {
    let start = &document.config().start_node;
    if !document.contains(start.as_str()) {
        result.add_issue(LintIssue {
            level: LintLevel::Error,
            message: format!("Start node '{start}' does not exist"),
            node: None,
            category: "references".to_string(),
        });
    }

    for node in document.nodes() {
        for (index, choice) in node.choices.iter().enumerate() {
            if let Some(target) = choice.target()
                && !document.contains(target.as_str())
            {
                result.add_issue(LintIssue {
                    level: LintLevel::Error,
                    message: format!("Option {index} goes to undefined node '{target}'"),
                    node: Some(node.id.clone()),
                    category: "references".to_string(),
                });
            }
        }

        if let Some(target) = &node.auto_advance
            && !document.contains(target.as_str())
        {
            result.add_issue(LintIssue {
                level: LintLevel::Error,
                message: format!("Auto-advance to undefined node '{target}'"),
                node: Some(node.id.clone()),
                category: "references".to_string(),
            });
        }
    }
}

fn check_variables(document: &ContentDocument, result: &mut LintResult) {
    let declared = &document.config().variables;

    for node in document.nodes() {
        for name in referenced_tokens(node) {
            if !declared.contains_key(name) {
                result.add_issue(LintIssue {
                    level: LintLevel::Warning,
                    message: format!("Token '{{{{{name}}}}}' names an undeclared variable"),
                    node: Some(node.id.clone()),
                    category: "references".to_string(),
                });
            }
        }

        for choice in &node.choices {
            if let Some(variable) = choice.variable()
                && !declared.contains_key(variable.as_str())
            {
                result.add_issue(LintIssue {
                    level: LintLevel::Warning,
                    message: format!("Action toggles undeclared variable '{variable}'"),
                    node: Some(node.id.clone()),
                    category: "references".to_string(),
                });
            }
        }
    }
}

/// Every token name in a node's text and choice labels, deduplicated in order
pub(crate) fn referenced_tokens<'a>(node: &'a Node) -> Vec<&'a str> {
    let mut names: Vec<&'a str> = Vec::new();
    let mut push = |text: &'a str| {
        for name in token_names(text) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    };

    for line in &node.lines {
        push(line);
    }
    for choice in &node.choices {
        push(choice.label());
        if let Choice::Toggle {
            active_text,
            inactive_text,
            ..
        } = choice
        {
            push(active_text.as_deref().unwrap_or_default());
            push(inactive_text.as_deref().unwrap_or_default());
        }
    }

    names
}
