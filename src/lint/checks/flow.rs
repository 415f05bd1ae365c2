//! Flow analysis implementation

use crate::domain::entities::ContentDocument;
use crate::domain::value_objects::NodeId;
use crate::lint::checks::references::referenced_tokens;
use crate::lint::config::LintConfig;
use crate::lint::{LintIssue, LintLevel, LintResult};
use std::collections::{BTreeSet, HashSet, VecDeque};

/// Check flow issues (unreachable nodes, unused variables)
pub fn check(document: &ContentDocument, result: &mut LintResult, config: &LintConfig) {
    if config.flow.check_reachability {
        check_unreachable_nodes(document, result);
    }

    if config.flow.check_unused_variables {
        check_unused_variables(document, result);
    }
}

/// Ids reachable from the start node through gotos and auto-advances
pub fn reachable_nodes(document: &ContentDocument) -> HashSet<NodeId> {
    let mut reachable = HashSet::new();
    let mut queue = VecDeque::new();

    let start = document.config().start_node.clone();
    if document.contains(start.as_str()) {
        reachable.insert(start.clone());
        queue.push_back(start);
    }

    while let Some(id) = queue.pop_front() {
        let Some(node) = document.node(id.as_str()) else {
            continue;
        };

        let targets = node
            .choices
            .iter()
            .filter_map(|choice| choice.target())
            .chain(node.auto_advance.as_ref());

        for target in targets {
            if document.contains(target.as_str()) && reachable.insert(target.clone()) {
                queue.push_back(target.clone());
            }
        }
    }

    reachable
}

fn check_unreachable_nodes(document: &ContentDocument, result: &mut LintResult) {
    let reachable = reachable_nodes(document);

    for id in document.node_ids() {
        if !reachable.contains(id) {
            result.add_issue(LintIssue {
                level: LintLevel::Warning,
                message: format!("Node '{id}' is unreachable from the start node"),
                node: Some(id.clone()),
                category: "flow".to_string(),
            });
        }
    }
}

fn check_unused_variables(document: &ContentDocument, result: &mut LintResult) {
    let mut used = BTreeSet::new();
    for node in document.nodes() {
        used.extend(referenced_tokens(node));
        used.extend(
            node.choices
                .iter()
                .filter_map(|choice| choice.variable())
                .map(|variable| variable.as_str()),
        );
    }

    for name in document.config().variables.keys() {
        if !used.contains(name.as_str()) {
            result.add_issue(LintIssue {
                level: LintLevel::Info,
                message: format!("Declared variable '{name}' is never used"),
                node: None,
                category: "flow".to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::parsing::parse_document;

    #[test]
    fn flow_check_no_issues_in_connected_graph() {
        let doc = parse_document(
            r#"{"start":{"autoAdvance":"menu"},"menu":{"options":[{"goto":"start"}]}}"#,
        )
        .unwrap();
        let mut result = LintResult::new();

        check(&doc, &mut result, &LintConfig::default());

        assert!(result.is_clean());
    }

    #[test]
    fn flow_check_reports_unreachable_node() {
        let doc = parse_document(r#"{"start":{"text":"x"},"island":{"text":"y"}}"#).unwrap();
        let mut result = LintResult::new();

        check(&doc, &mut result, &LintConfig::default());

        assert_eq!(result.warning_count, 1);
        assert_eq!(result.issues[0].node, Some(NodeId::from("island")));
    }

    #[test]
    fn flow_check_reports_unused_variable() {
        let doc = parse_document(
            r#"{"config":{"variables":{"used":true,"spare":false}},
                "nodes":{"start":{"text":"{{used}}"}}}"#,
        )
        .unwrap();
        let mut result = LintResult::new();

        check(&doc, &mut result, &LintConfig::default());

        assert_eq!(result.info_count, 1);
        assert!(result.issues[0].message.contains("spare"));
    }

    #[test]
    fn dangling_start_reaches_nothing() {
        let doc = parse_document(r#"{"config":{"startNode":"nope"},"nodes":{"a":{}}}"#).unwrap();
        assert!(reachable_nodes(&doc).is_empty());
    }
}
