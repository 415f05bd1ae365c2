//! Lint configuration

use serde::{Deserialize, Serialize};

/// Lint configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LintConfig {
    /// Reference checks configuration
    pub references: ReferencesConfig,
    /// Flow analysis configuration
    pub flow: FlowConfig,
}

/// Reference checking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferencesConfig {
    /// Enable reference checks
    pub enabled: bool,
    /// Check goto, autoAdvance and startNode targets
    pub check_targets: bool,
    /// Check tokens and actions against declared variables
    pub check_variables: bool,
}

impl Default for ReferencesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            check_targets: true,
            check_variables: true,
        }
    }
}

/// Flow analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowConfig {
    /// Enable flow analysis
    pub enabled: bool,
    /// Report nodes that cannot be reached from the start node
    pub check_reachability: bool,
    /// Report unused variable declarations
    pub check_unused_variables: bool,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            check_reachability: true,
            check_unused_variables: true,
        }
    }
}
