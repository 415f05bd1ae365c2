//! Variable store - Runtime state of the boolean variables declared by a document

use crate::domain::entities::BooleanVariable;
use crate::domain::value_objects::VariableName;
use std::collections::BTreeMap;

/// Holds the current value of every declared variable.
///
/// The set of names is fixed when the store is built; toggling an unknown
/// name does nothing and reading one yields `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableStore {
    variables: BTreeMap<VariableName, BooleanVariable>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_definitions(definitions: &BTreeMap<VariableName, BooleanVariable>) -> Self {
        Self {
            variables: definitions.clone(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&BooleanVariable> {
        self.variables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Current value, `false` for undeclared names
    pub fn state(&self, name: &str) -> bool {
        self.variables.get(name).is_some_and(|v| v.value)
    }

    /// Flip a variable. Returns the new value, or `None` if the name is unknown.
    pub fn toggle(&mut self, name: &str) -> Option<bool> {
        let variable = self.variables.get_mut(name)?;
        variable.value = !variable.value;
        Some(variable.value)
    }

    /// Text substituted for `{{name}}` in the current state
    pub fn text(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(BooleanVariable::text)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&VariableName, &BooleanVariable)> {
        self.variables.iter()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
