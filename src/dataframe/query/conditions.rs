//! Ordered list of filter conditions

use super::ast::{Combinator, Condition, Predicate};

/// Conditions in insertion order, folded strictly left to right
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionStore {
    conditions: Vec<Condition>,
}

impl ConditionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a predicate; the first entry never carries a combinator
    pub fn push(&mut self, predicate: Predicate, combinator: Combinator) -> &Condition {
        let combinator = if self.conditions.is_empty() {
            None
        } else {
            Some(combinator)
        };
        self.conditions.push(Condition {
            predicate,
            combinator,
        });
        &self.conditions[self.conditions.len() - 1]
    }

    /// Remove every condition
    pub fn clear(&mut self) {
        self.conditions.clear();
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Condition> {
        self.conditions.iter()
    }

    /// One human-readable line per condition, in insertion order
    pub fn render_lines(&self) -> Vec<String> {
        self.conditions.iter().map(ToString::to_string).collect()
    }

    /// All conditions as newline-separated text
    pub fn render(&self) -> String {
        self.render_lines().join("\n")
    }
}

impl<'a> IntoIterator for &'a ConditionStore {
    type Item = &'a Condition;
    type IntoIter = std::slice::Iter<'a, Condition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
