//! Turns raw user input into validated, typed conditions

use lazy_static::lazy_static;
use regex::Regex;

use super::ast::{operators_for, Combinator, Literal, Operator, Predicate};
use super::conditions::ConditionStore;
use crate::core::column::{self, ColumnType};
use crate::core::error::{Error, Result};
use crate::dataframe::base::DataFrame;

lazy_static! {
    static ref NUMERIC_LITERAL: Regex = Regex::new(r"^-?(\d+\.?\d*|\.\d+)$").unwrap();
}

/// Coerce a raw value into a literal
///
/// The trimmed text is numeric when it is digits with at most one decimal
/// point and an optional leading minus; anything else is text.
pub fn coerce_literal(raw_value: &str) -> Literal {
    let trimmed = raw_value.trim();
    if NUMERIC_LITERAL.is_match(trimmed) {
        if let Ok(value) = trimmed.parse::<f64>() {
            return Literal::Numeric {
                value,
                raw: trimmed.to_string(),
            };
        }
    }
    Literal::Text(trimmed.to_string())
}

/// Builds conditions against the table currently being filtered
#[derive(Debug, Clone, Copy)]
pub struct PredicateBuilder<'a> {
    dataframe: &'a DataFrame,
}

impl<'a> PredicateBuilder<'a> {
    pub fn new(dataframe: &'a DataFrame) -> Self {
        Self { dataframe }
    }

    /// Inferred type of a column, recomputed on every call
    pub fn column_type(&self, column: &str) -> Result<ColumnType> {
        column::infer(self.dataframe, column)
    }

    /// Operators that may be used on a column
    pub fn operators_for_column(&self, column: &str) -> Result<&'static [Operator]> {
        Ok(operators_for(self.column_type(column)?))
    }

    /// Validate raw input and turn it into a predicate
    pub fn build(&self, column: &str, raw_operator: &str, raw_value: &str) -> Result<Predicate> {
        let column = column.trim();
        let raw_operator = raw_operator.trim();
        if column.is_empty() || raw_operator.is_empty() || raw_value.trim().is_empty() {
            return Err(Error::ConditionIncomplete(
                "Please enter all query details: column, operator and value are required"
                    .to_string(),
            ));
        }

        let column_type = self.column_type(column)?;
        let operator: Operator = raw_operator.parse()?;

        // Comparisons apply to either type (text columns compare
        // lexicographically); string matches need a text column.
        if let Operator::Match(_) = operator {
            if column_type == ColumnType::Numeric {
                return Err(Error::InvalidPredicate(format!(
                    "operator '{}' is not available for {} column '{}'",
                    operator, column_type, column
                )));
            }
        }

        let literal = coerce_literal(raw_value);
        if column_type == ColumnType::Numeric && !literal.is_numeric() {
            return Err(Error::InvalidPredicate(format!(
                "numeric column '{}' cannot be compared with text value {}",
                column, literal
            )));
        }

        Ok(Predicate::new(column, operator, literal))
    }

    /// Build a condition and append it to the store
    ///
    /// Returns the rendered line of the new condition. The store is left
    /// untouched when the input is rejected. A missing combinator defaults
    /// to AND and is ignored for the first condition.
    pub fn add_condition(
        &self,
        store: &mut ConditionStore,
        column: &str,
        raw_operator: &str,
        raw_value: &str,
        combinator: Option<Combinator>,
    ) -> Result<String> {
        let predicate = self.build(column, raw_operator, raw_value)?;
        let rendered = store
            .push(predicate, combinator.unwrap_or(Combinator::And))
            .to_string();
        log::info!("Added condition: {}", rendered);
        Ok(rendered)
    }
}
