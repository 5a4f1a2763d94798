//! Row-wise evaluation of condition lists

use std::cmp::Ordering;
use std::collections::HashMap;

use super::ast::{CompareOp, Literal, MatchOp, Predicate};
use super::conditions::ConditionStore;
use crate::core::column::{self, ColumnType};
use crate::core::data_value::DataValue;
use crate::core::error::{Error, Result};
use crate::dataframe::base::DataFrame;

/// Evaluates conditions against the rows of one table
///
/// Column positions and types are resolved once, on the table passed in.
#[derive(Debug)]
pub struct Evaluator<'a> {
    dataframe: &'a DataFrame,
    columns: HashMap<String, (usize, ColumnType)>,
}

impl<'a> Evaluator<'a> {
    /// Resolve every column referenced by the store
    pub fn new(dataframe: &'a DataFrame, store: &ConditionStore) -> Result<Self> {
        let mut columns = HashMap::new();
        for condition in store {
            let name = condition.predicate.column();
            if columns.contains_key(name) {
                continue;
            }
            let idx = dataframe
                .column_index(name)
                .ok_or_else(|| Error::ColumnNotFound(name.to_string()))?;
            let column_type = column::infer(dataframe, name)?;
            columns.insert(name.to_string(), (idx, column_type));
        }
        Ok(Self { dataframe, columns })
    }

    /// Fold all conditions for one row, strictly left to right
    pub fn evaluate_row(&self, store: &ConditionStore, row_idx: usize) -> Result<bool> {
        let mut acc: Option<bool> = None;
        for condition in store {
            let value = self.evaluate_predicate(&condition.predicate, row_idx)?;
            acc = Some(match (acc, condition.combinator) {
                (None, _) => value,
                (Some(prev), Some(combinator)) => combinator.apply(prev, value),
                // A later entry without a combinator can only come from a
                // hand-built store; treat it as AND.
                (Some(prev), None) => prev && value,
            });
        }
        acc.ok_or_else(|| Error::ConditionIncomplete("No queries added".to_string()))
    }

    /// Boolean mask over every row of the table
    pub fn evaluate_mask(&self, store: &ConditionStore) -> Result<Vec<bool>> {
        (0..self.dataframe.row_count())
            .map(|row_idx| self.evaluate_row(store, row_idx))
            .collect()
    }

    /// Evaluate one predicate for one row
    pub fn evaluate_predicate(&self, predicate: &Predicate, row_idx: usize) -> Result<bool> {
        let (col_idx, column_type) = self
            .columns
            .get(predicate.column())
            .copied()
            .ok_or_else(|| Error::ColumnNotFound(predicate.column().to_string()))?;
        let row = self.dataframe.row(row_idx).ok_or_else(|| {
            Error::InconsistentRowLength {
                expected: self.dataframe.row_count(),
                found: row_idx + 1,
            }
        })?;
        let cell = &row[col_idx];

        Ok(match predicate {
            Predicate::Comparison { op, literal, .. } => {
                compare_cell(cell, *op, literal, column_type)
            }
            Predicate::StringMatch { op, literal, .. } => match_cell(cell, *op, literal),
        })
    }
}

/// Comparison semantics
///
/// A missing cell satisfies only `!=`. Numeric columns compared with numeric
/// literals compare as numbers; everything else compares textually.
pub fn compare_cell(
    cell: &DataValue,
    op: CompareOp,
    literal: &Literal,
    column_type: ColumnType,
) -> bool {
    if cell.is_missing() {
        return op == CompareOp::NotEqual;
    }

    let ordering = match (column_type, literal) {
        (ColumnType::Numeric, Literal::Numeric { value, .. }) => cell
            .as_number()
            .and_then(|n| n.partial_cmp(value)),
        _ => None,
    };
    let ordering = ordering.unwrap_or_else(|| {
        let text = cell.to_field();
        let text: &str = &text;
        text.cmp(literal.text())
    });

    match op {
        CompareOp::Equal => ordering == Ordering::Equal,
        CompareOp::NotEqual => ordering != Ordering::Equal,
        CompareOp::GreaterThan => ordering == Ordering::Greater,
        CompareOp::LessThan => ordering == Ordering::Less,
        CompareOp::GreaterThanOrEqual => ordering != Ordering::Less,
        CompareOp::LessThanOrEqual => ordering != Ordering::Greater,
    }
}

/// Case-sensitive string matching; a missing cell never matches
pub fn match_cell(cell: &DataValue, op: MatchOp, literal: &Literal) -> bool {
    let Some(text) = cell.as_text() else {
        return false;
    };
    let needle = literal.text();
    match op {
        MatchOp::Contains => text.contains(needle),
        MatchOp::NotContains => !text.contains(needle),
        MatchOp::StartsWith => text.starts_with(needle),
        MatchOp::EndsWith => text.ends_with(needle),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(value: f64) -> Literal {
        Literal::Numeric {
            value,
            raw: value.to_string(),
        }
    }

    #[test]
    fn test_missing_truth_table() {
        let missing = DataValue::Missing;
        let lit = num(1.0);
        assert!(compare_cell(&missing, CompareOp::NotEqual, &lit, ColumnType::Text));
        for op in [
            CompareOp::Equal,
            CompareOp::GreaterThan,
            CompareOp::LessThan,
            CompareOp::GreaterThanOrEqual,
            CompareOp::LessThanOrEqual,
        ] {
            assert!(!compare_cell(&missing, op, &lit, ColumnType::Text));
        }
        for op in [
            MatchOp::Contains,
            MatchOp::NotContains,
            MatchOp::StartsWith,
            MatchOp::EndsWith,
        ] {
            assert!(!match_cell(&missing, op, &Literal::Text("a".into())));
        }
    }

    #[test]
    fn test_numeric_vs_textual_ordering() {
        let cell = DataValue::from("10");
        // 10 > 9 numerically, but "10" < "9" lexicographically
        assert!(compare_cell(&cell, CompareOp::GreaterThan, &num(9.0), ColumnType::Numeric));
        assert!(!compare_cell(&cell, CompareOp::GreaterThan, &num(9.0), ColumnType::Text));
        assert!(compare_cell(
            &DataValue::from("5.0"),
            CompareOp::Equal,
            &num(5.0),
            ColumnType::Numeric
        ));
    }

    #[test]
    fn test_string_matches_are_case_sensitive() {
        let lit = Literal::Text("A".into());
        assert!(match_cell(&DataValue::from("Apple"), MatchOp::StartsWith, &lit));
        assert!(!match_cell(&DataValue::from("apple"), MatchOp::StartsWith, &lit));
        assert!(match_cell(&DataValue::from("banana"), MatchOp::NotContains, &lit));
        assert!(match_cell(
            &DataValue::from("SEA"),
            MatchOp::EndsWith,
            &lit
        ));
    }
}
