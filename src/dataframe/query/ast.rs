//! Typed condition definitions
//!
//! Conditions are kept as a predicate tree and interpreted directly against
//! rows; no textual expression is ever synthesized and evaluated.

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::core::column::ColumnType;
use crate::core::data_value::format_number;
use crate::core::error::{Error, Result};

/// Row-level comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

impl CompareOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Equal => "==",
            CompareOp::NotEqual => "!=",
            CompareOp::GreaterThan => ">",
            CompareOp::LessThan => "<",
            CompareOp::GreaterThanOrEqual => ">=",
            CompareOp::LessThanOrEqual => "<=",
        }
    }
}

/// Case-sensitive string matching operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchOp {
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
}

impl MatchOp {
    pub fn name(&self) -> &'static str {
        match self {
            MatchOp::Contains | MatchOp::NotContains => "contains",
            MatchOp::StartsWith => "startswith",
            MatchOp::EndsWith => "endswith",
        }
    }
}

/// Operator of a single condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Compare(CompareOp),
    Match(MatchOp),
}

impl Operator {
    /// Label shown to users when picking an operator
    pub fn label(&self) -> &'static str {
        match self {
            Operator::Compare(op) => op.symbol(),
            Operator::Match(MatchOp::NotContains) => "not contains",
            Operator::Match(op) => op.name(),
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Aggregate names a picker may list for numeric columns but which are not
/// row filters
const AGGREGATE_NAMES: [&str; 3] = ["SUM", "AVG", "COUNT"];

impl FromStr for Operator {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        let op = match raw.trim() {
            "==" => Operator::Compare(CompareOp::Equal),
            "!=" => Operator::Compare(CompareOp::NotEqual),
            ">" => Operator::Compare(CompareOp::GreaterThan),
            "<" => Operator::Compare(CompareOp::LessThan),
            ">=" => Operator::Compare(CompareOp::GreaterThanOrEqual),
            "<=" => Operator::Compare(CompareOp::LessThanOrEqual),
            "contains" => Operator::Match(MatchOp::Contains),
            "not contains" => Operator::Match(MatchOp::NotContains),
            "startswith" => Operator::Match(MatchOp::StartsWith),
            "endswith" => Operator::Match(MatchOp::EndsWith),
            other if AGGREGATE_NAMES.contains(&other.to_ascii_uppercase().as_str()) => {
                return Err(Error::InvalidPredicate(format!(
                    "aggregate '{}' is not a row filter and cannot be added as a condition",
                    other
                )))
            }
            other => {
                return Err(Error::InvalidPredicate(format!(
                    "unsupported operator '{}'",
                    other
                )))
            }
        };
        Ok(op)
    }
}

/// Operators offered for a column of the given type
pub fn operators_for(column_type: ColumnType) -> &'static [Operator] {
    const NUMERIC: [Operator; 6] = [
        Operator::Compare(CompareOp::Equal),
        Operator::Compare(CompareOp::NotEqual),
        Operator::Compare(CompareOp::GreaterThan),
        Operator::Compare(CompareOp::LessThan),
        Operator::Compare(CompareOp::GreaterThanOrEqual),
        Operator::Compare(CompareOp::LessThanOrEqual),
    ];
    const TEXT: [Operator; 6] = [
        Operator::Compare(CompareOp::Equal),
        Operator::Compare(CompareOp::NotEqual),
        Operator::Match(MatchOp::Contains),
        Operator::Match(MatchOp::NotContains),
        Operator::Match(MatchOp::StartsWith),
        Operator::Match(MatchOp::EndsWith),
    ];

    match column_type {
        ColumnType::Numeric => &NUMERIC,
        ColumnType::Text => &TEXT,
    }
}

/// Combinator folding a condition into the conditions before it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    And,
    Or,
}

impl Combinator {
    pub fn apply(&self, acc: bool, next: bool) -> bool {
        match self {
            Combinator::And => acc && next,
            Combinator::Or => acc || next,
        }
    }
}

impl Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combinator::And => write!(f, "AND"),
            Combinator::Or => write!(f, "OR"),
        }
    }
}

impl FromStr for Combinator {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "AND" | "&" => Ok(Combinator::And),
            "OR" | "|" => Ok(Combinator::Or),
            other => Err(Error::InvalidPredicate(format!(
                "unknown combinator '{}'",
                other
            ))),
        }
    }
}

/// Literal a cell is tested against
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Numeric literal; `raw` keeps the text as entered for textual comparison
    Numeric { value: f64, raw: String },
    Text(String),
}

impl Literal {
    pub fn text(&self) -> &str {
        match self {
            Literal::Numeric { raw, .. } => raw,
            Literal::Text(s) => s,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Literal::Numeric { .. })
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Numeric { value, .. } => write!(f, "{}", format_number(*value)),
            Literal::Text(s) => {
                let escaped = s.replace('\\', "\\\\").replace('"', "\\\"");
                write!(f, "\"{}\"", escaped)
            }
        }
    }
}

/// Atomic row predicate
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Comparison {
        column: String,
        op: CompareOp,
        literal: Literal,
    },
    StringMatch {
        column: String,
        op: MatchOp,
        literal: Literal,
    },
}

impl Predicate {
    pub fn new(column: impl Into<String>, operator: Operator, literal: Literal) -> Self {
        let column = column.into();
        match operator {
            Operator::Compare(op) => Predicate::Comparison {
                column,
                op,
                literal,
            },
            Operator::Match(op) => Predicate::StringMatch {
                column,
                op,
                literal,
            },
        }
    }

    pub fn column(&self) -> &str {
        match self {
            Predicate::Comparison { column, .. } | Predicate::StringMatch { column, .. } => column,
        }
    }

    pub fn operator(&self) -> Operator {
        match self {
            Predicate::Comparison { op, .. } => Operator::Compare(*op),
            Predicate::StringMatch { op, .. } => Operator::Match(*op),
        }
    }

    pub fn literal(&self) -> &Literal {
        match self {
            Predicate::Comparison { literal, .. } | Predicate::StringMatch { literal, .. } => {
                literal
            }
        }
    }
}

impl Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Comparison {
                column,
                op,
                literal,
            } => write!(f, "{} {} {}", column, op.symbol(), literal),
            Predicate::StringMatch {
                column,
                op: MatchOp::NotContains,
                literal,
            } => write!(f, "NOT contains({}, {})", column, literal),
            Predicate::StringMatch {
                column,
                op,
                literal,
            } => write!(f, "{}({}, {})", op.name(), column, literal),
        }
    }
}

/// One entry of a condition list
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub predicate: Predicate,
    /// `None` only for the first condition
    pub combinator: Option<Combinator>,
}

impl Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.combinator {
            Some(combinator) => write!(f, "{} {}", combinator, self.predicate),
            None => write!(f, "{}", self.predicate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_sets_by_type() {
        let numeric: Vec<&str> = operators_for(ColumnType::Numeric)
            .iter()
            .map(Operator::label)
            .collect();
        assert_eq!(numeric, vec!["==", "!=", ">", "<", ">=", "<="]);

        let text: Vec<&str> = operators_for(ColumnType::Text)
            .iter()
            .map(Operator::label)
            .collect();
        assert_eq!(
            text,
            vec!["==", "!=", "contains", "not contains", "startswith", "endswith"]
        );
    }

    #[test]
    fn test_aggregates_are_not_operators() {
        for name in ["SUM", "AVG", "COUNT", "sum"] {
            match name.parse::<Operator>() {
                Err(Error::InvalidPredicate(msg)) => assert!(msg.contains("aggregate")),
                other => panic!("expected aggregate rejection, got {:?}", other),
            }
        }
        assert!("~=".parse::<Operator>().is_err());
    }

    #[test]
    fn test_rendering() {
        let numeric = Literal::Numeric {
            value: 50.0,
            raw: "50".to_string(),
        };
        let cond = Condition {
            predicate: Predicate::new("score", ">=".parse().unwrap(), numeric),
            combinator: None,
        };
        assert_eq!(cond.to_string(), "score >= 50");

        let cond = Condition {
            predicate: Predicate::new(
                "name",
                "not contains".parse().unwrap(),
                Literal::Text("say \"hi\"".to_string()),
            ),
            combinator: Some(Combinator::Or),
        };
        assert_eq!(cond.to_string(), r#"OR NOT contains(name, "say \"hi\"")"#);
    }
}
