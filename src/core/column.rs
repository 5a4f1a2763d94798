use std::fmt::{self, Display};

use lazy_static::lazy_static;
use regex::Regex;

use crate::core::data_value::DataValue;
use crate::core::error::{Error, Result};
use crate::dataframe::DataFrame;

lazy_static! {
    static ref NUMERIC_CELL: Regex = Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)$").unwrap();
}

/// Inferred type of a column
///
/// Never stored on the table: it is derived from the cells every time it is
/// asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Numeric,
    Text,
}

impl Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Numeric => write!(f, "numeric"),
            ColumnType::Text => write!(f, "text"),
        }
    }
}

/// Whether already-trimmed text is an optionally signed decimal literal
pub(crate) fn is_numeric_text(text: &str) -> bool {
    NUMERIC_CELL.is_match(text)
}

fn is_numeric_cell(value: &DataValue) -> bool {
    match value {
        DataValue::Missing => false,
        DataValue::Number(n) => n.is_finite(),
        DataValue::Text(s) => is_numeric_text(s.trim()),
    }
}

/// Classify a sequence of cells
///
/// Numeric only when every cell is present and numeric: a single missing or
/// non-numeric cell makes the whole column text.
pub fn infer_values<'a, I>(values: I) -> ColumnType
where
    I: IntoIterator<Item = &'a DataValue>,
{
    if values.into_iter().all(is_numeric_cell) {
        ColumnType::Numeric
    } else {
        ColumnType::Text
    }
}

/// Classify a column of a table
pub fn infer(df: &DataFrame, column: &str) -> Result<ColumnType> {
    let idx = df
        .column_index(column)
        .ok_or_else(|| Error::ColumnNotFound(column.to_string()))?;
    Ok(infer_values(df.rows().iter().map(|row| &row[idx])))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(raw: &[&str]) -> Vec<DataValue> {
        raw.iter().map(|s| DataValue::from_field(s)).collect()
    }

    #[test]
    fn test_all_numeric_column() {
        assert_eq!(infer_values(&cells(&["1", "2", "3"])), ColumnType::Numeric);
        assert_eq!(
            infer_values(&cells(&[" 1.5", "-2", "+.5 ", "3."])),
            ColumnType::Numeric
        );
    }

    #[test]
    fn test_single_missing_cell_forces_text() {
        assert_eq!(infer_values(&cells(&["1", "", "3"])), ColumnType::Text);
    }

    #[test]
    fn test_single_text_cell_forces_text() {
        assert_eq!(infer_values(&cells(&["1", "a", "3"])), ColumnType::Text);
        assert_eq!(infer_values(&cells(&["1", "1.2.3"])), ColumnType::Text);
        assert_eq!(infer_values(&cells(&["1e5"])), ColumnType::Text);
    }

    #[test]
    fn test_number_cells_are_numeric() {
        let values = vec![DataValue::Number(1.0), DataValue::from("2")];
        assert_eq!(infer_values(&values), ColumnType::Numeric);
    }

    #[test]
    fn test_empty_column_is_numeric() {
        assert_eq!(infer_values(&[]), ColumnType::Numeric);
    }
}
