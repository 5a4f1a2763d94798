use std::collections::HashMap;
use std::fmt::{self, Display};

use crate::core::data_value::DataValue;
use crate::core::error::{Error, Result};

/// DataFrame struct: row-oriented table with ordered, uniquely named columns
///
/// Every row holds exactly one cell per column, in column order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataFrame {
    column_order: Vec<String>,
    column_indices: HashMap<String, usize>,
    rows: Vec<Vec<DataValue>>,
}

impl DataFrame {
    /// Create a new empty DataFrame
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty DataFrame with the given columns
    pub fn with_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut df = Self::new();
        for name in columns {
            let name = name.into();
            if df.column_indices.contains_key(&name) {
                return Err(Error::DuplicateColumnName(name));
            }
            df.column_indices.insert(name.clone(), df.column_order.len());
            df.column_order.push(name);
        }
        Ok(df)
    }

    /// Create a DataFrame from column names and rows
    pub fn from_rows<I, S>(columns: I, rows: Vec<Vec<DataValue>>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut df = Self::with_columns(columns)?;
        df.rows.reserve(rows.len());
        for row in rows {
            df.add_row(row)?;
        }
        Ok(df)
    }

    /// Append a row, which must have one cell per column
    pub fn add_row(&mut self, row: Vec<DataValue>) -> Result<()> {
        if row.len() != self.column_order.len() {
            return Err(Error::InconsistentRowLength {
                expected: self.column_order.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Check if the DataFrame contains a column with the given name
    pub fn contains_column(&self, column_name: &str) -> bool {
        self.column_indices.contains_key(column_name)
    }

    /// Position of a column
    pub fn column_index(&self, column_name: &str) -> Option<usize> {
        self.column_indices.get(column_name).copied()
    }

    /// Name of the column at a position
    pub fn column_name(&self, idx: usize) -> Option<&str> {
        self.column_order.get(idx).map(String::as_str)
    }

    /// Column names in display order
    pub fn column_names(&self) -> &[String] {
        &self.column_order
    }

    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.column_order.len()
    }

    /// Get the number of rows in the DataFrame
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether the DataFrame has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows in insertion order
    pub fn rows(&self) -> &[Vec<DataValue>] {
        &self.rows
    }

    /// A single row
    pub fn row(&self, idx: usize) -> Option<&[DataValue]> {
        self.rows.get(idx).map(Vec::as_slice)
    }

    /// A single cell addressed by row position and column name
    pub fn get(&self, row_idx: usize, column_name: &str) -> Option<&DataValue> {
        let col_idx = self.column_index(column_name)?;
        self.rows.get(row_idx).map(|row| &row[col_idx])
    }

    /// The cells of one column, top to bottom
    pub fn column_values(&self, column_name: &str) -> Result<Vec<&DataValue>> {
        let idx = self
            .column_index(column_name)
            .ok_or_else(|| Error::ColumnNotFound(column_name.to_string()))?;
        Ok(self.rows.iter().map(|row| &row[idx]).collect())
    }

    /// Keep the rows whose mask entry is true, preserving order
    pub fn filter_by_mask(&self, mask: &[bool]) -> Result<DataFrame> {
        if mask.len() != self.rows.len() {
            return Err(Error::InconsistentRowLength {
                expected: self.rows.len(),
                found: mask.len(),
            });
        }

        let rows = self
            .rows
            .iter()
            .zip(mask)
            .filter(|(_, &keep)| keep)
            .map(|(row, _)| row.clone())
            .collect();

        Ok(DataFrame {
            column_order: self.column_order.clone(),
            column_indices: self.column_indices.clone(),
            rows,
        })
    }
}

impl Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.column_order.join("\t"))?;
        for row in &self.rows {
            let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            writeln!(f, "{}", line.join("\t"))?;
        }
        Ok(())
    }
}
