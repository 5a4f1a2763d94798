//! Row-wise concatenation of tables sharing one schema

use crate::core::error::{Error, Result};
use crate::dataframe::base::DataFrame;

/// Concatenate tables in input order
///
/// Every table must carry exactly the column sequence of the first one;
/// rows are appended as-is, without deduplication.
pub fn concat(frames: &[DataFrame]) -> Result<DataFrame> {
    let Some(first) = frames.first() else {
        return Ok(DataFrame::new());
    };

    let expected = first.column_names();
    for (index, frame) in frames.iter().enumerate().skip(1) {
        if frame.column_names() != expected {
            return Err(Error::SchemaMismatch {
                index,
                expected: expected.to_vec(),
                found: frame.column_names().to_vec(),
            });
        }
    }

    let total: usize = frames.iter().map(DataFrame::row_count).sum();
    let mut rows = Vec::with_capacity(total);
    for frame in frames {
        rows.extend(frame.rows().iter().cloned());
    }

    let merged = DataFrame::from_rows(expected.iter().cloned(), rows)?;
    log::info!(
        "Concatenated {} table(s) into {} row(s)",
        frames.len(),
        merged.row_count()
    );
    Ok(merged)
}

impl DataFrame {
    /// Append the rows of another table with the same columns
    pub fn concat_rows(&self, other: &DataFrame) -> Result<DataFrame> {
        concat(&[self.clone(), other.clone()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data_value::DataValue;

    fn frame(columns: &[&str], rows: &[&[&str]]) -> DataFrame {
        DataFrame::from_rows(
            columns.iter().copied(),
            rows.iter()
                .map(|r| r.iter().map(|s| DataValue::from(*s)).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_concat_preserves_order() {
        let a = frame(&["id", "name"], &[&["1", "a"], &["2", "b"]]);
        let b = frame(&["id", "name"], &[&["3", "c"]]);
        let merged = concat(&[a.clone(), b.clone()]).unwrap();

        let mut expected = a.rows().to_vec();
        expected.extend(b.rows().iter().cloned());
        assert_eq!(merged.rows(), expected.as_slice());
        assert_eq!(merged.column_names(), a.column_names());
    }

    #[test]
    fn test_concat_rejects_reordered_columns() {
        let a = frame(&["id", "name"], &[&["1", "a"]]);
        let b = frame(&["name", "id"], &[&["b", "2"]]);
        match concat(&[a, b]) {
            Err(Error::SchemaMismatch { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected schema mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_concat_nothing() {
        let merged = concat(&[]).unwrap();
        assert_eq!(merged.column_count(), 0);
        assert_eq!(merged.row_count(), 0);
    }
}
