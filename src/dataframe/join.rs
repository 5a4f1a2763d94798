use std::collections::{HashMap, HashSet};

use crate::core::data_value::DataValue;
use crate::core::error::{Error, Result};
use crate::dataframe::base::DataFrame;

/// Suffixes appended to column names present on both sides of a join
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinSuffixes {
    pub left: String,
    pub right: String,
}

impl Default for JoinSuffixes {
    fn default() -> Self {
        Self {
            left: "_left".to_string(),
            right: "_right".to_string(),
        }
    }
}

/// Lookup functionality for DataFrames
pub trait JoinExt {
    /// Left outer join keyed on the first column of each table
    fn lookup_join(&self, other: &Self) -> Result<Self>
    where
        Self: Sized;

    /// Left outer join with explicit suffixes for colliding column names
    fn lookup_join_with_suffixes(&self, other: &Self, suffixes: &JoinSuffixes) -> Result<Self>
    where
        Self: Sized;
}

impl JoinExt for DataFrame {
    fn lookup_join(&self, other: &Self) -> Result<Self> {
        self.lookup_join_with_suffixes(other, &JoinSuffixes::default())
    }

    fn lookup_join_with_suffixes(&self, other: &Self, suffixes: &JoinSuffixes) -> Result<Self> {
        let left_key = self.column_name(0).ok_or_else(|| {
            Error::JoinKeyMissing("left table has no columns".to_string())
        })?;
        let right_key = other.column_name(0).ok_or_else(|| {
            Error::JoinKeyMissing("right table has no columns".to_string())
        })?;

        // The right key is redundant when it shares the left key's name
        let right_columns: Vec<usize> = (0..other.column_count())
            .filter(|&i| !(i == 0 && right_key == left_key))
            .collect();

        let columns = output_columns(self, other, &right_columns, suffixes)?;

        // Build mapping for join keys
        let mut right_key_to_indices: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, row) in other.rows().iter().enumerate() {
            if let Some(key) = row[0].as_text() {
                right_key_to_indices
                    .entry(key.into_owned())
                    .or_default()
                    .push(i);
            }
        }

        let mut rows = Vec::with_capacity(self.row_count());
        let mut matched = 0usize;
        for left_row in self.rows() {
            let matches = left_row[0]
                .as_text()
                .and_then(|key| right_key_to_indices.get(key.as_ref()));

            match matches {
                Some(right_indices) => {
                    matched += 1;
                    for &right_idx in right_indices {
                        let right_row = &other.rows()[right_idx];
                        let mut row = left_row.clone();
                        row.extend(right_columns.iter().map(|&c| right_row[c].clone()));
                        rows.push(row);
                    }
                }
                None => {
                    let mut row = left_row.clone();
                    row.resize(left_row.len() + right_columns.len(), DataValue::Missing);
                    rows.push(row);
                }
            }
        }

        let result = DataFrame::from_rows(columns, rows)?;
        log::info!(
            "Lookup join on '{}' = '{}': {} of {} left row(s) matched, {} row(s) produced",
            left_key,
            right_key,
            matched,
            self.row_count(),
            result.row_count()
        );
        Ok(result)
    }
}

/// Left columns followed by the kept right columns, with collisions suffixed
fn output_columns(
    left: &DataFrame,
    right: &DataFrame,
    right_columns: &[usize],
    suffixes: &JoinSuffixes,
) -> Result<Vec<String>> {
    let left_names: HashSet<&str> = left.column_names().iter().map(String::as_str).collect();
    let right_names: HashSet<&str> = right_columns
        .iter()
        .filter_map(|&i| right.column_name(i))
        .collect();

    let mut columns: Vec<String> = left
        .column_names()
        .iter()
        .map(|name| {
            if right_names.contains(name.as_str()) {
                format!("{}{}", name, suffixes.left)
            } else {
                name.clone()
            }
        })
        .collect();

    for &i in right_columns {
        let name = right.column_name(i).unwrap_or_default();
        if left_names.contains(name) {
            columns.push(format!("{}{}", name, suffixes.right));
        } else {
            columns.push(name.to_string());
        }
    }

    let mut seen = HashSet::new();
    for name in &columns {
        if !seen.insert(name.as_str()) {
            return Err(Error::DuplicateColumnName(format!(
                "'{}' is produced twice by the join; rename the input columns or change the suffixes",
                name
            )));
        }
    }

    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_unmatched_rows_get_missing_cells() {
        let left = frame(&["id", "name"], &[&["1", "a"], &["2", "b"]]);
        let right = frame(&["id", "score"], &[&["1", "80"]]);

        let joined = left.lookup_join(&right).unwrap();
        assert_eq!(joined.column_names(), &["id", "name", "score"]);
        assert_eq!(joined.row_count(), 2);
        assert_eq!(joined.get(0, "score"), Some(&DataValue::from("80")));
        assert_eq!(joined.get(1, "score"), Some(&DataValue::Missing));
    }

    #[test]
    fn test_duplicate_right_keys_multiply_rows() {
        let left = frame(&["id", "name"], &[&["1", "a"], &["2", "b"]]);
        let right = frame(&["id", "tag"], &[&["1", "x"], &["1", "y"], &["3", "z"]]);

        let joined = left.lookup_join(&right).unwrap();
        assert_eq!(joined.row_count(), 3);
        let tags: Vec<_> = joined.column_values("tag").unwrap();
        assert_eq!(
            tags,
            vec![
                &DataValue::from("x"),
                &DataValue::from("y"),
                &DataValue::Missing
            ]
        );
    }

    #[test]
    fn test_numeric_and_text_keys_match_textually() {
        let left = DataFrame::from_rows(
            ["key"],
            vec![vec![DataValue::Number(7.0)], vec![DataValue::from("007")]],
        )
        .unwrap();
        let right = frame(&["code", "label"], &[&["7", "seven"]]);

        let joined = left.lookup_join(&right).unwrap();
        assert_eq!(joined.column_names(), &["key", "code", "label"]);
        assert_eq!(joined.get(0, "label"), Some(&DataValue::from("seven")));
        assert_eq!(joined.get(1, "label"), Some(&DataValue::Missing));
    }

    #[test]
    fn test_colliding_columns_are_suffixed() {
        let left = frame(&["id", "name"], &[&["1", "a"]]);
        let right = frame(&["id", "name"], &[&["1", "b"]]);

        let joined = left.lookup_join(&right).unwrap();
        assert_eq!(joined.column_names(), &["id", "name_left", "name_right"]);
    }

    #[test]
    fn test_missing_keys_never_match() {
        let left = frame(&["id", "v"], &[&["", "a"]]);
        let right = frame(&["id", "w"], &[&["", "b"]]);

        let joined = left.lookup_join(&right).unwrap();
        assert_eq!(joined.row_count(), 1);
        assert_eq!(joined.get(0, "w"), Some(&DataValue::Missing));
    }

    #[test]
    fn test_table_without_columns_has_no_key() {
        let left = frame(&["id"], &[&["1"]]);
        let right = DataFrame::new();
        assert!(matches!(
            left.lookup_join(&right),
            Err(Error::JoinKeyMissing(_))
        ));
        assert!(matches!(
            right.lookup_join(&left),
            Err(Error::JoinKeyMissing(_))
        ));
    }
}
