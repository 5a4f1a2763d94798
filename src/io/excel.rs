use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};

use crate::core::data_value::DataValue;
use crate::core::error::{Error, Result};
use crate::dataframe::DataFrame;

/// Read a DataFrame from the first sheet of an Excel (.xlsx) file
///
/// The first row is the header. Numeric cells stay numbers, text cells stay
/// text and empty cells become missing.
///
/// # Examples
///
/// ```no_run
/// use mergequery::io::read_excel;
///
/// let lookup = read_excel("lookup.xlsx", None).unwrap();
/// let named = read_excel("lookup.xlsx", Some("Scores")).unwrap();
/// ```
pub fn read_excel<P: AsRef<Path>>(path: P, sheet_name: Option<&str>) -> Result<DataFrame> {
    let mut workbook: Xlsx<BufReader<File>> = open_workbook(path.as_ref())
        .map_err(|e| Error::IoError(format!("Could not open Excel file: {}", e)))?;

    let sheet_name = match sheet_name {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| Error::Excel("Excel file has no sheets".to_string()))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| Error::Excel(format!("Could not read sheet '{}': {}", sheet_name, e)))?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(DataFrame::new());
    };
    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell.to_string())
        .collect();
    let mut df = DataFrame::with_columns(headers)?;

    for row in rows {
        df.add_row(row.iter().map(cell_value).collect())?;
    }

    Ok(df)
}

fn cell_value(cell: &Data) -> DataValue {
    match cell {
        Data::Empty => DataValue::Missing,
        Data::Int(i) => DataValue::Number(*i as f64),
        Data::Float(f) => DataValue::Number(*f),
        Data::String(s) => DataValue::from_field(s),
        other => DataValue::from(other.to_string()),
    }
}
