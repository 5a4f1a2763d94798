pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;

use std::path::Path;

use crate::core::error::{Error, Result};
use crate::dataframe::DataFrame;

// Re-export commonly used functions
pub use self::csv::{
    read_csv, read_csv_from, read_csv_gz, write_csv, write_csv_gz, write_csv_to, CsvOptions,
};
#[cfg(feature = "excel")]
pub use self::excel::read_excel;

/// On-disk formats understood by the loader and writer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Plain comma-separated text
    Csv,
    /// Gzip-compressed comma-separated text
    CsvGz,
    /// Spreadsheet table (first sheet)
    Xlsx,
}

impl FileFormat {
    /// Pick a format from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") | Some("txt") => Ok(FileFormat::Csv),
            Some("gz") => Ok(FileFormat::CsvGz),
            Some("xlsx") => Ok(FileFormat::Xlsx),
            Some(other) => Err(Error::IoError(format!(
                "Unsupported file format '.{}' for {}",
                other,
                path.display()
            ))),
            None => Err(Error::IoError(format!(
                "Cannot tell the format of {} without an extension",
                path.display()
            ))),
        }
    }
}

/// Load a table, choosing the reader from the file extension
pub fn load_table<P: AsRef<Path>>(path: P, options: &CsvOptions) -> Result<DataFrame> {
    let path = path.as_ref();
    let df = match FileFormat::from_path(path)? {
        FileFormat::Csv => read_csv(path, options)?,
        FileFormat::CsvGz => read_csv_gz(path, options)?,
        #[cfg(feature = "excel")]
        FileFormat::Xlsx => read_excel(path, None)?,
        #[cfg(not(feature = "excel"))]
        FileFormat::Xlsx => {
            return Err(Error::IoError(
                "Excel support is disabled; rebuild with the 'excel' feature".to_string(),
            ))
        }
    };
    log::info!(
        "Loaded {} ({} row(s), {} column(s))",
        path.display(),
        df.row_count(),
        df.column_count()
    );
    Ok(df)
}

/// Save a table, compressing when the target ends in `.gz`
pub fn save_table<P: AsRef<Path>>(df: &DataFrame, path: P, options: &CsvOptions) -> Result<()> {
    let path = path.as_ref();
    match FileFormat::from_path(path)? {
        FileFormat::CsvGz => write_csv_gz(df, path, options)?,
        FileFormat::Csv => write_csv(df, path, options)?,
        FileFormat::Xlsx => {
            return Err(Error::IoError(format!(
                "Writing spreadsheets is not supported: {}",
                path.display()
            )))
        }
    }
    log::info!("Saved {} row(s) to {}", df.row_count(), path.display());
    Ok(())
}
