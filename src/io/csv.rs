use csv::{ReaderBuilder, WriterBuilder};
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::core::data_value::DataValue;
use crate::core::error::{Error, Result};
use crate::DataFrame;

/// Options shared by the CSV readers and writers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    pub delimiter: u8,
    /// Gzip level used when writing compressed output (0-9)
    pub compression_level: u32,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            compression_level: 6,
        }
    }
}

/// Read a DataFrame from any CSV source with a header row
///
/// Header names are kept exactly as written, surrounding spaces included.
/// Every cell is read as text; empty fields become missing. Rows shorter
/// than the header are padded with missing cells, longer rows are rejected.
pub fn read_csv_from<R: Read>(reader: R, options: &CsvOptions) -> Result<DataFrame> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(options.delimiter)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(Error::Csv)?
        .iter()
        .map(str::to_string)
        .collect();
    let width = headers.len();
    let mut df = DataFrame::with_columns(headers)?;

    for (line, result) in rdr.records().enumerate() {
        let record = result.map_err(Error::Csv)?;
        if record.len() > width {
            return Err(Error::Parse(format!(
                "data row {} has {} fields but the header has {}",
                line + 1,
                record.len(),
                width
            )));
        }
        let mut row: Vec<DataValue> = record.iter().map(DataValue::from_field).collect();
        row.resize(width, DataValue::Missing);
        df.add_row(row)?;
    }

    Ok(df)
}

/// Read a DataFrame from a plain CSV file
pub fn read_csv<P: AsRef<Path>>(path: P, options: &CsvOptions) -> Result<DataFrame> {
    let file = File::open(path.as_ref()).map_err(Error::Io)?;
    read_csv_from(BufReader::new(file), options)
}

/// Read a DataFrame from a gzip-compressed CSV file
pub fn read_csv_gz<P: AsRef<Path>>(path: P, options: &CsvOptions) -> Result<DataFrame> {
    let file = File::open(path.as_ref()).map_err(Error::Io)?;
    read_csv_from(MultiGzDecoder::new(BufReader::new(file)), options)
}

/// Write a DataFrame as CSV with a header row and no index column
pub fn write_csv_to<W: Write>(df: &DataFrame, writer: W, options: &CsvOptions) -> Result<W> {
    let mut wtr = WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(writer);

    wtr.write_record(df.column_names()).map_err(Error::Csv)?;
    for row in df.rows() {
        wtr.write_record(row.iter().map(|v| v.to_field().into_owned()))
            .map_err(Error::Csv)?;
    }

    wtr.flush().map_err(Error::Io)?;
    wtr.into_inner()
        .map_err(|e| Error::IoError(format!("Could not flush CSV output: {}", e)))
}

/// Write a DataFrame to a plain CSV file
pub fn write_csv<P: AsRef<Path>>(df: &DataFrame, path: P, options: &CsvOptions) -> Result<()> {
    let file = File::create(path.as_ref()).map_err(Error::Io)?;
    let mut out = write_csv_to(df, BufWriter::new(file), options)?;
    out.flush().map_err(Error::Io)?;
    Ok(())
}

/// Write a DataFrame to a gzip-compressed CSV file
pub fn write_csv_gz<P: AsRef<Path>>(df: &DataFrame, path: P, options: &CsvOptions) -> Result<()> {
    let file = File::create(path.as_ref()).map_err(Error::Io)?;
    let encoder = GzEncoder::new(
        BufWriter::new(file),
        Compression::new(options.compression_level),
    );
    let encoder = write_csv_to(df, encoder, options)?;
    let mut inner = encoder.finish().map_err(Error::Io)?;
    inner.flush().map_err(Error::Io)?;
    Ok(())
}
