use thiserror::Error;

/// Error type definitions
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("IO error")]
    Io(#[source] std::io::Error),

    #[error("CSV error")]
    Csv(#[source] csv::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Excel error: {0}")]
    Excel(String),

    #[error("Schema mismatch in input {index}: expected columns {expected:?}, found {found:?}")]
    SchemaMismatch {
        index: usize,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Join key missing: {0}")]
    JoinKeyMissing(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Duplicate column name: {0}")]
    DuplicateColumnName(String),

    #[error("Inconsistent row length: expected {expected}, found {found}")]
    InconsistentRowLength { expected: usize, found: usize },

    #[error("Condition incomplete: {0}")]
    ConditionIncomplete(String),

    #[error("Invalid predicate: {0}")]
    InvalidPredicate(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Empty data: {0}")]
    EmptyData(String),

    #[error("Worker error: {0}")]
    Worker(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

#[cfg(feature = "excel")]
impl From<calamine::XlsxError> for Error {
    fn from(err: calamine::XlsxError) -> Self {
        Error::Excel(err.to_string())
    }
}

impl Error {
    /// Whether the error comes from reading or writing files
    pub fn is_io(&self) -> bool {
        match self {
            Error::Io(_) | Error::IoError(_) => true,
            Error::Csv(e) => e.is_io_error(),
            _ => false,
        }
    }

    /// Whether the error comes from malformed tabular input
    pub fn is_parse(&self) -> bool {
        match self {
            Error::Csv(e) => !e.is_io_error(),
            Error::Parse(_) | Error::Excel(_) => true,
            _ => false,
        }
    }
}
