// Core data structures for mergequery
pub mod column;
pub mod data_value;
pub mod error;

// Re-exports for convenience
pub use column::{infer, infer_values, ColumnType};
pub use data_value::DataValue;
pub use error::{Error, Result};
