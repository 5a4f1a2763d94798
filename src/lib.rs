//! mergequery: merge tabular extracts, look them up against a reference
//! table and filter the joined rows with incrementally built conditions.

// Core module with fundamental data structures
pub mod core;

pub mod config;
pub mod dataframe;
pub mod error;
pub mod io;
pub mod merge;
pub mod session;

// Re-export core types
pub use crate::core::column::{infer, ColumnType};
pub use crate::core::data_value::DataValue;
pub use crate::core::error::{Error, Result};

pub use crate::config::AppConfig;
pub use crate::dataframe::query::{
    operators_for, Combinator, Condition, ConditionStore, Literal, Notice, Operator, Predicate,
    PredicateBuilder, QueryEngine, QueryExt, QueryOutcome,
};
pub use crate::dataframe::{concat, DataFrame, JoinExt, JoinSuffixes};
pub use crate::io::{load_table, save_table, CsvOptions, FileFormat};
pub use crate::merge::{default_merged_file_name, merge_files, spawn_merge, MergeEvent, MergeHandle};
pub use crate::session::Session;

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
