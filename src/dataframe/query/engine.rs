//! Query execution and DataFrame integration

use std::fmt::{self, Display};

use super::conditions::ConditionStore;
use super::evaluator::Evaluator;
use crate::core::error::{Error, Result};
use crate::dataframe::base::DataFrame;

/// Informational outcome of a query that is not a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The query ran but no row matched
    EmptyResult,
}

impl Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::EmptyResult => write!(f, "No matching data found for this query"),
        }
    }
}

/// Filtered table plus the number of matching rows
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    pub frame: DataFrame,
    pub match_count: usize,
}

impl QueryOutcome {
    /// `Some(Notice::EmptyResult)` when nothing matched
    pub fn notice(&self) -> Option<Notice> {
        if self.match_count == 0 {
            Some(Notice::EmptyResult)
        } else {
            None
        }
    }
}

/// Query engine for DataFrames
#[derive(Debug, Default, Clone, Copy)]
pub struct QueryEngine;

impl QueryEngine {
    /// Create a new query engine
    pub fn new() -> Self {
        Self
    }

    /// Execute the condition list on a DataFrame
    pub fn execute(&self, dataframe: &DataFrame, store: &ConditionStore) -> Result<QueryOutcome> {
        if store.is_empty() {
            return Err(Error::ConditionIncomplete("No queries added".to_string()));
        }

        let evaluator = Evaluator::new(dataframe, store)?;
        let mask = evaluator.evaluate_mask(store)?;
        let frame = dataframe.filter_by_mask(&mask)?;
        let match_count = frame.row_count();

        log::info!(
            "Executed {} condition(s) over {} row(s): {} matching",
            store.len(),
            dataframe.row_count(),
            match_count
        );
        let outcome = QueryOutcome { frame, match_count };
        if let Some(notice) = outcome.notice() {
            log::warn!("{}", notice);
        }
        Ok(outcome)
    }
}

/// Extension trait to add condition filtering to DataFrame
pub trait QueryExt {
    /// Keep the rows satisfying the folded condition list
    fn query(&self, store: &ConditionStore) -> Result<QueryOutcome>;
}

impl QueryExt for DataFrame {
    fn query(&self, store: &ConditionStore) -> Result<QueryOutcome> {
        QueryEngine::new().execute(self, store)
    }
}
