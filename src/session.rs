//! The workspace a filtering session operates on
//!
//! A session owns the current merged table, the current joined table, the
//! condition list and the last query outcome. Every operation either
//! succeeds completely or leaves all of them as they were.

use std::path::Path;

use crate::config::AppConfig;
use crate::core::error::{Error, Result};
use crate::dataframe::query::{
    Combinator, ConditionStore, Operator, PredicateBuilder, QueryEngine, QueryOutcome,
};
use crate::dataframe::{concat, DataFrame, JoinExt};
use crate::io::{save_table, CsvOptions};

#[derive(Debug, Clone, Default)]
pub struct Session {
    config: AppConfig,
    merged: Option<DataFrame>,
    joined: Option<DataFrame>,
    conditions: ConditionStore,
    last_outcome: Option<QueryOutcome>,
}

impl Session {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn csv_options(&self) -> CsvOptions {
        self.config.io.csv_options()
    }

    pub fn merged(&self) -> Option<&DataFrame> {
        self.merged.as_ref()
    }

    pub fn joined(&self) -> Option<&DataFrame> {
        self.joined.as_ref()
    }

    pub fn conditions(&self) -> &ConditionStore {
        &self.conditions
    }

    pub fn last_outcome(&self) -> Option<&QueryOutcome> {
        self.last_outcome.as_ref()
    }

    /// Replace the merged table; the joined table and query state go with it
    pub fn set_merged(&mut self, df: DataFrame) -> &DataFrame {
        self.joined = None;
        self.reset_query();
        self.merged.insert(df)
    }

    /// Concatenate tables and make the result the merged table
    pub fn merge_tables(&mut self, frames: &[DataFrame]) -> Result<&DataFrame> {
        let merged = concat(frames)?;
        Ok(self.set_merged(merged))
    }

    /// Join the merged table against a lookup table
    ///
    /// The result becomes the table conditions are built against; existing
    /// conditions are discarded.
    pub fn lookup(&mut self, lookup: &DataFrame) -> Result<&DataFrame> {
        let merged = self
            .merged
            .as_ref()
            .ok_or_else(|| Error::EmptyData("no merged table to look up from".to_string()))?;
        let joined = merged.lookup_join_with_suffixes(lookup, &self.config.join.suffixes())?;
        Ok(self.set_joined(joined))
    }

    /// Replace the joined table directly, discarding query state
    pub fn set_joined(&mut self, df: DataFrame) -> &DataFrame {
        self.reset_query();
        self.joined.insert(df)
    }

    fn active_table(&self) -> Result<&DataFrame> {
        self.joined
            .as_ref()
            .ok_or_else(|| Error::EmptyData("no joined table to query".to_string()))
    }

    /// Operators available for a column of the joined table
    pub fn operators_for(&self, column: &str) -> Result<&'static [Operator]> {
        PredicateBuilder::new(self.active_table()?).operators_for_column(column)
    }

    /// Validate and append one condition, returning its rendered line
    pub fn add_condition(
        &mut self,
        column: &str,
        raw_operator: &str,
        raw_value: &str,
        combinator: Option<Combinator>,
    ) -> Result<String> {
        let joined = self
            .joined
            .as_ref()
            .ok_or_else(|| Error::EmptyData("no joined table to query".to_string()))?;
        PredicateBuilder::new(joined).add_condition(
            &mut self.conditions,
            column,
            raw_operator,
            raw_value,
            combinator,
        )
    }

    /// Run the conditions against the joined table
    pub fn execute(&mut self) -> Result<&QueryOutcome> {
        let outcome = QueryEngine::new().execute(self.active_table()?, &self.conditions)?;
        Ok(self.last_outcome.insert(outcome))
    }

    /// Drop all conditions and the last result
    pub fn clear_query(&mut self) {
        self.reset_query();
        log::info!("Cleared query conditions");
    }

    fn reset_query(&mut self) {
        self.conditions.clear();
        self.last_outcome = None;
    }

    /// Write the merged table (gzip when the path ends in `.gz`)
    pub fn save_merged<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let merged = self
            .merged
            .as_ref()
            .ok_or_else(|| Error::EmptyData("no merged table to save".to_string()))?;
        save_table(merged, path, &self.csv_options())
    }

    /// Write the rows matched by the last query
    pub fn save_result<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let outcome = self
            .last_outcome
            .as_ref()
            .ok_or_else(|| Error::EmptyData("no query result to save".to_string()))?;
        save_table(&outcome.frame, path, &self.csv_options())
    }
}
