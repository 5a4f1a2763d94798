// DataFrame implementations module
pub mod base;
pub mod concat;
pub mod join;
pub mod query;

// Re-exports for convenience
pub use base::DataFrame;
pub use concat::concat;
pub use join::{JoinExt, JoinSuffixes};
pub use query::{
    operators_for, Combinator, ConditionStore, Notice, Operator, PredicateBuilder, QueryEngine,
    QueryExt, QueryOutcome,
};
