//! Condition building and evaluation for DataFrames
//!
//! Conditions are collected one at a time and folded strictly left to right:
//! - ast: operators, literals and the predicate tree
//! - builder: validation and literal coercion of raw input
//! - conditions: the ordered condition list
//! - evaluator: per-row interpretation of predicates
//! - engine: execution and DataFrame integration

mod ast;
mod builder;
mod conditions;
mod engine;
mod evaluator;

pub use ast::{
    operators_for, Combinator, CompareOp, Condition, Literal, MatchOp, Operator, Predicate,
};
pub use builder::{coerce_literal, PredicateBuilder};
pub use conditions::ConditionStore;
pub use engine::{Notice, QueryEngine, QueryExt, QueryOutcome};
pub use evaluator::{compare_cell, match_cell, Evaluator};
