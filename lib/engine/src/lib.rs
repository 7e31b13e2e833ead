//! The execution engine of the algebra.
//!
//! The engine executes operator trees of [rdf_algebra_logical] against a store that implements
//! [Queryable]. Queries produce [QueryResults], updates modify the store.

pub mod error;
mod options;
mod queryable;
pub mod results;
pub mod sparql;
#[cfg(test)]
mod test_store;

pub use error::StorageError;
pub use options::{DefaultGraphMode, ExecutionOptions, LoadOptions};
pub use queryable::Queryable;
pub use results::{QueryResults, UpdateSummary};
pub use sparql::error::QueryEvaluationError;
pub use sparql::{
    evaluate_expression, execute, execute_query, execute_update, Aggregatable, EvalContext,
    Evaluatable, Executable, Scope, Updatable,
};
