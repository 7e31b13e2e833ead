//! Execution of operator trees.
//!
//! The operators of the algebra are split by what they can do (see
//! [Capability](rdf_algebra_logical::Capability)). Each capability has a trait in this module:
//!
//! - [Executable]: graph patterns produce solutions from a store.
//! - [Evaluatable]: expressions produce a term from a solution.
//! - [Aggregatable]: aggregates reduce a group of solutions to a term.
//! - [Updatable]: update operations modify a store.
//!
//! The entry points [execute], [execute_query], [execute_update] and [evaluate_expression] create
//! the [EvalContext] of an execution and evaluate the root of the tree.

mod aggregate;
mod context;
pub mod error;
mod eval;
mod expression;
mod forms;
mod path;
mod pattern;
mod update;

pub use context::{EvalContext, Scope};
pub use eval::{evaluate_expression, execute, execute_query, execute_update};

use crate::queryable::Queryable;
use crate::results::UpdateSummary;
use crate::ExecutionOptions;
use error::QueryEvaluationError;
use rdf_algebra_model::{EvalResult, Solution, Solutions, Term};

/// An operator that produces solutions from a store.
pub trait Executable {
    fn execute(
        &self,
        ctx: &EvalContext<'_>,
        scope: &Scope,
    ) -> Result<Solutions, QueryEvaluationError>;
}

/// An operator that produces a term from a solution.
///
/// Errors are scoped to `solution`. The caller decides whether they are neutralized or abort the
/// execution.
pub trait Evaluatable {
    fn evaluate(&self, solution: &Solution, ctx: &EvalContext<'_>, scope: &Scope)
        -> EvalResult<Term>;
}

/// An operator that reduces a group of solutions to a term.
pub trait Aggregatable {
    fn aggregate(
        &self,
        group: &[Solution],
        ctx: &EvalContext<'_>,
        scope: &Scope,
    ) -> EvalResult<Term>;
}

/// An operator that modifies a store.
pub trait Updatable {
    fn apply(
        &self,
        store: &mut dyn Queryable,
        options: &ExecutionOptions,
    ) -> Result<UpdateSummary, QueryEvaluationError>;
}
