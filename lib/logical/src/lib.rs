//! The operator tree of the algebra.
//!
//! This crate contains the types that describe a query (graph patterns, expressions, property
//! paths, aggregates and update operations), the static [OperatorKind] registry, the
//! construction-time validation rules, the textual exchange form (see [sse]), and a small set of
//! algebraic simplifications ([optimize]).
//!
//! Operator trees are immutable once they are built. Modifiers like `DISTINCT` or the separator of
//! `GROUP_CONCAT` are fields of the nodes and never change during evaluation.

mod builder;
mod expression;
mod kind;
mod optimize;
mod path;
mod pattern;
mod query;
pub mod sse;
mod validation;

pub use builder::{AlgebraBuilder, JoinType};
pub use expression::{
    AggregateExpression, AggregateFunction, Expression, GroupKey, OrderExpression,
};
pub use kind::{Arity, Capability, OperatorInfo, OperatorKind};
pub use optimize::{optimize, optimize_query, optimize_update};
pub use path::PropertyPath;
pub use pattern::{GraphPattern, QueryDataset};
pub use query::{Operation, Query, Update, UpdateOperation};
pub use sse::SseParseError;
pub use validation::ValidationError;
