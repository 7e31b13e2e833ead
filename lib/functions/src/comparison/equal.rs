use crate::{BinarySparqlOp, SparqlOp};
use rdf_algebra_model::{Boolean, EvalError, EvalResult, TypedValueRef};
use std::cmp::Ordering;

/// The `=` operator.
///
/// Literals are compared in their value space. Literals of an unknown data type can only be
/// proven equal if they are identical; otherwise the comparison is an error. IRIs, blank nodes and
/// triples are compared structurally.
#[derive(Debug)]
pub struct EqualSparqlOp;

impl Default for EqualSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl EqualSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for EqualSparqlOp {
    fn name(&self) -> &str {
        "="
    }
}

impl BinarySparqlOp for EqualSparqlOp {
    type ArgLhs<'data> = TypedValueRef<'data>;
    type ArgRhs<'data> = TypedValueRef<'data>;
    type Result<'data> = Boolean;

    fn evaluate<'data>(
        &self,
        lhs: Self::ArgLhs<'data>,
        rhs: Self::ArgRhs<'data>,
    ) -> EvalResult<Self::Result<'data>> {
        sparql_equals(lhs, rhs).map(Into::into)
    }
}

/// The `!=` operator. Errors of the equality test are propagated.
#[derive(Debug)]
pub struct NotEqualSparqlOp;

impl Default for NotEqualSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl NotEqualSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for NotEqualSparqlOp {
    fn name(&self) -> &str {
        "!="
    }
}

impl BinarySparqlOp for NotEqualSparqlOp {
    type ArgLhs<'data> = TypedValueRef<'data>;
    type ArgRhs<'data> = TypedValueRef<'data>;
    type Result<'data> = Boolean;

    fn evaluate<'data>(
        &self,
        lhs: Self::ArgLhs<'data>,
        rhs: Self::ArgRhs<'data>,
    ) -> EvalResult<Self::Result<'data>> {
        sparql_equals(lhs, rhs).map(|equal| (!equal).into())
    }
}

pub(crate) fn sparql_equals(lhs: TypedValueRef<'_>, rhs: TypedValueRef<'_>) -> EvalResult<bool> {
    if !lhs.is_literal() || !rhs.is_literal() {
        return Ok(lhs == rhs);
    }

    if let Some(ordering) = lhs.partial_cmp_values(&rhs) {
        return Ok(ordering == Ordering::Equal);
    }

    match (lhs, rhs) {
        (TypedValueRef::OtherLiteral(a), TypedValueRef::OtherLiteral(b)) if a == b => Ok(true),
        (TypedValueRef::OtherLiteral(_), _) | (_, TypedValueRef::OtherLiteral(_)) => {
            EvalError::expected()
        }
        // NaN is a valid numeric value that is not equal to itself.
        _ => Ok(false),
    }
}
