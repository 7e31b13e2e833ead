use crate::{BinarySparqlOp, SparqlOp};
use rdf_algebra_model::{EvalResult, Literal, NamedNodeRef, SimpleLiteralRef};

#[derive(Debug)]
pub struct StrDtSparqlOp;

impl Default for StrDtSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl StrDtSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for StrDtSparqlOp {
    fn name(&self) -> &str {
        "strdt"
    }
}

impl BinarySparqlOp for StrDtSparqlOp {
    type ArgLhs<'data> = SimpleLiteralRef<'data>;
    type ArgRhs<'data> = NamedNodeRef<'data>;
    type Result<'data> = Literal;

    fn evaluate<'data>(
        &self,
        lhs: Self::ArgLhs<'data>,
        rhs: Self::ArgRhs<'data>,
    ) -> EvalResult<Self::Result<'data>> {
        Ok(Literal::new_typed_literal(lhs.0, rhs))
    }
}
