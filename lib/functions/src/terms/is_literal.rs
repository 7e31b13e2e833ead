use crate::{SparqlOp, UnarySparqlOp};
use rdf_algebra_model::{Boolean, EvalResult, TypedValueRef};

#[derive(Debug)]
pub struct IsLiteralSparqlOp;

impl Default for IsLiteralSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl IsLiteralSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for IsLiteralSparqlOp {
    fn name(&self) -> &str {
        "isLiteral"
    }
}

impl UnarySparqlOp for IsLiteralSparqlOp {
    type Arg<'data> = TypedValueRef<'data>;
    type Result<'data> = Boolean;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        Ok(value.is_literal().into())
    }
}
