use crate::{SparqlOp, UnarySparqlOp};
use rdf_algebra_model::{Boolean, EvalResult, TypedValueRef};

#[derive(Debug)]
pub struct IsBlankSparqlOp;

impl Default for IsBlankSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl IsBlankSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for IsBlankSparqlOp {
    fn name(&self) -> &str {
        "isBlank"
    }
}

impl UnarySparqlOp for IsBlankSparqlOp {
    type Arg<'data> = TypedValueRef<'data>;
    type Result<'data> = Boolean;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        Ok(matches!(value, TypedValueRef::BlankNode(_)).into())
    }
}
