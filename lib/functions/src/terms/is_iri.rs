use crate::{SparqlOp, UnarySparqlOp};
use rdf_algebra_model::{Boolean, EvalResult, TypedValueRef};

#[derive(Debug)]
pub struct IsIriSparqlOp;

impl Default for IsIriSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl IsIriSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for IsIriSparqlOp {
    fn name(&self) -> &str {
        "isIRI"
    }
}

impl UnarySparqlOp for IsIriSparqlOp {
    type Arg<'data> = TypedValueRef<'data>;
    type Result<'data> = Boolean;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        Ok(matches!(value, TypedValueRef::NamedNode(_)).into())
    }
}
