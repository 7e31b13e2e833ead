use crate::{SparqlOp, UnarySparqlOp};
use rdf_algebra_model::{Boolean, EvalResult, TypedValueRef};

#[derive(Debug)]
pub struct IsTripleSparqlOp;

impl Default for IsTripleSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl IsTripleSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for IsTripleSparqlOp {
    fn name(&self) -> &str {
        "isTriple"
    }
}

impl UnarySparqlOp for IsTripleSparqlOp {
    type Arg<'data> = TypedValueRef<'data>;
    type Result<'data> = Boolean;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        Ok(matches!(value, TypedValueRef::Triple(_)).into())
    }
}
