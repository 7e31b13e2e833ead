use crate::{SparqlOp, UnarySparqlOp};
use rdf_algebra_model::{EvalResult, Numeric};

#[derive(Debug)]
pub struct UnaryPlusSparqlOp;

impl Default for UnaryPlusSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl UnaryPlusSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for UnaryPlusSparqlOp {
    fn name(&self) -> &str {
        "unary+"
    }
}

impl UnarySparqlOp for UnaryPlusSparqlOp {
    type Arg<'data> = Numeric;
    type Result<'data> = Numeric;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        Ok(value)
    }
}
