use crate::{SparqlOp, UnarySparqlOp};
use rdf_algebra_model::{DateTime, Decimal, EvalResult};

#[derive(Debug)]
pub struct SecondsSparqlOp;

impl Default for SecondsSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl SecondsSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for SecondsSparqlOp {
    fn name(&self) -> &str {
        "seconds"
    }
}

impl UnarySparqlOp for SecondsSparqlOp {
    type Arg<'data> = DateTime;
    type Result<'data> = Decimal;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        Ok(value.second())
    }
}
