use crate::{SparqlOp, UnarySparqlOp};
use rdf_algebra_model::{DateTime, EvalResult, Integer};

#[derive(Debug)]
pub struct YearSparqlOp;

impl Default for YearSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl YearSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for YearSparqlOp {
    fn name(&self) -> &str {
        "year"
    }
}

impl UnarySparqlOp for YearSparqlOp {
    type Arg<'data> = DateTime;
    type Result<'data> = Integer;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        Ok(Integer::from(value.year()))
    }
}
