use crate::{SparqlOp, UnarySparqlOp};
use rdf_algebra_model::{DateTime, EvalResult, Integer};

#[derive(Debug)]
pub struct MonthSparqlOp;

impl Default for MonthSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl MonthSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for MonthSparqlOp {
    fn name(&self) -> &str {
        "month"
    }
}

impl UnarySparqlOp for MonthSparqlOp {
    type Arg<'data> = DateTime;
    type Result<'data> = Integer;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        Ok(Integer::from(i64::from(value.month())))
    }
}
