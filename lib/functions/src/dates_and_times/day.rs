use crate::{SparqlOp, UnarySparqlOp};
use rdf_algebra_model::{DateTime, EvalResult, Integer};

#[derive(Debug)]
pub struct DaySparqlOp;

impl Default for DaySparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl DaySparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for DaySparqlOp {
    fn name(&self) -> &str {
        "day"
    }
}

impl UnarySparqlOp for DaySparqlOp {
    type Arg<'data> = DateTime;
    type Result<'data> = Integer;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        Ok(Integer::from(i64::from(value.day())))
    }
}
