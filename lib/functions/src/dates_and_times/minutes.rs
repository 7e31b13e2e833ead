use crate::{SparqlOp, UnarySparqlOp};
use rdf_algebra_model::{DateTime, EvalResult, Integer};

#[derive(Debug)]
pub struct MinutesSparqlOp;

impl Default for MinutesSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl MinutesSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for MinutesSparqlOp {
    fn name(&self) -> &str {
        "minutes"
    }
}

impl UnarySparqlOp for MinutesSparqlOp {
    type Arg<'data> = DateTime;
    type Result<'data> = Integer;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        Ok(Integer::from(i64::from(value.minute())))
    }
}
