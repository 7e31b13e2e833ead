use crate::{SparqlOp, UnarySparqlOp};
use rdf_algebra_model::{DateTime, DayTimeDuration, EvalError, EvalResult};

#[derive(Debug)]
pub struct TimezoneSparqlOp;

impl Default for TimezoneSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl TimezoneSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for TimezoneSparqlOp {
    fn name(&self) -> &str {
        "timezone"
    }
}

impl UnarySparqlOp for TimezoneSparqlOp {
    type Arg<'data> = DateTime;
    type Result<'data> = DayTimeDuration;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        value.timezone().ok_or(EvalError::TypeError)
    }
}
