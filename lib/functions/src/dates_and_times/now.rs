use crate::{NullarySparqlOp, SparqlOp};
use rdf_algebra_model::{DateTime, EvalResult};

/// `NOW()` returns the same instant for every call within one execution.
#[derive(Debug)]
pub struct NowSparqlOp {
    now: DateTime,
}

impl NowSparqlOp {
    pub fn new(now: DateTime) -> Self {
        Self { now }
    }
}

impl SparqlOp for NowSparqlOp {
    fn name(&self) -> &str {
        "now"
    }
}

impl NullarySparqlOp for NowSparqlOp {
    type Result = DateTime;

    fn evaluate(&self) -> EvalResult<Self::Result> {
        Ok(self.now)
    }
}
