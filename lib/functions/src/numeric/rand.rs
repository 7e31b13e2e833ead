use crate::{NullarySparqlOp, SparqlOp};
use rand::random;
use rdf_algebra_model::{Double, EvalResult};

/// Returns a pseudo-random number in `[0, 1)`.
#[derive(Debug)]
pub struct RandSparqlOp;

impl Default for RandSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl RandSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for RandSparqlOp {
    fn name(&self) -> &str {
        "rand"
    }
}

impl NullarySparqlOp for RandSparqlOp {
    type Result = Double;

    fn evaluate(&self) -> EvalResult<Self::Result> {
        Ok(random::<f64>().into())
    }
}
