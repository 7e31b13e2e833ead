use crate::{SparqlOp, UnarySparqlOp};
use rdf_algebra_model::{EvalError, EvalResult, Numeric};

#[derive(Debug)]
pub struct CeilSparqlOp;

impl Default for CeilSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl CeilSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for CeilSparqlOp {
    fn name(&self) -> &str {
        "ceil"
    }
}

impl UnarySparqlOp for CeilSparqlOp {
    type Arg<'data> = Numeric;
    type Result<'data> = Numeric;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        match value {
            Numeric::Decimal(value) => value.checked_ceil().map(Numeric::Decimal),
            Numeric::Float(value) => Some(Numeric::Float(value.ceil())),
            Numeric::Double(value) => Some(Numeric::Double(value.ceil())),
            Numeric::Integer(_) => Some(value),
        }
        .ok_or(EvalError::Overflow)
    }
}
