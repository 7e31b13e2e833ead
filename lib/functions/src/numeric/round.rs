use crate::{SparqlOp, UnarySparqlOp};
use rdf_algebra_model::{EvalError, EvalResult, Numeric};

#[derive(Debug)]
pub struct RoundSparqlOp;

impl Default for RoundSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for RoundSparqlOp {
    fn name(&self) -> &str {
        "round"
    }
}

impl UnarySparqlOp for RoundSparqlOp {
    type Arg<'data> = Numeric;
    type Result<'data> = Numeric;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        match value {
            Numeric::Decimal(value) => value.checked_round().map(Numeric::Decimal),
            Numeric::Float(value) => Some(Numeric::Float(value.round())),
            Numeric::Double(value) => Some(Numeric::Double(value.round())),
            Numeric::Integer(_) => Some(value),
        }
        .ok_or(EvalError::Overflow)
    }
}
