use crate::{SparqlOp, UnarySparqlOp};
use rdf_algebra_model::{EvalError, EvalResult, Numeric};

#[derive(Debug)]
pub struct AbsSparqlOp;

impl Default for AbsSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl AbsSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for AbsSparqlOp {
    fn name(&self) -> &str {
        "abs"
    }
}

impl UnarySparqlOp for AbsSparqlOp {
    type Arg<'data> = Numeric;
    type Result<'data> = Numeric;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        match value {
            Numeric::Integer(value) => value.checked_abs().map(Numeric::Integer),
            Numeric::Decimal(value) => value.checked_abs().map(Numeric::Decimal),
            Numeric::Float(value) => Some(Numeric::Float(value.abs())),
            Numeric::Double(value) => Some(Numeric::Double(value.abs())),
        }
        .ok_or(EvalError::Overflow)
    }
}
