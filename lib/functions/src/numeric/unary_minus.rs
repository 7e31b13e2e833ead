use crate::{SparqlOp, UnarySparqlOp};
use rdf_algebra_model::{EvalError, EvalResult, Numeric};

#[derive(Debug)]
pub struct UnaryMinusSparqlOp;

impl Default for UnaryMinusSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl UnaryMinusSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for UnaryMinusSparqlOp {
    fn name(&self) -> &str {
        "unary-"
    }
}

impl UnarySparqlOp for UnaryMinusSparqlOp {
    type Arg<'data> = Numeric;
    type Result<'data> = Numeric;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        match value {
            Numeric::Integer(value) => value.checked_neg().map(Numeric::Integer),
            Numeric::Decimal(value) => value.checked_neg().map(Numeric::Decimal),
            Numeric::Float(value) => Some(Numeric::Float(-value)),
            Numeric::Double(value) => Some(Numeric::Double(-value)),
        }
        .ok_or(EvalError::Overflow)
    }
}
