use crate::{SparqlOp, UnarySparqlOp};
use rdf_algebra_model::{EvalError, EvalResult, Numeric};

#[derive(Debug)]
pub struct FloorSparqlOp;

impl Default for FloorSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl FloorSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for FloorSparqlOp {
    fn name(&self) -> &str {
        "floor"
    }
}

impl UnarySparqlOp for FloorSparqlOp {
    type Arg<'data> = Numeric;
    type Result<'data> = Numeric;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        match value {
            Numeric::Decimal(value) => value.checked_floor().map(Numeric::Decimal),
            Numeric::Float(value) => Some(Numeric::Float(value.floor())),
            Numeric::Double(value) => Some(Numeric::Double(value.floor())),
            Numeric::Integer(_) => Some(value),
        }
        .ok_or(EvalError::Overflow)
    }
}
