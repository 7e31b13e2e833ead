use crate::{BinarySparqlOp, SparqlOp};
use rdf_algebra_model::{EvalError, EvalResult, Numeric, NumericPair};

#[derive(Debug)]
pub struct MulSparqlOp;

impl Default for MulSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl MulSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for MulSparqlOp {
    fn name(&self) -> &str {
        "*"
    }
}

impl BinarySparqlOp for MulSparqlOp {
    type ArgLhs<'data> = Numeric;
    type ArgRhs<'data> = Numeric;
    type Result<'data> = Numeric;

    fn evaluate<'data>(
        &self,
        lhs: Self::ArgLhs<'data>,
        rhs: Self::ArgRhs<'data>,
    ) -> EvalResult<Self::Result<'data>> {
        match NumericPair::with_casts_from(lhs, rhs) {
            NumericPair::Integer(lhs, rhs) => lhs
                .checked_mul(rhs)
                .map(Numeric::Integer)
                .ok_or(EvalError::Overflow),
            NumericPair::Decimal(lhs, rhs) => lhs
                .checked_mul(rhs)
                .map(Numeric::Decimal)
                .ok_or(EvalError::Overflow),
            NumericPair::Float(lhs, rhs) => Ok(Numeric::Float(lhs * rhs)),
            NumericPair::Double(lhs, rhs) => Ok(Numeric::Double(lhs * rhs)),
        }
    }
}
