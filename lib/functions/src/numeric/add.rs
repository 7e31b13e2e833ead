use crate::{BinarySparqlOp, SparqlOp};
use rdf_algebra_model::{EvalError, EvalResult, Numeric, NumericPair};

#[derive(Debug)]
pub struct AddSparqlOp;

impl Default for AddSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl AddSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for AddSparqlOp {
    fn name(&self) -> &str {
        "+"
    }
}

impl BinarySparqlOp for AddSparqlOp {
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
                .checked_add(rhs)
                .map(Numeric::Integer)
                .ok_or(EvalError::Overflow),
            NumericPair::Decimal(lhs, rhs) => lhs
                .checked_add(rhs)
                .map(Numeric::Decimal)
                .ok_or(EvalError::Overflow),
            NumericPair::Float(lhs, rhs) => Ok(Numeric::Float(lhs + rhs)),
            NumericPair::Double(lhs, rhs) => Ok(Numeric::Double(lhs + rhs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate_binary;
    use rdf_algebra_model::vocab::xsd;
    use rdf_algebra_model::{Literal, Term};

    #[test]
    fn integer_plus_decimal_is_decimal() {
        let result = evaluate_binary(
            &AddSparqlOp::new(),
            &Literal::from(1).into(),
            &Literal::new_typed_literal("1.5", xsd::DECIMAL).into(),
        );
        assert_eq!(
            result,
            Ok(Literal::new_typed_literal("2.5", xsd::DECIMAL).into())
        );
    }

    #[test]
    fn integer_overflow_is_an_error() {
        let result = evaluate_binary(
            &AddSparqlOp::new(),
            &Literal::from(i64::MAX).into(),
            &Literal::from(1).into(),
        );
        assert_eq!(result, Err(EvalError::Overflow));
    }

    #[test]
    fn non_numeric_operand_is_a_type_error() {
        let result = evaluate_binary(
            &AddSparqlOp::new(),
            &Literal::from(1).into(),
            &Term::from(Literal::new_simple_literal("1")),
        );
        assert_eq!(result, Err(EvalError::TypeError));
    }
}
