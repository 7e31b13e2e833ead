use crate::{BinarySparqlOp, SparqlOp};
use rdf_algebra_model::{Decimal, Double, EvalError, EvalResult, Float, Numeric, NumericPair};

/// The `/` operator.
///
/// Dividing two integers yields a decimal. Dividing a decimal or an integer by zero is an
/// error, while a floating point division by zero yields `NaN`.
#[derive(Debug)]
pub struct DivSparqlOp;

impl Default for DivSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl DivSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for DivSparqlOp {
    fn name(&self) -> &str {
        "/"
    }
}

impl BinarySparqlOp for DivSparqlOp {
    type ArgLhs<'data> = Numeric;
    type ArgRhs<'data> = Numeric;
    type Result<'data> = Numeric;

    fn evaluate<'data>(
        &self,
        lhs: Self::ArgLhs<'data>,
        rhs: Self::ArgRhs<'data>,
    ) -> EvalResult<Self::Result<'data>> {
        match NumericPair::with_casts_from(lhs, rhs) {
            NumericPair::Integer(lhs, rhs) => divide_decimals(Decimal::from(lhs), Decimal::from(rhs)),
            NumericPair::Decimal(lhs, rhs) => divide_decimals(lhs, rhs),
            NumericPair::Float(lhs, rhs) => Ok(Numeric::Float(if f32::from(rhs) == 0.0 {
                Float::from(f32::NAN)
            } else {
                lhs / rhs
            })),
            NumericPair::Double(lhs, rhs) => Ok(Numeric::Double(if f64::from(rhs) == 0.0 {
                Double::from(f64::NAN)
            } else {
                lhs / rhs
            })),
        }
    }
}

fn divide_decimals(lhs: Decimal, rhs: Decimal) -> EvalResult<Numeric> {
    if rhs == Decimal::from(0) {
        return Err(EvalError::DivisionByZero);
    }
    lhs.checked_div(rhs)
        .map(Numeric::Decimal)
        .ok_or(EvalError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate_binary;
    use rdf_algebra_model::vocab::xsd;
    use rdf_algebra_model::{Literal, Term, TypedValueRef};

    fn divide(lhs: impl Into<Term>, rhs: impl Into<Term>) -> EvalResult<Term> {
        evaluate_binary(&DivSparqlOp::new(), &lhs.into(), &rhs.into())
    }

    #[test]
    fn integer_division_promotes_to_decimal() {
        assert_eq!(
            divide(Literal::from(1), Literal::from(2)),
            Ok(Literal::new_typed_literal("0.5", xsd::DECIMAL).into())
        );
    }

    #[test]
    fn integer_division_by_zero_is_an_error() {
        assert_eq!(
            divide(Literal::from(1), Literal::from(0)),
            Err(EvalError::DivisionByZero)
        );
        assert_eq!(
            divide(
                Literal::from(1),
                Literal::new_typed_literal("0.0", xsd::DECIMAL)
            ),
            Err(EvalError::DivisionByZero)
        );
    }

    #[test]
    fn double_division_by_zero_is_nan() {
        let result = divide(
            Literal::from(1),
            Literal::new_typed_literal("0.0", xsd::DOUBLE),
        )
        .unwrap();
        assert!(matches!(
            TypedValueRef::from_term(&result),
            TypedValueRef::NumericLiteral(Numeric::Double(value)) if f64::from(value).is_nan()
        ));
    }
}
