use crate::{SparqlOp, UnarySparqlOp};
use rdf_algebra_model::{Boolean, EvalResult, TypedValueRef};

#[derive(Debug)]
pub struct IsNumericSparqlOp;

impl Default for IsNumericSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl IsNumericSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for IsNumericSparqlOp {
    fn name(&self) -> &str {
        "isNumeric"
    }
}

impl UnarySparqlOp for IsNumericSparqlOp {
    type Arg<'data> = TypedValueRef<'data>;
    type Result<'data> = Boolean;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        Ok(matches!(value, TypedValueRef::NumericLiteral(_)).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate_unary;
    use rdf_algebra_model::vocab::xsd;
    use rdf_algebra_model::Literal;

    #[test]
    fn ill_typed_numbers_are_not_numeric() {
        let op = IsNumericSparqlOp::new();
        assert_eq!(
            evaluate_unary(&op, &Literal::new_typed_literal("1", xsd::BYTE).into()),
            Ok(Literal::from(true).into())
        );
        assert_eq!(
            evaluate_unary(&op, &Literal::new_typed_literal("1.5", xsd::INTEGER).into()),
            Ok(Literal::from(false).into())
        );
    }
}
