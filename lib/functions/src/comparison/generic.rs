use crate::{BinarySparqlOp, SparqlOp};
use rdf_algebra_model::{Boolean, EvalError, EvalResult, TypedValueRef};
use std::cmp::Ordering;

macro_rules! create_binary_cmp_op {
    ($STRUCT: ident, $NAME: expr, $ORDERINGS: expr) => {
        #[derive(Debug)]
        pub struct $STRUCT;

        impl Default for $STRUCT {
            fn default() -> Self {
                Self::new()
            }
        }

        impl $STRUCT {
            pub fn new() -> Self {
                Self {}
            }
        }

        impl SparqlOp for $STRUCT {
            fn name(&self) -> &str {
                $NAME
            }
        }

        impl BinarySparqlOp for $STRUCT {
            type ArgLhs<'data> = TypedValueRef<'data>;
            type ArgRhs<'data> = TypedValueRef<'data>;
            type Result<'data> = Boolean;

            fn evaluate<'data>(
                &self,
                lhs: Self::ArgLhs<'data>,
                rhs: Self::ArgRhs<'data>,
            ) -> EvalResult<Self::Result<'data>> {
                lhs.partial_cmp_values(&rhs)
                    .map(|o| $ORDERINGS.contains(&o))
                    .map(Into::into)
                    .ok_or(EvalError::TypeError)
            }
        }
    };
}

create_binary_cmp_op!(GreaterThanSparqlOp, ">", [Ordering::Greater]);
create_binary_cmp_op!(
    GreaterOrEqualSparqlOp,
    ">=",
    [Ordering::Equal, Ordering::Greater]
);
create_binary_cmp_op!(LessThanSparqlOp, "<", [Ordering::Less]);
create_binary_cmp_op!(LessOrEqualSparqlOp, "<=", [Ordering::Less, Ordering::Equal]);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate_binary;
    use rdf_algebra_model::vocab::xsd;
    use rdf_algebra_model::{Literal, NamedNode, Term};

    #[test]
    fn less_than_integer_with_float() {
        let result = evaluate_binary(
            &LessThanSparqlOp::new(),
            &Literal::from(5).into(),
            &Literal::from(10.0_f32).into(),
        );
        assert_eq!(result, Ok(Literal::from(true).into()));
    }

    #[test]
    fn less_or_equal_dates() {
        let a = Term::from(Literal::new_typed_literal("2020-01-01", xsd::DATE));
        let result = evaluate_binary(&LessOrEqualSparqlOp::new(), &a, &a);
        assert_eq!(result, Ok(Literal::from(true).into()));
    }

    #[test]
    fn incomparable_operands_raise_errors() {
        let number = Term::from(Literal::from(1));
        let string = Term::from(Literal::new_simple_literal("1"));
        let iri = Term::from(NamedNode::new_unchecked("http://example.com/"));
        assert_eq!(
            evaluate_binary(&GreaterThanSparqlOp::new(), &number, &string),
            Err(EvalError::TypeError)
        );
        assert_eq!(
            evaluate_binary(&GreaterThanSparqlOp::new(), &iri, &iri),
            Err(EvalError::TypeError)
        );
    }
}
