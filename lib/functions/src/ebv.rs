use rdf_algebra_model::vocab::xsd;
use rdf_algebra_model::xsd::is_numeric_datatype;
use rdf_algebra_model::{EvalError, EvalResult, Term, TypedValueRef};

/// Computes the effective boolean value of a term.
///
/// Numeric values are true unless they are zero or `NaN`, strings are true unless they are empty,
/// and booleans are passed through. Boolean or numeric literals with an invalid lexical form are
/// false. Every other term raises a type error.
///
/// Relevant Resources:
/// - [SPARQL 1.1 - Effective Boolean Value](https://www.w3.org/TR/sparql11-query/#ebv)
pub fn effective_boolean_value(term: &Term) -> EvalResult<bool> {
    match TypedValueRef::from_term(term) {
        TypedValueRef::BooleanLiteral(value) => Ok(value.into()),
        TypedValueRef::NumericLiteral(value) => Ok(!value.is_zero_or_nan()),
        TypedValueRef::SimpleLiteral(value) => Ok(!value.is_empty()),
        TypedValueRef::LanguageStringLiteral { value, .. } => Ok(!value.is_empty()),
        TypedValueRef::OtherLiteral(literal)
            if literal.datatype() == xsd::BOOLEAN || is_numeric_datatype(literal.datatype()) =>
        {
            Ok(false)
        }
        _ => EvalError::expected(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdf_algebra_model::{Literal, NamedNode};

    fn ebv(term: impl Into<Term>) -> EvalResult<bool> {
        effective_boolean_value(&term.into())
    }

    #[test]
    fn numbers() {
        assert_eq!(ebv(Literal::from(0)), Ok(false));
        assert_eq!(ebv(Literal::from(-2)), Ok(true));
        assert_eq!(ebv(Literal::from(f64::NAN)), Ok(false));
        assert_eq!(ebv(Literal::new_typed_literal("0.0", xsd::DECIMAL)), Ok(false));
    }

    #[test]
    fn strings() {
        assert_eq!(ebv(Literal::new_simple_literal("")), Ok(false));
        assert_eq!(ebv(Literal::new_simple_literal("false")), Ok(true));
    }

    #[test]
    fn invalid_lexical_forms_are_false() {
        assert_eq!(ebv(Literal::new_typed_literal("abc", xsd::INTEGER)), Ok(false));
        assert_eq!(ebv(Literal::new_typed_literal("yes", xsd::BOOLEAN)), Ok(false));
    }

    #[test]
    fn iris_are_type_errors() {
        assert_eq!(
            ebv(NamedNode::new_unchecked("http://example.com/")),
            Err(EvalError::TypeError)
        );
        assert_eq!(
            ebv(Literal::new_typed_literal("2020-01-01", xsd::DATE)),
            Err(EvalError::TypeError)
        );
    }
}
