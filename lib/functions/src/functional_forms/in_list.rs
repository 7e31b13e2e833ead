use crate::comparison::sparql_equals;
use rdf_algebra_model::{EvalResult, Term, TypedValueRef};

/// Evaluates `value IN (list...)`.
///
/// A match wins over errors. Without a match, the first error of the list (or of a comparison)
/// is returned, and `false` otherwise.
pub fn in_list(value: &Term, list: impl IntoIterator<Item = EvalResult<Term>>) -> EvalResult<bool> {
    let mut error = None;
    for candidate in list {
        match candidate.and_then(|candidate| {
            sparql_equals(
                TypedValueRef::from_term(value),
                TypedValueRef::from_term(&candidate),
            )
        }) {
            Ok(true) => return Ok(true),
            Ok(false) => {}
            Err(err) => {
                error.get_or_insert(err);
            }
        }
    }
    match error {
        Some(error) => Err(error),
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdf_algebra_model::vocab::xsd;
    use rdf_algebra_model::{EvalError, Literal};

    fn int(value: i64) -> EvalResult<Term> {
        Ok(Literal::from(value).into())
    }

    #[test]
    fn numeric_values_match_across_types() {
        let value = Term::from(Literal::from(1));
        let list: [EvalResult<Term>; 1] =
            [Ok(Literal::new_typed_literal("1.0", xsd::DECIMAL).into())];
        assert_eq!(in_list(&value, list), Ok(true));
    }

    #[test]
    fn match_masks_errors() {
        let value = Term::from(Literal::from(1));
        let list = [Err(EvalError::TypeError), int(1)];
        assert_eq!(in_list(&value, list), Ok(true));
    }

    #[test]
    fn error_without_match() {
        let value = Term::from(Literal::from(1));
        let list = [Err(EvalError::TypeError), int(2)];
        assert_eq!(in_list(&value, list), Err(EvalError::TypeError));
        assert_eq!(in_list(&value, Vec::new()), Ok(false));
    }
}
