use rdf_algebra_model::{EvalError, EvalResult, Term};

/// Returns the first operand that evaluates without an error.
///
/// The operands are evaluated lazily. If every operand fails, the result is a type error.
pub fn coalesce(values: impl IntoIterator<Item = EvalResult<Term>>) -> EvalResult<Term> {
    values
        .into_iter()
        .find_map(Result::ok)
        .ok_or(EvalError::TypeError)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdf_algebra_model::{Literal, Variable};

    #[test]
    fn skips_errors() {
        let result = coalesce([
            Err(EvalError::Unbound(Variable::new_unchecked("x"))),
            Ok(Term::from(Literal::from(2))),
            Ok(Term::from(Literal::from(3))),
        ]);
        assert_eq!(result, Ok(Literal::from(2).into()));
    }

    #[test]
    fn all_errors() {
        assert_eq!(coalesce(Vec::new()), Err(EvalError::TypeError));
    }
}
