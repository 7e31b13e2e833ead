use crate::effective_boolean_value;
use rdf_algebra_model::{EvalResult, Term};

/// Combines two operands of `||`.
///
/// An error on one side is masked if the other side is true. If both sides fail, the error of
/// the left-hand side is returned.
pub fn logical_or(lhs: EvalResult<bool>, rhs: EvalResult<bool>) -> EvalResult<bool> {
    match (lhs, rhs) {
        (Ok(true), _) | (_, Ok(true)) => Ok(true),
        (Ok(false), Ok(false)) => Ok(false),
        (Err(error), _) | (_, Err(error)) => Err(error),
    }
}

/// Combines two operands of `&&`.
///
/// An error on one side is masked if the other side is false.
pub fn logical_and(lhs: EvalResult<bool>, rhs: EvalResult<bool>) -> EvalResult<bool> {
    match (lhs, rhs) {
        (Ok(false), _) | (_, Ok(false)) => Ok(false),
        (Ok(true), Ok(true)) => Ok(true),
        (Err(error), _) | (_, Err(error)) => Err(error),
    }
}

pub fn logical_not(value: &Term) -> EvalResult<bool> {
    effective_boolean_value(value).map(|value| !value)
}
