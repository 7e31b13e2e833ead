use crate::{
    BlankNodeIdParseError, DateTimeOverflowError, IriParseError, LanguageTagParseError,
    OppositeSignInDurationComponentsError, ParseDateTimeError, ParseDecimalError,
    ParseDurationError, TooLargeForDecimalError, TooLargeForIntegerError, Variable,
};
use std::num::{ParseFloatError, ParseIntError, TryFromIntError};
use std::str::ParseBoolError;
use std::string::FromUtf8Error;
use thiserror::Error;

/// The result of evaluating an expression against a single solution.
pub type EvalResult<T> = Result<T, EvalError>;

/// An *expected* failure during the evaluation of an expression.
///
/// Evaluation errors are scoped to the solution that is currently evaluated. Operators like
/// `FILTER`, `BIND` or `COALESCE` neutralize them, while other places turn them into a fatal
/// query error. Most variants do not carry a reason, as all type errors are treated equally by the
/// evaluation rules.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    /// An operand had the wrong type or an invalid lexical form.
    #[error("An operand had an unexpected type.")]
    TypeError,
    /// A variable that is required by the expression was not bound.
    #[error("The variable {0} is not bound.")]
    Unbound(Variable),
    /// A decimal or integer division by zero.
    #[error("Division by zero.")]
    DivisionByZero,
    /// A numeric operation left the value space of its data type.
    #[error("Numeric overflow.")]
    Overflow,
    /// A function that is not known to the evaluator.
    #[error("The function {0} is not supported.")]
    UnsupportedFunction(String),
    /// An aggregate was applied to an empty group where no result is defined.
    #[error("The aggregate {0} is not defined for an empty group.")]
    EmptyAggregate(&'static str),
}

impl EvalError {
    /// Creates a result with an [EvalError::TypeError].
    pub fn expected<T>() -> EvalResult<T> {
        Err(EvalError::TypeError)
    }
}

macro_rules! implement_from {
    ($t:ty) => {
        impl From<$t> for EvalError {
            fn from(_: $t) -> Self {
                EvalError::TypeError
            }
        }
    };
}

implement_from!(TooLargeForDecimalError);
implement_from!(TooLargeForIntegerError);
implement_from!(ParseBoolError);
implement_from!(ParseIntError);
implement_from!(ParseFloatError);
implement_from!(ParseDecimalError);
implement_from!(ParseDateTimeError);
implement_from!(ParseDurationError);
implement_from!(BlankNodeIdParseError);
implement_from!(IriParseError);
implement_from!(LanguageTagParseError);
implement_from!(TryFromIntError);
implement_from!(DateTimeOverflowError);
implement_from!(OppositeSignInDurationComponentsError);
implement_from!(FromUtf8Error);
