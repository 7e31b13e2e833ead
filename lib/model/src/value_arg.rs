use crate::{
    BlankNodeRef, Boolean, Date, DateTime, DayTimeDuration, EvalError, EvalResult, Integer,
    NamedNodeRef, Numeric, StringLiteralRef, Term, TermRef, Time, Triple, TypedValueRef,
};

/// Converts the value of an operand into the argument type of a function.
///
/// A failed conversion is a type error of the function call.
pub trait RdfValueArg<'data>: Copy {
    fn try_from_value(value: TypedValueRef<'data>) -> EvalResult<Self>;

    fn try_from_term(term: &'data Term) -> EvalResult<Self> {
        Self::try_from_value(TypedValueRef::from_term(term))
    }
}

/// A simple literal (`xsd:string` without a language tag).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SimpleLiteralRef<'data>(pub &'data str);

impl<'data> RdfValueArg<'data> for TypedValueRef<'data> {
    fn try_from_value(value: TypedValueRef<'data>) -> EvalResult<Self> {
        Ok(value)
    }
}

/// The term as it is, including the lexical form of literals.
impl<'data> RdfValueArg<'data> for TermRef<'data> {
    fn try_from_value(value: TypedValueRef<'data>) -> EvalResult<Self> {
        match value {
            TypedValueRef::NamedNode(inner) => Ok(TermRef::NamedNode(inner)),
            TypedValueRef::BlankNode(inner) => Ok(TermRef::BlankNode(inner)),
            TypedValueRef::Triple(inner) => Ok(TermRef::Triple(inner)),
            TypedValueRef::OtherLiteral(inner) => Ok(TermRef::Literal(inner)),
            _ => EvalError::expected(),
        }
    }

    fn try_from_term(term: &'data Term) -> EvalResult<Self> {
        Ok(term.as_ref())
    }
}

impl<'data> RdfValueArg<'data> for NamedNodeRef<'data> {
    fn try_from_value(value: TypedValueRef<'data>) -> EvalResult<Self> {
        match value {
            TypedValueRef::NamedNode(inner) => Ok(inner),
            _ => EvalError::expected(),
        }
    }
}

impl<'data> RdfValueArg<'data> for BlankNodeRef<'data> {
    fn try_from_value(value: TypedValueRef<'data>) -> EvalResult<Self> {
        match value {
            TypedValueRef::BlankNode(inner) => Ok(inner),
            _ => EvalError::expected(),
        }
    }
}

impl<'data> RdfValueArg<'data> for &'data Triple {
    fn try_from_value(value: TypedValueRef<'data>) -> EvalResult<Self> {
        match value {
            TypedValueRef::Triple(inner) => Ok(inner),
            _ => EvalError::expected(),
        }
    }
}

impl RdfValueArg<'_> for Boolean {
    fn try_from_value(value: TypedValueRef<'_>) -> EvalResult<Self> {
        match value {
            TypedValueRef::BooleanLiteral(inner) => Ok(inner),
            _ => EvalError::expected(),
        }
    }
}

impl RdfValueArg<'_> for Integer {
    fn try_from_value(value: TypedValueRef<'_>) -> EvalResult<Self> {
        match value {
            TypedValueRef::NumericLiteral(Numeric::Integer(inner)) => Ok(inner),
            _ => EvalError::expected(),
        }
    }
}

impl RdfValueArg<'_> for Numeric {
    fn try_from_value(value: TypedValueRef<'_>) -> EvalResult<Self> {
        match value {
            TypedValueRef::NumericLiteral(inner) => Ok(inner),
            _ => EvalError::expected(),
        }
    }
}

impl<'data> RdfValueArg<'data> for SimpleLiteralRef<'data> {
    fn try_from_value(value: TypedValueRef<'data>) -> EvalResult<Self> {
        match value {
            TypedValueRef::SimpleLiteral(inner) => Ok(SimpleLiteralRef(inner)),
            _ => EvalError::expected(),
        }
    }
}

impl<'data> RdfValueArg<'data> for StringLiteralRef<'data> {
    fn try_from_value(value: TypedValueRef<'data>) -> EvalResult<Self> {
        value.as_string_literal().ok_or(EvalError::TypeError)
    }
}

impl RdfValueArg<'_> for DateTime {
    fn try_from_value(value: TypedValueRef<'_>) -> EvalResult<Self> {
        match value {
            TypedValueRef::DateTimeLiteral(inner) => Ok(inner),
            _ => EvalError::expected(),
        }
    }
}

impl RdfValueArg<'_> for Date {
    fn try_from_value(value: TypedValueRef<'_>) -> EvalResult<Self> {
        match value {
            TypedValueRef::DateLiteral(inner) => Ok(inner),
            _ => EvalError::expected(),
        }
    }
}

impl RdfValueArg<'_> for Time {
    fn try_from_value(value: TypedValueRef<'_>) -> EvalResult<Self> {
        match value {
            TypedValueRef::TimeLiteral(inner) => Ok(inner),
            _ => EvalError::expected(),
        }
    }
}

impl RdfValueArg<'_> for DayTimeDuration {
    fn try_from_value(value: TypedValueRef<'_>) -> EvalResult<Self> {
        match value {
            TypedValueRef::DayTimeDurationLiteral(inner) => Ok(inner),
            _ => EvalError::expected(),
        }
    }
}
