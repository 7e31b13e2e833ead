use crate::{SparqlOp, UnarySparqlOp};
use rdf_algebra_model::vocab::xsd;
use rdf_algebra_model::{DateTime, EvalError, EvalResult, TypedValueRef};

#[derive(Debug)]
pub struct AsDateTimeSparqlOp;

impl Default for AsDateTimeSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl AsDateTimeSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for AsDateTimeSparqlOp {
    fn name(&self) -> &str {
        xsd::DATE_TIME.as_str()
    }
}

impl UnarySparqlOp for AsDateTimeSparqlOp {
    type Arg<'data> = TypedValueRef<'data>;
    type Result<'data> = DateTime;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        let converted = match value {
            TypedValueRef::DateTimeLiteral(value) => value,
            TypedValueRef::DateLiteral(value) => DateTime::try_from(value)?,
            TypedValueRef::SimpleLiteral(value) => value.trim().parse()?,
            _ => return EvalError::expected(),
        };
        Ok(converted)
    }
}
