use crate::{SparqlOp, UnarySparqlOp};
use rdf_algebra_model::vocab::xsd;
use rdf_algebra_model::{Boolean, EvalError, EvalResult, Numeric, TypedValueRef};

#[derive(Debug)]
pub struct AsBooleanSparqlOp;

impl Default for AsBooleanSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl AsBooleanSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for AsBooleanSparqlOp {
    fn name(&self) -> &str {
        xsd::BOOLEAN.as_str()
    }
}

impl UnarySparqlOp for AsBooleanSparqlOp {
    type Arg<'data> = TypedValueRef<'data>;
    type Result<'data> = Boolean;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        let converted = match value {
            TypedValueRef::BooleanLiteral(value) => value,
            TypedValueRef::SimpleLiteral(value) => value.trim().parse()?,
            TypedValueRef::NumericLiteral(numeric) => match numeric {
                Numeric::Integer(value) => Boolean::from(value),
                Numeric::Decimal(value) => Boolean::from(value),
                Numeric::Float(value) => Boolean::from(value),
                Numeric::Double(value) => Boolean::from(value),
            },
            _ => return EvalError::expected(),
        };
        Ok(converted)
    }
}
