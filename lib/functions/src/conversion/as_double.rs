use crate::{SparqlOp, UnarySparqlOp};
use rdf_algebra_model::vocab::xsd;
use rdf_algebra_model::{Double, EvalError, EvalResult, Numeric, TypedValueRef};

#[derive(Debug)]
pub struct AsDoubleSparqlOp;

impl Default for AsDoubleSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl AsDoubleSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for AsDoubleSparqlOp {
    fn name(&self) -> &str {
        xsd::DOUBLE.as_str()
    }
}

impl UnarySparqlOp for AsDoubleSparqlOp {
    type Arg<'data> = TypedValueRef<'data>;
    type Result<'data> = Double;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        let converted = match value {
            TypedValueRef::BooleanLiteral(value) => Double::from(value),
            TypedValueRef::SimpleLiteral(value) => value.trim().parse()?,
            TypedValueRef::NumericLiteral(numeric) => match numeric {
                Numeric::Integer(value) => Double::from(value),
                Numeric::Decimal(value) => Double::from(value),
                Numeric::Float(value) => Double::from(value),
                Numeric::Double(value) => value,
            },
            _ => return EvalError::expected(),
        };
        Ok(converted)
    }
}
