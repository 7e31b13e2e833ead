use crate::{SparqlOp, UnarySparqlOp};
use rdf_algebra_model::vocab::xsd;
use rdf_algebra_model::{EvalError, EvalResult, Float, Numeric, TypedValueRef};

#[derive(Debug)]
pub struct AsFloatSparqlOp;

impl Default for AsFloatSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl AsFloatSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for AsFloatSparqlOp {
    fn name(&self) -> &str {
        xsd::FLOAT.as_str()
    }
}

impl UnarySparqlOp for AsFloatSparqlOp {
    type Arg<'data> = TypedValueRef<'data>;
    type Result<'data> = Float;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        let converted = match value {
            TypedValueRef::BooleanLiteral(value) => Float::from(value),
            TypedValueRef::SimpleLiteral(value) => value.trim().parse()?,
            TypedValueRef::NumericLiteral(numeric) => match numeric {
                Numeric::Integer(value) => Float::from(value),
                Numeric::Decimal(value) => Float::from(value),
                Numeric::Float(value) => value,
                Numeric::Double(value) => Float::from(value),
            },
            _ => return EvalError::expected(),
        };
        Ok(converted)
    }
}
