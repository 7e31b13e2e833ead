use crate::{SparqlOp, UnarySparqlOp};
use rdf_algebra_model::vocab::xsd;
use rdf_algebra_model::{EvalError, EvalResult, Integer, Numeric, TypedValueRef};

#[derive(Debug)]
pub struct AsIntegerSparqlOp;

impl Default for AsIntegerSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl AsIntegerSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for AsIntegerSparqlOp {
    fn name(&self) -> &str {
        xsd::INTEGER.as_str()
    }
}

impl UnarySparqlOp for AsIntegerSparqlOp {
    type Arg<'data> = TypedValueRef<'data>;
    type Result<'data> = Integer;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        let converted = match value {
            TypedValueRef::BooleanLiteral(value) => Integer::from(value),
            TypedValueRef::SimpleLiteral(value) => value.trim().parse()?,
            TypedValueRef::NumericLiteral(numeric) => match numeric {
                Numeric::Integer(value) => value,
                Numeric::Decimal(value) => Integer::try_from(value)?,
                Numeric::Float(value) => Integer::try_from(value)?,
                Numeric::Double(value) => Integer::try_from(value)?,
            },
            _ => return EvalError::expected(),
        };
        Ok(converted)
    }
}
