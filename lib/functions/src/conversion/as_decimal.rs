use crate::{SparqlOp, UnarySparqlOp};
use rdf_algebra_model::vocab::xsd;
use rdf_algebra_model::{Decimal, EvalError, EvalResult, Numeric, TypedValueRef};

#[derive(Debug)]
pub struct AsDecimalSparqlOp;

impl Default for AsDecimalSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl AsDecimalSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for AsDecimalSparqlOp {
    fn name(&self) -> &str {
        xsd::DECIMAL.as_str()
    }
}

impl UnarySparqlOp for AsDecimalSparqlOp {
    type Arg<'data> = TypedValueRef<'data>;
    type Result<'data> = Decimal;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        let converted = match value {
            TypedValueRef::BooleanLiteral(value) => Decimal::from(value),
            TypedValueRef::SimpleLiteral(value) => value.trim().parse()?,
            TypedValueRef::NumericLiteral(numeric) => match numeric {
                Numeric::Integer(value) => Decimal::from(value),
                Numeric::Decimal(value) => value,
                Numeric::Float(value) => Decimal::try_from(value)?,
                Numeric::Double(value) => Decimal::try_from(value)?,
            },
            _ => return EvalError::expected(),
        };
        Ok(converted)
    }
}
