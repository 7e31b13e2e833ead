use crate::{SparqlOp, UnarySparqlOp};
use rdf_algebra_model::{EvalResult, OwnedStringLiteral, StringLiteralRef};

#[derive(Debug)]
pub struct LCaseSparqlOp;

impl Default for LCaseSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl LCaseSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for LCaseSparqlOp {
    fn name(&self) -> &str {
        "lcase"
    }
}

impl UnarySparqlOp for LCaseSparqlOp {
    type Arg<'data> = StringLiteralRef<'data>;
    type Result<'data> = OwnedStringLiteral;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        Ok(OwnedStringLiteral(
            value.0.to_lowercase(),
            value.1.map(ToOwned::to_owned),
        ))
    }
}
