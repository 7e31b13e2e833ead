use crate::{SparqlOp, UnarySparqlOp};
use rdf_algebra_model::{EvalError, EvalResult, SimpleLiteralRef, TermRef};

#[derive(Debug)]
pub struct LangSparqlOp;

impl Default for LangSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl LangSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for LangSparqlOp {
    fn name(&self) -> &str {
        "lang"
    }
}

impl UnarySparqlOp for LangSparqlOp {
    type Arg<'data> = TermRef<'data>;
    type Result<'data> = SimpleLiteralRef<'data>;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        match value {
            TermRef::Literal(literal) => Ok(SimpleLiteralRef(literal.language().unwrap_or(""))),
            _ => EvalError::expected(),
        }
    }
}
