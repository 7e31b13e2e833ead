use crate::{SparqlOp, UnarySparqlOp};
use rdf_algebra_model::vocab::xsd;
use rdf_algebra_model::{EvalError, EvalResult, SimpleLiteralRef, TermRef};

#[derive(Debug)]
pub struct AsStringSparqlOp;

impl Default for AsStringSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl AsStringSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for AsStringSparqlOp {
    fn name(&self) -> &str {
        xsd::STRING.as_str()
    }
}

impl UnarySparqlOp for AsStringSparqlOp {
    type Arg<'data> = TermRef<'data>;
    type Result<'data> = SimpleLiteralRef<'data>;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        match value {
            TermRef::NamedNode(value) => Ok(SimpleLiteralRef(value.as_str())),
            TermRef::Literal(literal) => Ok(SimpleLiteralRef(literal.value())),
            TermRef::BlankNode(_) | TermRef::Triple(_) => EvalError::expected(),
        }
    }
}
