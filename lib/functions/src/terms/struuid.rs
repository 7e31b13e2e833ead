use crate::{NullarySparqlOp, SparqlOp};
use rdf_algebra_model::{EvalResult, OwnedStringLiteral};
use uuid::Uuid;

#[derive(Debug)]
pub struct StrUuidSparqlOp;

impl Default for StrUuidSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl StrUuidSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for StrUuidSparqlOp {
    fn name(&self) -> &str {
        "struuid"
    }
}

impl NullarySparqlOp for StrUuidSparqlOp {
    type Result = OwnedStringLiteral;

    fn evaluate(&self) -> EvalResult<Self::Result> {
        let result = Uuid::new_v4().to_string();
        Ok(OwnedStringLiteral(result, None))
    }
}
