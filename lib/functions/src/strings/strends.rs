use crate::{BinarySparqlOp, SparqlOp};
use rdf_algebra_model::{Boolean, CompatibleStringArgs, EvalResult, StringLiteralRef};

#[derive(Debug)]
pub struct StrEndsSparqlOp;

impl Default for StrEndsSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl StrEndsSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for StrEndsSparqlOp {
    fn name(&self) -> &str {
        "strends"
    }
}

impl BinarySparqlOp for StrEndsSparqlOp {
    type ArgLhs<'data> = StringLiteralRef<'data>;
    type ArgRhs<'data> = StringLiteralRef<'data>;
    type Result<'data> = Boolean;

    fn evaluate<'data>(
        &self,
        lhs: Self::ArgLhs<'data>,
        rhs: Self::ArgRhs<'data>,
    ) -> EvalResult<Self::Result<'data>> {
        let args = CompatibleStringArgs::try_from(lhs, rhs)?;
        Ok(args.lhs.ends_with(args.rhs).into())
    }
}
