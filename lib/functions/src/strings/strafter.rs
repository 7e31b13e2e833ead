use crate::{BinarySparqlOp, SparqlOp};
use rdf_algebra_model::{CompatibleStringArgs, EvalResult, StringLiteralRef};

#[derive(Debug)]
pub struct StrAfterSparqlOp;

impl Default for StrAfterSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl StrAfterSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for StrAfterSparqlOp {
    fn name(&self) -> &str {
        "strafter"
    }
}

impl BinarySparqlOp for StrAfterSparqlOp {
    type ArgLhs<'data> = StringLiteralRef<'data>;
    type ArgRhs<'data> = StringLiteralRef<'data>;
    type Result<'data> = StringLiteralRef<'data>;

    fn evaluate<'data>(
        &self,
        lhs: Self::ArgLhs<'data>,
        rhs: Self::ArgRhs<'data>,
    ) -> EvalResult<Self::Result<'data>> {
        let args = CompatibleStringArgs::try_from(lhs, rhs)?;
        match args.lhs.find(args.rhs) {
            Some(position) => Ok(StringLiteralRef(
                &args.lhs[position + args.rhs.len()..],
                args.language,
            )),
            None => Ok(StringLiteralRef("", None)),
        }
    }
}
