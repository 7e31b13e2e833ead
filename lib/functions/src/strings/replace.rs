use crate::strings::regex::compile_pattern;
use crate::{QuaternarySparqlOp, SparqlOp, TernarySparqlOp};
use rdf_algebra_model::{EvalResult, OwnedStringLiteral, SimpleLiteralRef, StringLiteralRef};

#[derive(Debug)]
pub struct ReplaceSparqlOp;

impl Default for ReplaceSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplaceSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for ReplaceSparqlOp {
    fn name(&self) -> &str {
        "replace"
    }
}

impl TernarySparqlOp for ReplaceSparqlOp {
    type Arg0<'data> = StringLiteralRef<'data>;
    type Arg1<'data> = SimpleLiteralRef<'data>;
    type Arg2<'data> = SimpleLiteralRef<'data>;
    type Result<'data> = OwnedStringLiteral;

    fn evaluate<'data>(
        &self,
        text: Self::Arg0<'data>,
        pattern: Self::Arg1<'data>,
        replacement: Self::Arg2<'data>,
    ) -> EvalResult<Self::Result<'data>> {
        replace(text, pattern, replacement, None)
    }
}

impl QuaternarySparqlOp for ReplaceSparqlOp {
    type Arg0<'data> = StringLiteralRef<'data>;
    type Arg1<'data> = SimpleLiteralRef<'data>;
    type Arg2<'data> = SimpleLiteralRef<'data>;
    type Arg3<'data> = SimpleLiteralRef<'data>;
    type Result<'data> = OwnedStringLiteral;

    fn evaluate<'data>(
        &self,
        text: Self::Arg0<'data>,
        pattern: Self::Arg1<'data>,
        replacement: Self::Arg2<'data>,
        flags: Self::Arg3<'data>,
    ) -> EvalResult<Self::Result<'data>> {
        replace(text, pattern, replacement, Some(flags))
    }
}

fn replace(
    text: StringLiteralRef<'_>,
    pattern: SimpleLiteralRef<'_>,
    replacement: SimpleLiteralRef<'_>,
    flags: Option<SimpleLiteralRef<'_>>,
) -> EvalResult<OwnedStringLiteral> {
    let regex = compile_pattern(pattern.0, flags.map(|flags| flags.0))?;
    let result = regex.replace_all(text.0, replacement.0).into_owned();
    Ok(OwnedStringLiteral::new(result, text.1.map(String::from)))
}
