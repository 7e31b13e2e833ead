use crate::{SparqlOp, UnarySparqlOp};
use rdf_algebra_model::{EvalResult, Integer, StringLiteralRef};

#[derive(Debug)]
pub struct StrLenSparqlOp;

impl Default for StrLenSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl StrLenSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for StrLenSparqlOp {
    fn name(&self) -> &str {
        "strlen"
    }
}

impl UnarySparqlOp for StrLenSparqlOp {
    type Arg<'data> = StringLiteralRef<'data>;
    type Result<'data> = Integer;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        Ok(Integer::from(i64::try_from(value.len())?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate_unary;
    use rdf_algebra_model::Literal;

    #[test]
    fn counts_characters() {
        let result = evaluate_unary(
            &StrLenSparqlOp::new(),
            &Literal::new_language_tagged_literal_unchecked("chat\u{e9}", "fr").into(),
        );
        assert_eq!(result, Ok(Literal::from(5).into()));
    }
}
