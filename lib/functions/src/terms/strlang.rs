use crate::{BinarySparqlOp, SparqlOp};
use rdf_algebra_model::{EvalResult, Literal, SimpleLiteralRef};

#[derive(Debug)]
pub struct StrLangSparqlOp;

impl Default for StrLangSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl StrLangSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for StrLangSparqlOp {
    fn name(&self) -> &str {
        "strlang"
    }
}

impl BinarySparqlOp for StrLangSparqlOp {
    type ArgLhs<'data> = SimpleLiteralRef<'data>;
    type ArgRhs<'data> = SimpleLiteralRef<'data>;
    type Result<'data> = Literal;

    fn evaluate<'data>(
        &self,
        lhs: Self::ArgLhs<'data>,
        rhs: Self::ArgRhs<'data>,
    ) -> EvalResult<Self::Result<'data>> {
        Ok(Literal::new_language_tagged_literal(lhs.0, rhs.0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate_binary;
    use rdf_algebra_model::EvalError;

    #[test]
    fn creates_tagged_literal() {
        let result = evaluate_binary(
            &StrLangSparqlOp::new(),
            &Literal::new_simple_literal("chat").into(),
            &Literal::new_simple_literal("fr").into(),
        );
        insta::assert_snapshot!(result.unwrap(), @r#""chat"@fr"#);
    }

    #[test]
    fn invalid_tag_is_error() {
        let result = evaluate_binary(
            &StrLangSparqlOp::new(),
            &Literal::new_simple_literal("chat").into(),
            &Literal::new_simple_literal("not a tag").into(),
        );
        assert_eq!(result, Err(EvalError::TypeError));
    }
}
