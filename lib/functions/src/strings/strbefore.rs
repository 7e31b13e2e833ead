use crate::{BinarySparqlOp, SparqlOp};
use rdf_algebra_model::{CompatibleStringArgs, EvalResult, StringLiteralRef};

#[derive(Debug)]
pub struct StrBeforeSparqlOp;

impl Default for StrBeforeSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl StrBeforeSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for StrBeforeSparqlOp {
    fn name(&self) -> &str {
        "strbefore"
    }
}

impl BinarySparqlOp for StrBeforeSparqlOp {
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
            Some(position) => Ok(StringLiteralRef(&args.lhs[..position], args.language)),
            None => Ok(StringLiteralRef("", None)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate_binary;
    use rdf_algebra_model::{EvalError, Literal};

    #[test]
    fn keeps_language_of_match() {
        let result = evaluate_binary(
            &StrBeforeSparqlOp::new(),
            &Literal::new_language_tagged_literal_unchecked("abc", "en").into(),
            &Literal::new_simple_literal("c").into(),
        );
        insta::assert_snapshot!(result.unwrap(), @r#""ab"@en"#);
    }

    #[test]
    fn no_match_is_simple_empty_string() {
        let result = evaluate_binary(
            &StrBeforeSparqlOp::new(),
            &Literal::new_language_tagged_literal_unchecked("abc", "en").into(),
            &Literal::new_simple_literal("z").into(),
        );
        insta::assert_snapshot!(result.unwrap(), @r#""""#);
    }

    #[test]
    fn incompatible_languages_are_errors() {
        let result = evaluate_binary(
            &StrBeforeSparqlOp::new(),
            &Literal::new_language_tagged_literal_unchecked("abc", "en").into(),
            &Literal::new_language_tagged_literal_unchecked("b", "de").into(),
        );
        assert_eq!(result, Err(EvalError::TypeError));
    }
}
