use crate::{NArySparqlOp, SparqlOp};
use rdf_algebra_model::{EvalResult, OwnedStringLiteral, StringLiteralRef};

#[derive(Debug)]
pub struct ConcatSparqlOp;

impl Default for ConcatSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl ConcatSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for ConcatSparqlOp {
    fn name(&self) -> &str {
        "concat"
    }
}

impl NArySparqlOp for ConcatSparqlOp {
    type Args<'data> = StringLiteralRef<'data>;
    type Result<'data> = OwnedStringLiteral;

    fn evaluate<'data>(&self, args: &[Self::Args<'data>]) -> EvalResult<Self::Result<'data>> {
        let mut result = String::default();
        let mut language = None;

        for arg in args {
            if let Some(lang) = &language {
                if *lang != arg.1 {
                    language = Some(None)
                }
            } else {
                language = Some(arg.1)
            }
            result += arg.0;
        }

        Ok(OwnedStringLiteral(
            result,
            language.flatten().map(ToOwned::to_owned),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate_n_ary;
    use rdf_algebra_model::{Literal, Term};

    fn concat(args: Vec<Literal>) -> Term {
        let args = args.into_iter().map(Term::from).collect::<Vec<_>>();
        evaluate_n_ary(&ConcatSparqlOp::new(), &args).unwrap()
    }

    #[test]
    fn keeps_shared_language() {
        let result = concat(vec![
            Literal::new_language_tagged_literal_unchecked("foo", "en"),
            Literal::new_language_tagged_literal_unchecked("bar", "en"),
        ]);
        insta::assert_snapshot!(result, @r#""foobar"@en"#);
    }

    #[test]
    fn drops_mixed_language() {
        let result = concat(vec![
            Literal::new_language_tagged_literal_unchecked("foo", "en"),
            Literal::new_simple_literal("bar"),
        ]);
        insta::assert_snapshot!(result, @r#""foobar""#);
    }

    #[test]
    fn empty_concat_is_empty_string() {
        insta::assert_snapshot!(concat(vec![]), @r#""""#);
    }
}
