use crate::{BinarySparqlOp, SparqlOp};
use rdf_algebra_model::{Boolean, EvalResult, SimpleLiteralRef};
use itertools::{EitherOrBoth, Itertools};

#[derive(Debug)]
pub struct LangMatchesSparqlOp;

impl Default for LangMatchesSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl LangMatchesSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for LangMatchesSparqlOp {
    fn name(&self) -> &str {
        "langMatches"
    }
}

impl BinarySparqlOp for LangMatchesSparqlOp {
    type ArgLhs<'data> = SimpleLiteralRef<'data>;
    type ArgRhs<'data> = SimpleLiteralRef<'data>;
    type Result<'data> = Boolean;

    fn evaluate<'data>(
        &self,
        lhs: Self::ArgLhs<'data>,
        rhs: Self::ArgRhs<'data>,
    ) -> EvalResult<Self::Result<'data>> {
        let matches = if rhs.0 == "*" {
            !lhs.0.is_empty()
        } else {
            !rhs.0
                .split('-')
                .zip_longest(lhs.0.split('-'))
                .any(|parts| match parts {
                    EitherOrBoth::Both(range_subtag, language_subtag) => {
                        !range_subtag.eq_ignore_ascii_case(language_subtag)
                    }
                    EitherOrBoth::Left(_) => true,
                    EitherOrBoth::Right(_) => false,
                })
        };
        Ok(matches.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lang_matches(tag: &str, range: &str) -> bool {
        LangMatchesSparqlOp::new()
            .evaluate(SimpleLiteralRef(tag), SimpleLiteralRef(range))
            .unwrap()
            .into()
    }

    #[test]
    fn matches_prefix_ranges() {
        assert!(lang_matches("en-US", "en"));
        assert!(lang_matches("EN", "en"));
        assert!(!lang_matches("en", "en-US"));
        assert!(!lang_matches("fr", "en"));
    }

    #[test]
    fn wildcard_requires_a_tag() {
        assert!(lang_matches("de", "*"));
        assert!(!lang_matches("", "*"));
    }
}
