use crate::{BinarySparqlOp, SparqlOp, TernarySparqlOp};
use rdf_algebra_model::{Boolean, EvalError, EvalResult, SimpleLiteralRef, StringLiteralRef};
use regex::{Regex, RegexBuilder};
use std::borrow::Cow;

#[derive(Debug)]
pub struct RegexSparqlOp;

impl Default for RegexSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl RegexSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for RegexSparqlOp {
    fn name(&self) -> &str {
        "regex"
    }
}

impl BinarySparqlOp for RegexSparqlOp {
    type ArgLhs<'data> = StringLiteralRef<'data>;
    type ArgRhs<'data> = SimpleLiteralRef<'data>;
    type Result<'data> = Boolean;

    fn evaluate<'data>(
        &self,
        text: Self::ArgLhs<'data>,
        pattern: Self::ArgRhs<'data>,
    ) -> EvalResult<Self::Result<'data>> {
        let regex = compile_pattern(pattern.0, None)?;
        Ok(regex.is_match(text.0).into())
    }
}

impl TernarySparqlOp for RegexSparqlOp {
    type Arg0<'data> = StringLiteralRef<'data>;
    type Arg1<'data> = SimpleLiteralRef<'data>;
    type Arg2<'data> = SimpleLiteralRef<'data>;
    type Result<'data> = Boolean;

    fn evaluate<'data>(
        &self,
        text: Self::Arg0<'data>,
        pattern: Self::Arg1<'data>,
        flags: Self::Arg2<'data>,
    ) -> EvalResult<Self::Result<'data>> {
        let regex = compile_pattern(pattern.0, Some(flags.0))?;
        Ok(regex.is_match(text.0).into())
    }
}

/// Compiles a pattern with the flags `s`, `m`, `i`, `x` and `q`. Unknown flags are type errors.
pub(super) fn compile_pattern(pattern: &str, flags: Option<&str>) -> EvalResult<Regex> {
    const REGEX_SIZE_LIMIT: usize = 1_000_000;

    let mut pattern = Cow::Borrowed(pattern);
    let flags = flags.unwrap_or_default();
    if flags.contains('q') {
        pattern = regex::escape(&pattern).into();
    }
    let mut regex_builder = RegexBuilder::new(&pattern);
    regex_builder.size_limit(REGEX_SIZE_LIMIT);
    for flag in flags.chars() {
        match flag {
            's' => {
                regex_builder.dot_matches_new_line(true);
            }
            'm' => {
                regex_builder.multi_line(true);
            }
            'i' => {
                regex_builder.case_insensitive(true);
            }
            'x' => {
                regex_builder.ignore_whitespace(true);
            }
            'q' => (),
            _ => return EvalError::expected(),
        }
    }
    regex_builder.build().map_err(|_| EvalError::TypeError)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate_binary_or_ternary;
    use rdf_algebra_model::{Literal, Term};

    fn regex(args: &[&str]) -> EvalResult<Term> {
        let args = args
            .iter()
            .map(|arg| Literal::new_simple_literal(*arg).into())
            .collect::<Vec<Term>>();
        evaluate_binary_or_ternary(&RegexSparqlOp::new(), &args)
    }

    #[test]
    fn matches_anywhere() {
        assert_eq!(regex(&["Alice", "^ali", "i"]), Ok(Literal::from(true).into()));
        assert_eq!(regex(&["Alice", "^ali"]), Ok(Literal::from(false).into()));
    }

    #[test]
    fn quoted_pattern() {
        assert_eq!(regex(&["a.c", "a.c", "q"]), Ok(Literal::from(true).into()));
        assert_eq!(regex(&["abc", "a.c", "q"]), Ok(Literal::from(false).into()));
    }

    #[test]
    fn invalid_flags_and_patterns() {
        assert_eq!(regex(&["abc", "a", "z"]), Err(EvalError::TypeError));
        assert_eq!(regex(&["abc", "(a"]), Err(EvalError::TypeError));
    }
}
