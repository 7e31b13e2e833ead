use crate::aggregates::Accumulator;
use rdf_algebra_model::{EvalError, EvalResult, OwnedStringLiteral, Term};

/// `GROUP_CONCAT` joins the string values of a group.
///
/// The result keeps a language tag only if all values share it.
#[derive(Debug)]
pub struct GroupConcatAccumulator {
    separator: String,
    concat: EvalResult<String>,
    language: Option<Option<String>>,
}

impl GroupConcatAccumulator {
    pub const DEFAULT_SEPARATOR: &'static str = " ";

    pub fn new(separator: Option<String>) -> Self {
        Self {
            separator: separator.unwrap_or_else(|| Self::DEFAULT_SEPARATOR.to_owned()),
            concat: Ok(String::new()),
            language: None,
        }
    }
}

impl Accumulator for GroupConcatAccumulator {
    fn add(&mut self, value: Term) {
        let Ok(concat) = &mut self.concat else {
            return;
        };
        let (value, language) = match &value {
            Term::Literal(literal) => (literal.value(), literal.language()),
            Term::NamedNode(node) => (node.as_str(), None),
            Term::BlankNode(_) | Term::Triple(_) => {
                self.concat = Err(EvalError::TypeError);
                return;
            }
        };

        match &mut self.language {
            None => self.language = Some(language.map(ToOwned::to_owned)),
            Some(shared) => {
                if shared.as_deref() != language {
                    *shared = None;
                }
                concat.push_str(&self.separator);
            }
        }
        concat.push_str(value);
    }

    fn finish(self: Box<Self>) -> EvalResult<Term> {
        let language = self.language.flatten();
        Ok(OwnedStringLiteral(self.concat?, language)
            .into_literal()
            .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregates::aggregate;
    use rdf_algebra_model::Literal;

    #[test]
    fn default_separator() {
        let result = aggregate(
            Box::new(GroupConcatAccumulator::new(None)),
            vec![Literal::from(1).into(), Literal::new_simple_literal("a").into()],
        );
        insta::assert_snapshot!(result.unwrap(), @r#""1 a""#);
    }

    #[test]
    fn shared_language_is_kept() {
        let result = aggregate(
            Box::new(GroupConcatAccumulator::new(Some(", ".to_owned()))),
            vec![
                Literal::new_language_tagged_literal_unchecked("a", "en").into(),
                Literal::new_language_tagged_literal_unchecked("b", "en").into(),
            ],
        );
        insta::assert_snapshot!(result.unwrap(), @r#""a, b"@en"#);
    }

    #[test]
    fn mixed_languages_are_dropped() {
        let result = aggregate(
            Box::new(GroupConcatAccumulator::new(Some("|".to_owned()))),
            vec![
                Literal::new_language_tagged_literal_unchecked("a", "en").into(),
                Literal::new_simple_literal("b").into(),
            ],
        );
        insta::assert_snapshot!(result.unwrap(), @r#""a|b""#);
    }

    #[test]
    fn empty_group_is_empty_string() {
        let result = aggregate(Box::new(GroupConcatAccumulator::new(None)), vec![]);
        insta::assert_snapshot!(result.unwrap(), @r#""""#);
    }
}
