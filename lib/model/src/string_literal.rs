use crate::{EvalError, EvalResult, Literal};
use std::cmp::Ordering;

/// A reference to a string literal in RDF, consisting of a value and an optional language tag.
///
/// Both simple literals (`xsd:string`) and language-tagged strings can be viewed as a string
/// literal.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct StringLiteralRef<'value>(pub &'value str, pub Option<&'value str>);

impl StringLiteralRef<'_> {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The length in characters.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn into_owned(self) -> OwnedStringLiteral {
        OwnedStringLiteral(self.0.to_owned(), self.1.map(ToOwned::to_owned))
    }
}

impl PartialOrd for StringLiteralRef<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StringLiteralRef<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(other.0)
    }
}

/// An owned string literal in RDF, consisting of a value and an optional language tag.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct OwnedStringLiteral(pub String, pub Option<String>);

impl OwnedStringLiteral {
    pub fn new(value: String, language: Option<String>) -> OwnedStringLiteral {
        OwnedStringLiteral(value, language)
    }

    pub fn as_ref(&self) -> StringLiteralRef<'_> {
        StringLiteralRef(&self.0, self.1.as_deref())
    }

    pub fn into_literal(self) -> Literal {
        match self.1 {
            None => Literal::new_simple_literal(self.0),
            Some(language) => Literal::new_language_tagged_literal_unchecked(self.0, language),
        }
    }
}

/// The operands of a binary string function that passed the argument compatibility check.
pub struct CompatibleStringArgs<'data> {
    pub lhs: &'data str,
    pub rhs: &'data str,
    pub language: Option<&'data str>,
}

impl<'data> CompatibleStringArgs<'data> {
    /// Checks whether two [StringLiteralRef] are compatible and if they are return a new
    /// [CompatibleStringArgs].
    ///
    /// Two arguments are compatible if the right-hand side is a simple literal or if both sides
    /// share the same language tag. The result keeps the language tag of the left-hand side.
    ///
    /// Relevant Resources:
    /// - [SPARQL 1.1 - Argument Compatibility Rules](https://www.w3.org/TR/2013/REC-sparql11-query-20130321/#func-arg-compatibility)
    pub fn try_from(
        lhs: StringLiteralRef<'data>,
        rhs: StringLiteralRef<'data>,
    ) -> EvalResult<CompatibleStringArgs<'data>> {
        let is_compatible = rhs.1.is_none() || lhs.1 == rhs.1;

        if !is_compatible {
            return EvalError::expected();
        }

        Ok(CompatibleStringArgs {
            lhs: lhs.0,
            rhs: rhs.0,
            language: lhs.1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_rhs_is_always_compatible() {
        let args =
            CompatibleStringArgs::try_from(StringLiteralRef("abc", Some("en")), StringLiteralRef("b", None))
                .unwrap();
        assert_eq!(args.language, Some("en"));
    }

    #[test]
    fn different_languages_are_incompatible() {
        let result = CompatibleStringArgs::try_from(
            StringLiteralRef("abc", Some("en")),
            StringLiteralRef("b", Some("de")),
        );
        assert!(result.is_err());
    }

    #[test]
    fn tagged_rhs_requires_tagged_lhs() {
        let result =
            CompatibleStringArgs::try_from(StringLiteralRef("abc", None), StringLiteralRef("b", Some("en")));
        assert!(result.is_err());
    }

    #[test]
    fn length_counts_characters() {
        assert_eq!(StringLiteralRef("héllo", None).len(), 5);
    }
}
