use crate::ValidationError;
use rdf_algebra_model::NamedNode;

/// A property path expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyPath {
    /// A single predicate.
    Link(NamedNode),
    Inverse(Box<PropertyPath>),
    Sequence(Box<PropertyPath>, Box<PropertyPath>),
    Alternative(Box<PropertyPath>, Box<PropertyPath>),
    ZeroOrOne(Box<PropertyPath>),
    ZeroOrMore(Box<PropertyPath>),
    OneOrMore(Box<PropertyPath>),
    /// Connects every node with itself.
    ZeroLength,
    /// Any predicate except the given ones.
    NegatedPropertySet(Vec<NamedNode>),
}

impl PropertyPath {
    pub fn inverse(path: PropertyPath) -> Self {
        PropertyPath::Inverse(Box::new(path))
    }

    pub fn sequence(lhs: PropertyPath, rhs: PropertyPath) -> Self {
        PropertyPath::Sequence(Box::new(lhs), Box::new(rhs))
    }

    pub fn alternative(lhs: PropertyPath, rhs: PropertyPath) -> Self {
        PropertyPath::Alternative(Box::new(lhs), Box::new(rhs))
    }

    pub fn zero_or_one(path: PropertyPath) -> Self {
        PropertyPath::ZeroOrOne(Box::new(path))
    }

    pub fn zero_or_more(path: PropertyPath) -> Self {
        PropertyPath::ZeroOrMore(Box::new(path))
    }

    pub fn one_or_more(path: PropertyPath) -> Self {
        PropertyPath::OneOrMore(Box::new(path))
    }

    /// Compiles the range `path{min,max}` into the other path combinators.
    ///
    /// The result is a sequence of `min` mandatory steps, followed by `max - min` nested optional
    /// steps if `max` is given, or by `path*` if it is not. A missing `min` means `0`, so `{,n}`
    /// equals `{0,n}`. At least one bound is required, and `{0,0}` matches the empty path only.
    pub fn range(
        min: Option<u32>,
        max: Option<u32>,
        path: PropertyPath,
    ) -> Result<PropertyPath, ValidationError> {
        let min = match (min, max) {
            (Some(min), _) => min,
            (None, Some(_)) => 0,
            (None, None) => return Err(ValidationError::InvalidPathRange { min, max }),
        };
        if max.is_some_and(|max| max < min) {
            return Err(ValidationError::InvalidPathRange {
                min: Some(min),
                max,
            });
        }

        let optional = match max {
            None => Some(PropertyPath::zero_or_more(path.clone())),
            Some(max) => optional_steps(&path, max - min),
        };
        let mandatory = (0..min).map(|_| path.clone()).reduce(PropertyPath::sequence);

        Ok(match (mandatory, optional) {
            (Some(mandatory), Some(optional)) => PropertyPath::sequence(mandatory, optional),
            (Some(mandatory), None) => mandatory,
            (None, Some(optional)) => optional,
            (None, None) => PropertyPath::ZeroLength,
        })
    }

    /// `path{n}`
    pub fn repeat(count: u32, path: PropertyPath) -> Result<PropertyPath, ValidationError> {
        Self::range(Some(count), Some(count), path)
    }
}

/// `(p/(p/(p)?)?)?` with `count` occurrences of `p`.
fn optional_steps(path: &PropertyPath, count: u32) -> Option<PropertyPath> {
    (0..count).fold(None, |inner, _| {
        Some(PropertyPath::zero_or_one(match inner {
            None => path.clone(),
            Some(inner) => PropertyPath::sequence(path.clone(), inner),
        }))
    })
}

impl From<NamedNode> for PropertyPath {
    fn from(value: NamedNode) -> Self {
        PropertyPath::Link(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p() -> PropertyPath {
        NamedNode::new_unchecked("http://example.com/p").into()
    }

    #[test]
    fn bounded_range() {
        let path = PropertyPath::range(Some(1), Some(3), p()).unwrap();
        insta::assert_snapshot!(path, @"(seq <http://example.com/p> (path? (seq <http://example.com/p> (path? <http://example.com/p>))))");
    }

    #[test]
    fn range_without_minimum_starts_at_zero() {
        let path = PropertyPath::range(None, Some(2), p()).unwrap();
        assert_eq!(path, PropertyPath::range(Some(0), Some(2), p()).unwrap());
        insta::assert_snapshot!(path, @"(path? (seq <http://example.com/p> (path? <http://example.com/p>)))");
    }

    #[test]
    fn unbounded_range() {
        let path = PropertyPath::range(Some(2), None, p()).unwrap();
        insta::assert_snapshot!(path, @"(seq (seq <http://example.com/p> <http://example.com/p>) (path* <http://example.com/p>))");
    }

    #[test]
    fn zero_range() {
        assert_eq!(PropertyPath::range(Some(0), Some(0), p()), Ok(PropertyPath::ZeroLength));
    }

    #[test]
    fn invalid_ranges() {
        assert_eq!(
            PropertyPath::range(Some(3), Some(1), p()),
            Err(ValidationError::InvalidPathRange {
                min: Some(3),
                max: Some(1)
            })
        );
        assert_eq!(
            PropertyPath::range(None, None, p()),
            Err(ValidationError::InvalidPathRange { min: None, max: None })
        );
        assert_eq!(
            PropertyPath::range(None, Some(0), p()),
            Ok(PropertyPath::ZeroLength)
        );
    }
}
