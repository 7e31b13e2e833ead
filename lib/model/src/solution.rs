use crate::{Term, Variable};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// A partial mapping from variables to terms. Each variable is bound at most once.
///
/// The bindings are kept sorted by variable such that two solutions with the same bindings are
/// structurally equal and hash to the same value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Solution {
    bindings: BTreeMap<Variable, Term>,
}

impl Solution {
    /// Creates a new solution without any bindings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, variable: &Variable) -> Option<&Term> {
        self.bindings.get(variable)
    }

    pub fn contains(&self, variable: &Variable) -> bool {
        self.bindings.contains_key(variable)
    }

    /// Binds `variable` to `term`, returning the previous binding.
    pub fn insert(&mut self, variable: Variable, term: Term) -> Option<Term> {
        self.bindings.insert(variable, term)
    }

    pub fn remove(&mut self, variable: &Variable) -> Option<Term> {
        self.bindings.remove(variable)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Variable, Term> {
        self.bindings.iter()
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.bindings.keys()
    }

    /// Two solutions are compatible iff every variable bound in both is bound to the same term.
    pub fn is_compatible(&self, other: &Solution) -> bool {
        let (smaller, larger) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        smaller.iter().all(|(variable, term)| {
            larger
                .get(variable)
                .map_or(true, |other_term| other_term == term)
        })
    }

    /// Returns true if both solutions bind at least one common variable.
    pub fn shares_variable_with(&self, other: &Solution) -> bool {
        self.variables().any(|variable| other.contains(variable))
    }

    /// Merges two solutions. Returns [None] if the solutions are not compatible.
    pub fn merge(&self, other: &Solution) -> Option<Solution> {
        if !self.is_compatible(other) {
            return None;
        }

        let mut result = self.clone();
        for (variable, term) in other.iter() {
            if !result.contains(variable) {
                result.insert(variable.clone(), term.clone());
            }
        }
        Some(result)
    }

    /// Restricts the domain of this solution to `variables`.
    #[must_use]
    pub fn project(&self, variables: &[Variable]) -> Solution {
        self.bindings
            .iter()
            .filter(|(variable, _)| variables.contains(variable))
            .map(|(variable, term)| (variable.clone(), term.clone()))
            .collect()
    }

    /// Removes all bindings of non-distinguished variables.
    #[must_use]
    pub fn without_non_distinguished(mut self) -> Solution {
        self.bindings
            .retain(|variable, _| variable.is_distinguished());
        self
    }
}

impl FromIterator<(Variable, Term)> for Solution {
    fn from_iter<T: IntoIterator<Item = (Variable, Term)>>(iter: T) -> Self {
        Self {
            bindings: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Solution {
    type Item = (Variable, Term);
    type IntoIter = btree_map::IntoIter<Variable, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.into_iter()
    }
}

impl<'solution> IntoIterator for &'solution Solution {
    type Item = (&'solution Variable, &'solution Term);
    type IntoIter = btree_map::Iter<'solution, Variable, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.iter()
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        for (i, (variable, term)) in self.bindings.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{variable} -> {term}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Literal, NamedNode};

    fn var(name: &str) -> Variable {
        Variable::new_unchecked(name)
    }

    fn iri(value: &str) -> Term {
        NamedNode::new_unchecked(format!("http://example.com/{value}")).into()
    }

    fn solution(bindings: &[(&str, Term)]) -> Solution {
        bindings
            .iter()
            .map(|(name, term)| (var(name), term.clone()))
            .collect()
    }

    #[test]
    fn compatibility_is_symmetric() {
        let a = solution(&[("x", iri("a")), ("y", iri("b"))]);
        let b = solution(&[("y", iri("b")), ("z", iri("c"))]);
        let c = solution(&[("y", iri("c"))]);

        assert!(a.is_compatible(&b));
        assert!(b.is_compatible(&a));
        assert!(!a.is_compatible(&c));
        assert!(!c.is_compatible(&a));
    }

    #[test]
    fn merge_is_symmetric() {
        let a = solution(&[("x", iri("a")), ("y", iri("b"))]);
        let b = solution(&[("y", iri("b")), ("z", Literal::from(1).into())]);

        assert_eq!(a.merge(&b), b.merge(&a));
        insta::assert_snapshot!(a.merge(&b).unwrap(), @r#"{?x -> <http://example.com/a>, ?y -> <http://example.com/b>, ?z -> "1"^^<http://www.w3.org/2001/XMLSchema#integer>}"#);
    }

    #[test]
    fn merge_of_incompatible_solutions_is_undefined() {
        let a = solution(&[("x", iri("a"))]);
        let b = solution(&[("x", iri("b"))]);
        assert_eq!(a.merge(&b), None);
    }

    #[test]
    fn empty_solution_is_compatible_with_everything() {
        let a = solution(&[("x", iri("a"))]);
        assert_eq!(Solution::new().merge(&a), Some(a));
    }

    #[test]
    fn non_distinguished_bindings_are_removed() {
        let mut a = solution(&[("x", iri("a"))]);
        a.insert(Variable::non_distinguished("x"), iri("b"));
        assert_eq!(a.without_non_distinguished(), solution(&[("x", iri("a"))]));
    }
}
