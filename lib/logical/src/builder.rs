use crate::{
    AggregateExpression, Expression, GraphPattern, GroupKey, OrderExpression, PropertyPath,
    ValidationError,
};
use rdf_algebra_model::{NamedNodePattern, TermPattern, TriplePattern, Variable};

/// The kind of join that [AlgebraBuilder::join] creates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JoinType {
    /// Keeps the merges of compatible solutions.
    Inner,
    /// Keeps every solution of the left-hand side, merged with the compatible solutions of the
    /// right-hand side if there are any (`OPTIONAL`).
    Left,
}

/// A convenient builder for programmatically creating operator trees.
///
/// Every method validates the node it creates, so that an invalid tree is rejected as soon as it
/// is built.
///
/// # Example
///
/// ```
/// use rdf_algebra_logical::AlgebraBuilder;
/// use rdf_algebra_model::{NamedNode, TriplePattern, Variable};
///
/// let subject = Variable::new_unchecked("s");
/// let object = Variable::new_unchecked("o");
/// let pattern = TriplePattern::new(
///     subject.clone(),
///     NamedNode::new_unchecked("http://example.com/p"),
///     object,
/// );
///
/// let pattern = AlgebraBuilder::new_from_pattern(pattern)
///     .project(&[subject])
///     .unwrap()
///     .build();
/// assert_eq!(
///     pattern.to_string(),
///     "(project (?s)\n  (bgp (triple ?s <http://example.com/p> ?o)))"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct AlgebraBuilder {
    pattern: GraphPattern,
}

impl AlgebraBuilder {
    /// Creates a builder that starts with `pattern`.
    pub fn new(pattern: GraphPattern) -> Self {
        Self { pattern }
    }

    /// Creates a builder that starts with a single empty solution.
    pub fn new_unit() -> Self {
        Self::new(GraphPattern::unit())
    }

    /// Creates a builder that starts with a basic graph pattern of a single triple pattern.
    pub fn new_from_pattern(pattern: TriplePattern) -> Self {
        Self::new(GraphPattern::Bgp {
            patterns: vec![pattern],
        })
    }

    /// Creates a builder that starts with a property path.
    pub fn new_from_path(subject: TermPattern, path: PropertyPath, object: TermPattern) -> Self {
        Self::new(GraphPattern::Path {
            subject,
            path,
            object,
        })
    }

    fn validated(pattern: GraphPattern) -> Result<Self, ValidationError> {
        pattern.validate()?;
        Ok(Self { pattern })
    }

    /// Projects the current pattern to a new set of variables.
    pub fn project(self, variables: &[Variable]) -> Result<Self, ValidationError> {
        Self::validated(GraphPattern::Project {
            inner: Box::new(self.pattern),
            variables: Some(variables.to_vec()),
        })
    }

    /// Applies a filter using `expression`.
    ///
    /// The filter expression is evaluated for each solution. If the effective boolean value of the
    /// expression is `true`, the solution is kept; otherwise, it is discarded.
    ///
    /// # Relevant Resources
    /// - [SPARQL 1.1 - Effective Boolean Value (EBV)](https://www.w3.org/TR/sparql11-query/#ebv)
    pub fn filter(self, expression: Expression) -> Result<Self, ValidationError> {
        Self::validated(GraphPattern::Filter {
            expression,
            inner: Box::new(self.pattern),
        })
    }

    /// Extends the current pattern with a new variable binding.
    pub fn extend(self, variable: Variable, expression: Expression) -> Result<Self, ValidationError> {
        Self::validated(GraphPattern::Extend {
            inner: Box::new(self.pattern),
            variable,
            expression,
        })
    }

    /// Joins the current pattern with `rhs`. The `filter` of an inner join is applied to the joined
    /// solutions.
    ///
    /// # Relevant Resources
    /// - [SPARQL 1.1 - Compatible Mappings](https://www.w3.org/TR/sparql11-query/#defn_algCompatibleMapping)
    pub fn join(
        self,
        rhs: GraphPattern,
        join_type: JoinType,
        filter: Option<Expression>,
    ) -> Result<Self, ValidationError> {
        let left = Box::new(self.pattern);
        let right = Box::new(rhs);
        let pattern = match (join_type, filter) {
            (JoinType::Inner, None) => GraphPattern::Join { left, right },
            (JoinType::Inner, Some(expression)) => GraphPattern::Filter {
                expression,
                inner: Box::new(GraphPattern::Join { left, right }),
            },
            (JoinType::Left, expression) => GraphPattern::LeftJoin {
                left,
                right,
                expression,
            },
        };
        Self::validated(pattern)
    }

    /// Creates a union of the current pattern and another pattern.
    pub fn union(self, rhs: GraphPattern) -> Result<Self, ValidationError> {
        Self::validated(GraphPattern::Union {
            left: Box::new(self.pattern),
            right: Box::new(rhs),
        })
    }

    /// Subtracts the results of another pattern from the current pattern.
    pub fn minus(self, rhs: GraphPattern) -> Result<Self, ValidationError> {
        Self::validated(GraphPattern::Minus {
            left: Box::new(self.pattern),
            right: Box::new(rhs),
        })
    }

    /// Restricts the current pattern to the graph `name`.
    pub fn graph(self, name: impl Into<NamedNodePattern>) -> Result<Self, ValidationError> {
        Self::validated(GraphPattern::Graph {
            name: name.into(),
            inner: Box::new(self.pattern),
        })
    }

    /// Skips the first `start` solutions and keeps at most `length` of the remaining ones.
    pub fn slice(self, start: usize, length: Option<usize>) -> Result<Self, ValidationError> {
        Self::validated(GraphPattern::Slice {
            inner: Box::new(self.pattern),
            start,
            length,
        })
    }

    /// Sorts the current pattern by a given set of expressions.
    pub fn order_by(self, expressions: &[OrderExpression]) -> Result<Self, ValidationError> {
        Self::validated(GraphPattern::OrderBy {
            inner: Box::new(self.pattern),
            expression: expressions.to_vec(),
        })
    }

    /// Groups the current pattern by a set of keys and applies aggregate expressions.
    pub fn group(
        self,
        keys: &[GroupKey],
        aggregates: &[(Variable, AggregateExpression)],
    ) -> Result<Self, ValidationError> {
        Self::validated(GraphPattern::Group {
            inner: Box::new(self.pattern),
            keys: keys.to_vec(),
            aggregates: aggregates.to_vec(),
        })
    }

    /// Removes duplicate solutions from the current pattern.
    pub fn distinct(self) -> Result<Self, ValidationError> {
        Self::validated(GraphPattern::Distinct {
            inner: Box::new(self.pattern),
        })
    }

    /// Removes adjacent duplicate solutions from the current pattern.
    pub fn reduced(self) -> Result<Self, ValidationError> {
        Self::validated(GraphPattern::Reduced {
            inner: Box::new(self.pattern),
        })
    }

    /// Returns the current pattern.
    pub fn pattern(&self) -> &GraphPattern {
        &self.pattern
    }

    /// Builds the [GraphPattern].
    pub fn build(self) -> GraphPattern {
        self.pattern
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AggregateFunction;
    use rdf_algebra_model::{Literal, NamedNode};

    fn var(name: &str) -> Variable {
        Variable::new_unchecked(name)
    }

    fn triple(subject: &str, object: &str) -> TriplePattern {
        TriplePattern::new(
            var(subject),
            NamedNode::new_unchecked("http://example.com/p"),
            var(object),
        )
    }

    #[test]
    fn optional_with_filter() {
        let pattern = AlgebraBuilder::new_from_pattern(triple("s", "o"))
            .join(
                AlgebraBuilder::new_from_pattern(triple("o", "x")).build(),
                JoinType::Left,
                Some(Expression::from(var("x")).greater(Literal::from(3).into())),
            )
            .unwrap()
            .order_by(&[OrderExpression::Desc(var("x").into())])
            .unwrap()
            .slice(0, Some(10))
            .unwrap()
            .build();

        insta::assert_snapshot!(pattern, @r"
        (slice 0 10
          (order ((desc ?x))
            (leftjoin
              (bgp (triple ?s <http://example.com/p> ?o))
              (bgp (triple ?o <http://example.com/p> ?x))
              (> ?x 3))))
        ");
    }

    #[test]
    fn grouped_projection() {
        let builder = AlgebraBuilder::new_from_pattern(triple("s", "o"))
            .group(
                &[var("s").into()],
                &[(
                    var("count"),
                    AggregateExpression::new(AggregateFunction::Count, var("o").into()),
                )],
            )
            .unwrap();

        assert_eq!(
            builder.clone().project(&[var("o")]).unwrap_err(),
            ValidationError::UngroupedVariable(var("o"))
        );
        assert!(builder.project(&[var("s"), var("count")]).is_ok());
    }

    #[test]
    fn extend_rejects_bound_variable() {
        let error = AlgebraBuilder::new_from_pattern(triple("s", "o"))
            .extend(var("s"), Literal::from(1).into())
            .unwrap_err();
        assert_eq!(error, ValidationError::VariableAlreadyBound(var("s")));
    }
}
