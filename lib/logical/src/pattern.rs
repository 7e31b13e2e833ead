use crate::{AggregateExpression, Expression, GroupKey, OperatorKind, OrderExpression, PropertyPath};
use rdf_algebra_model::{NamedNode, NamedNodePattern, Term, TermPattern, TriplePattern, Variable};

/// A graph pattern of the algebra. Evaluating a graph pattern produces a sequence of solutions.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GraphPattern {
    /// A basic graph pattern. The empty BGP produces a single empty solution.
    Bgp { patterns: Vec<TriplePattern> },
    /// A property path between two endpoints.
    Path {
        subject: TermPattern,
        path: PropertyPath,
        object: TermPattern,
    },
    Join {
        left: Box<GraphPattern>,
        right: Box<GraphPattern>,
    },
    LeftJoin {
        left: Box<GraphPattern>,
        right: Box<GraphPattern>,
        expression: Option<Expression>,
    },
    Filter {
        expression: Expression,
        inner: Box<GraphPattern>,
    },
    Union {
        left: Box<GraphPattern>,
        right: Box<GraphPattern>,
    },
    Graph {
        name: NamedNodePattern,
        inner: Box<GraphPattern>,
    },
    /// `BIND(expression AS variable)`.
    Extend {
        inner: Box<GraphPattern>,
        variable: Variable,
        expression: Expression,
    },
    Minus {
        left: Box<GraphPattern>,
        right: Box<GraphPattern>,
    },
    /// Inline data. A row may leave variables unbound.
    Values {
        variables: Vec<Variable>,
        bindings: Vec<Vec<Option<Term>>>,
    },
    OrderBy {
        inner: Box<GraphPattern>,
        expression: Vec<OrderExpression>,
    },
    /// Projection. [None] keeps every variable (`*`).
    Project {
        inner: Box<GraphPattern>,
        variables: Option<Vec<Variable>>,
    },
    Distinct { inner: Box<GraphPattern> },
    Reduced { inner: Box<GraphPattern> },
    Slice {
        inner: Box<GraphPattern>,
        start: usize,
        length: Option<usize>,
    },
    Group {
        inner: Box<GraphPattern>,
        keys: Vec<GroupKey>,
        aggregates: Vec<(Variable, AggregateExpression)>,
    },
    /// Restricts the data set of `inner`.
    Dataset {
        dataset: QueryDataset,
        inner: Box<GraphPattern>,
    },
    /// Prefix declarations. Prefixed names are expanded while parsing, so this node has no effect
    /// on the evaluation.
    Prefix {
        prefixes: Vec<(String, NamedNode)>,
        inner: Box<GraphPattern>,
    },
    /// Sets the base IRI of `inner`.
    Base {
        iri: NamedNode,
        inner: Box<GraphPattern>,
    },
}

/// The data set of a query: the graphs that form the default graph and the named graphs that are
/// visible to `GRAPH`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct QueryDataset {
    pub default: Vec<NamedNode>,
    pub named: Option<Vec<NamedNode>>,
}

impl GraphPattern {
    /// The pattern that produces a single empty solution.
    pub fn unit() -> Self {
        GraphPattern::Bgp {
            patterns: Vec::new(),
        }
    }

    /// Returns `true` if this pattern always produces a single empty solution.
    pub fn is_unit(&self) -> bool {
        match self {
            GraphPattern::Bgp { patterns } => patterns.is_empty(),
            GraphPattern::Values {
                variables,
                bindings,
            } => variables.is_empty() && bindings.len() == 1,
            _ => false,
        }
    }

    pub fn kind(&self) -> OperatorKind {
        match self {
            GraphPattern::Bgp { .. } => OperatorKind::Bgp,
            GraphPattern::Path { .. } => OperatorKind::Path,
            GraphPattern::Join { .. } => OperatorKind::Join,
            GraphPattern::LeftJoin { .. } => OperatorKind::LeftJoin,
            GraphPattern::Filter { .. } => OperatorKind::Filter,
            GraphPattern::Union { .. } => OperatorKind::Union,
            GraphPattern::Graph { .. } => OperatorKind::Graph,
            GraphPattern::Extend { .. } => OperatorKind::Extend,
            GraphPattern::Minus { .. } => OperatorKind::Minus,
            GraphPattern::Values { .. } => OperatorKind::Table,
            GraphPattern::OrderBy { .. } => OperatorKind::OrderBy,
            GraphPattern::Project { .. } => OperatorKind::Project,
            GraphPattern::Distinct { .. } => OperatorKind::Distinct,
            GraphPattern::Reduced { .. } => OperatorKind::Reduced,
            GraphPattern::Slice { .. } => OperatorKind::Slice,
            GraphPattern::Group { .. } => OperatorKind::Group,
            GraphPattern::Dataset { .. } => OperatorKind::Dataset,
            GraphPattern::Prefix { .. } => OperatorKind::Prefix,
            GraphPattern::Base { .. } => OperatorKind::Base,
        }
    }

    /// The variables that may be bound by the solutions of this pattern, in order of appearance.
    pub fn in_scope_variables(&self) -> Vec<&Variable> {
        let mut variables = Vec::new();
        self.collect_in_scope_variables(&mut variables);
        variables
    }

    fn collect_in_scope_variables<'a>(&'a self, variables: &mut Vec<&'a Variable>) {
        fn add<'a>(variables: &mut Vec<&'a Variable>, variable: &'a Variable) {
            if !variables.contains(&variable) {
                variables.push(variable);
            }
        }

        match self {
            GraphPattern::Bgp { patterns } => {
                for pattern in patterns {
                    pattern.collect_variables(variables);
                }
            }
            GraphPattern::Path {
                subject, object, ..
            } => {
                subject.collect_variables(variables);
                object.collect_variables(variables);
            }
            GraphPattern::Join { left, right }
            | GraphPattern::LeftJoin { left, right, .. }
            | GraphPattern::Union { left, right } => {
                left.collect_in_scope_variables(variables);
                right.collect_in_scope_variables(variables);
            }
            GraphPattern::Minus { left, .. } => left.collect_in_scope_variables(variables),
            GraphPattern::Graph { name, inner } => {
                if let NamedNodePattern::Variable(variable) = name {
                    add(variables, variable);
                }
                inner.collect_in_scope_variables(variables);
            }
            GraphPattern::Extend {
                inner, variable, ..
            } => {
                inner.collect_in_scope_variables(variables);
                add(variables, variable);
            }
            GraphPattern::Values { variables: vars, .. } => {
                for variable in vars {
                    add(variables, variable);
                }
            }
            GraphPattern::Project {
                inner,
                variables: projection,
            } => match projection {
                Some(projection) => {
                    for variable in projection {
                        add(variables, variable);
                    }
                }
                None => inner.collect_in_scope_variables(variables),
            },
            GraphPattern::Group {
                keys, aggregates, ..
            } => {
                for key in keys {
                    if let Some(variable) = key.bound_variable() {
                        add(variables, variable);
                    }
                }
                for (variable, _) in aggregates {
                    add(variables, variable);
                }
            }
            GraphPattern::Filter { inner, .. }
            | GraphPattern::OrderBy { inner, .. }
            | GraphPattern::Distinct { inner }
            | GraphPattern::Reduced { inner }
            | GraphPattern::Slice { inner, .. }
            | GraphPattern::Dataset { inner, .. }
            | GraphPattern::Prefix { inner, .. }
            | GraphPattern::Base { inner, .. } => inner.collect_in_scope_variables(variables),
        }
    }

    /// The direct sub-patterns of this pattern.
    pub fn children(&self) -> Vec<&GraphPattern> {
        match self {
            GraphPattern::Bgp { .. } | GraphPattern::Path { .. } | GraphPattern::Values { .. } => {
                Vec::new()
            }
            GraphPattern::Join { left, right }
            | GraphPattern::LeftJoin { left, right, .. }
            | GraphPattern::Union { left, right }
            | GraphPattern::Minus { left, right } => vec![left, right],
            GraphPattern::Filter { inner, .. }
            | GraphPattern::Graph { inner, .. }
            | GraphPattern::Extend { inner, .. }
            | GraphPattern::OrderBy { inner, .. }
            | GraphPattern::Project { inner, .. }
            | GraphPattern::Distinct { inner }
            | GraphPattern::Reduced { inner }
            | GraphPattern::Slice { inner, .. }
            | GraphPattern::Group { inner, .. }
            | GraphPattern::Dataset { inner, .. }
            | GraphPattern::Prefix { inner, .. }
            | GraphPattern::Base { inner, .. } => vec![inner],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdf_algebra_model::{Literal, NamedNode};

    fn var(name: &str) -> Variable {
        Variable::new_unchecked(name)
    }

    #[test]
    fn in_scope_variables_of_extend_and_minus() {
        let pattern = GraphPattern::Extend {
            inner: Box::new(GraphPattern::Minus {
                left: Box::new(GraphPattern::Bgp {
                    patterns: vec![TriplePattern::new(
                        var("s"),
                        NamedNode::new_unchecked("http://example.com/p"),
                        var("o"),
                    )],
                }),
                right: Box::new(GraphPattern::Bgp {
                    patterns: vec![TriplePattern::new(
                        var("s"),
                        NamedNode::new_unchecked("http://example.com/q"),
                        var("hidden"),
                    )],
                }),
            }),
            variable: var("x"),
            expression: Literal::from(1).into(),
        };
        let variables = pattern
            .in_scope_variables()
            .into_iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        assert_eq!(variables, ["?s", "?o", "?x"]);
    }

    #[test]
    fn unit_patterns() {
        assert!(GraphPattern::unit().is_unit());
        assert!(GraphPattern::Values {
            variables: vec![],
            bindings: vec![vec![]]
        }
        .is_unit());
    }
}
