use crate::{
    AggregateExpression, AggregateFunction, Arity, Capability, Expression, GraphPattern,
    OperatorKind, Query, Update, UpdateOperation,
};
use rdf_algebra_model::{Term, TermPattern, TriplePattern, Variable};
use thiserror::Error;

/// A malformed operator tree.
///
/// Validation errors are raised once, when a tree is built, parsed or optimized. They are fatal
/// for the whole query.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("The operator {name} expects {expected} operands but got {actual}.")]
    Arity {
        name: &'static str,
        expected: Arity,
        actual: usize,
    },
    #[error("The operator {0} cannot be used in an expression.")]
    NotEvaluatable(&'static str),
    #[error("The operator {0} has a dedicated expression form.")]
    SpecialForm(&'static str),
    #[error("Unknown operator {0}.")]
    UnknownOperator(String),
    #[error("Both operands of {1} use the non-distinguished variable {0}.")]
    SharedNonDistinguishedVariable(Variable, &'static str),
    #[error("The variable {0} is already bound in the extended pattern.")]
    VariableAlreadyBound(Variable),
    #[error("The variable {0} is neither a grouping key nor an aggregate.")]
    UngroupedVariable(Variable),
    #[error("The path range {{{},{}}} is invalid.", bound(.min), bound(.max))]
    InvalidPathRange { min: Option<u32>, max: Option<u32> },
    #[error("bound expects a variable.")]
    BoundRequiresVariable,
    #[error("A table row has {actual} values but the table has {expected} variables.")]
    TableRowLength { expected: usize, actual: usize },
}

fn bound(value: &Option<u32>) -> String {
    value.map(|value| value.to_string()).unwrap_or_default()
}

impl GraphPattern {
    /// Checks the construction-time rules of this pattern and all its sub-patterns.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            GraphPattern::Bgp { .. } | GraphPattern::Path { .. } => Ok(()),
            GraphPattern::Join { left, right } => {
                check_disjoint_non_distinguished(left, right, "join")?;
                left.validate()?;
                right.validate()
            }
            GraphPattern::Union { left, right } => {
                check_disjoint_non_distinguished(left, right, "union")?;
                left.validate()?;
                right.validate()
            }
            GraphPattern::LeftJoin {
                left,
                right,
                expression,
            } => {
                if let Some(expression) = expression {
                    expression.validate()?;
                }
                left.validate()?;
                right.validate()
            }
            GraphPattern::Minus { left, right } => {
                left.validate()?;
                right.validate()
            }
            GraphPattern::Filter { expression, inner } => {
                expression.validate()?;
                inner.validate()
            }
            GraphPattern::Extend {
                inner,
                variable,
                expression,
            } => {
                if inner.in_scope_variables().contains(&variable) {
                    return Err(ValidationError::VariableAlreadyBound(variable.clone()));
                }
                expression.validate()?;
                inner.validate()
            }
            GraphPattern::Values {
                variables,
                bindings,
            } => {
                for row in bindings {
                    if row.len() != variables.len() {
                        return Err(ValidationError::TableRowLength {
                            expected: variables.len(),
                            actual: row.len(),
                        });
                    }
                }
                Ok(())
            }
            GraphPattern::OrderBy { inner, expression } => {
                for order in expression {
                    order.expression().validate()?;
                }
                inner.validate()
            }
            GraphPattern::Project { inner, variables } => {
                if let Some(variables) = variables {
                    check_grouped_scope(inner, variables)?;
                }
                inner.validate()
            }
            GraphPattern::Group {
                inner,
                keys,
                aggregates,
            } => {
                for key in keys {
                    key.expression.validate()?;
                }
                for (_, aggregate) in aggregates {
                    aggregate.validate()?;
                }
                inner.validate()
            }
            GraphPattern::Graph { inner, .. }
            | GraphPattern::Distinct { inner }
            | GraphPattern::Reduced { inner }
            | GraphPattern::Slice { inner, .. }
            | GraphPattern::Dataset { inner, .. }
            | GraphPattern::Prefix { inner, .. }
            | GraphPattern::Base { inner, .. } => inner.validate(),
        }
    }
}

impl Expression {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Expression::Term(_) | Expression::Variable(_) => Ok(()),
            Expression::Operation(kind, args) => {
                check_operation(*kind, args)?;
                args.iter().try_for_each(Expression::validate)
            }
            Expression::Call(_, args) => args.iter().try_for_each(Expression::validate),
            Expression::Exists(pattern) => pattern.validate(),
        }
    }
}

fn check_operation(kind: OperatorKind, args: &[Expression]) -> Result<(), ValidationError> {
    if kind.capability() != Capability::Evaluatable {
        return Err(ValidationError::NotEvaluatable(kind.name()));
    }
    if matches!(
        kind,
        OperatorKind::Exists | OperatorKind::NotExists | OperatorKind::Call
    ) {
        return Err(ValidationError::SpecialForm(kind.name()));
    }
    if !kind.arity().accepts(args.len()) {
        return Err(ValidationError::Arity {
            name: kind.name(),
            expected: kind.arity(),
            actual: args.len(),
        });
    }
    if kind == OperatorKind::Bound && !matches!(args, [Expression::Variable(_)]) {
        return Err(ValidationError::BoundRequiresVariable);
    }
    Ok(())
}

impl AggregateExpression {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.expression {
            Some(expression) => expression.validate(),
            None if self.function == AggregateFunction::Count => Ok(()),
            None => Err(ValidationError::Arity {
                name: self.function.kind().name(),
                expected: Arity::Exact(1),
                actual: 0,
            }),
        }
    }
}

impl Query {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.pattern().validate()
    }
}

impl Update {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for operation in &self.operations {
            match operation {
                UpdateOperation::InsertData { .. }
                | UpdateOperation::DeleteData { .. }
                | UpdateOperation::DeleteWhere { .. } => {}
                UpdateOperation::Modify { pattern, .. } => pattern.validate()?,
            }
        }
        Ok(())
    }
}

/// Rejects `left` and `right` if they share a non-distinguished variable or a blank node label.
fn check_disjoint_non_distinguished(
    left: &GraphPattern,
    right: &GraphPattern,
    operator: &'static str,
) -> Result<(), ValidationError> {
    let mut left_variables = Vec::new();
    collect_non_distinguished(left, &mut left_variables);
    let mut right_variables = Vec::new();
    collect_non_distinguished(right, &mut right_variables);

    match left_variables
        .into_iter()
        .find(|variable| right_variables.contains(variable))
    {
        Some(variable) => Err(ValidationError::SharedNonDistinguishedVariable(
            variable, operator,
        )),
        None => Ok(()),
    }
}

/// Collects the non-distinguished variables of the triple patterns in `pattern`. Blank nodes in
/// patterns behave like non-distinguished variables of the same name.
fn collect_non_distinguished(pattern: &GraphPattern, variables: &mut Vec<Variable>) {
    fn term(pattern: &TermPattern, variables: &mut Vec<Variable>) {
        let variable = match pattern {
            TermPattern::Variable(variable) if !variable.is_distinguished() => variable.clone(),
            TermPattern::Term(Term::BlankNode(node)) => Variable::non_distinguished(node.as_str()),
            TermPattern::Triple(triple) => return triple_pattern(triple, variables),
            TermPattern::Term(_) | TermPattern::Variable(_) => return,
        };
        if !variables.contains(&variable) {
            variables.push(variable);
        }
    }

    fn triple_pattern(pattern: &TriplePattern, variables: &mut Vec<Variable>) {
        term(&pattern.subject, variables);
        if let Some(variable) = pattern.predicate.variable() {
            if !variable.is_distinguished() && !variables.contains(variable) {
                variables.push(variable.clone());
            }
        }
        term(&pattern.object, variables);
    }

    match pattern {
        GraphPattern::Bgp { patterns } => {
            for pattern in patterns {
                triple_pattern(pattern, variables);
            }
        }
        GraphPattern::Path {
            subject, object, ..
        } => {
            term(subject, variables);
            term(object, variables);
        }
        _ => {
            for child in pattern.children() {
                collect_non_distinguished(child, variables);
            }
        }
    }
}

/// Checks that the projection of a grouped pattern (and the `HAVING` filters and extensions
/// between the projection and the group) only use grouping keys and aggregates.
fn check_grouped_scope(
    inner: &GraphPattern,
    projection: &[Variable],
) -> Result<(), ValidationError> {
    let mut chain = Vec::new();
    let mut current = inner;
    let (keys, aggregates) = loop {
        match current {
            GraphPattern::Group {
                keys, aggregates, ..
            } => break (keys, aggregates),
            GraphPattern::Extend { inner, .. } | GraphPattern::Filter { inner, .. } => {
                chain.push(current);
                current = inner;
            }
            GraphPattern::OrderBy { inner, .. }
            | GraphPattern::Distinct { inner }
            | GraphPattern::Reduced { inner }
            | GraphPattern::Slice { inner, .. } => current = inner,
            _ => return Ok(()),
        }
    };

    let mut allowed = keys
        .iter()
        .filter_map(|key| key.bound_variable())
        .chain(aggregates.iter().map(|(variable, _)| variable))
        .collect::<Vec<_>>();

    for pattern in chain.into_iter().rev() {
        match pattern {
            GraphPattern::Extend {
                variable,
                expression,
                ..
            } => {
                check_expression_scope(expression, &allowed)?;
                allowed.push(variable);
            }
            GraphPattern::Filter { expression, .. } => {
                check_expression_scope(expression, &allowed)?;
            }
            _ => {}
        }
    }

    match projection
        .iter()
        .find(|variable| !allowed.contains(variable))
    {
        Some(variable) => Err(ValidationError::UngroupedVariable(variable.clone())),
        None => Ok(()),
    }
}

/// Variables inside `EXISTS` are scoped to the inner pattern and are not checked.
fn check_expression_scope(
    expression: &Expression,
    allowed: &[&Variable],
) -> Result<(), ValidationError> {
    match expression {
        Expression::Variable(variable) if !allowed.contains(&variable) => {
            Err(ValidationError::UngroupedVariable(variable.clone()))
        }
        Expression::Operation(_, args) | Expression::Call(_, args) => args
            .iter()
            .try_for_each(|arg| check_expression_scope(arg, allowed)),
        Expression::Term(_) | Expression::Variable(_) | Expression::Exists(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GroupKey;
    use rdf_algebra_model::{BlankNode, Literal, NamedNode};

    fn var(name: &str) -> Variable {
        Variable::new_unchecked(name)
    }

    fn bgp(subject: impl Into<TermPattern>, object: impl Into<TermPattern>) -> GraphPattern {
        GraphPattern::Bgp {
            patterns: vec![TriplePattern::new(
                subject,
                NamedNode::new_unchecked("http://example.com/p"),
                object,
            )],
        }
    }

    #[test]
    fn bind_of_bound_variable() {
        let pattern = GraphPattern::Extend {
            inner: Box::new(bgp(var("s"), var("o"))),
            variable: var("o"),
            expression: Literal::from(1).into(),
        };
        assert_eq!(
            pattern.validate(),
            Err(ValidationError::VariableAlreadyBound(var("o")))
        );
    }

    #[test]
    fn join_with_shared_blank_node() {
        let blank = BlankNode::new_unchecked("b");
        let pattern = GraphPattern::Join {
            left: Box::new(bgp(var("s"), Term::from(blank.clone()))),
            right: Box::new(bgp(Term::from(blank), var("o"))),
        };
        assert_eq!(
            pattern.validate(),
            Err(ValidationError::SharedNonDistinguishedVariable(
                Variable::non_distinguished("b"),
                "join"
            ))
        );
    }

    #[test]
    fn join_with_shared_distinguished_variable() {
        let pattern = GraphPattern::Join {
            left: Box::new(bgp(var("s"), var("x"))),
            right: Box::new(bgp(var("x"), var("o"))),
        };
        assert_eq!(pattern.validate(), Ok(()));
    }

    #[test]
    fn projection_of_ungrouped_variable() {
        let group = GraphPattern::Group {
            inner: Box::new(bgp(var("s"), var("o"))),
            keys: vec![GroupKey::from(var("s"))],
            aggregates: vec![(
                var("c"),
                AggregateExpression::new(AggregateFunction::Count, var("o").into()),
            )],
        };

        let valid = GraphPattern::Project {
            inner: Box::new(group.clone()),
            variables: Some(vec![var("s"), var("c")]),
        };
        assert_eq!(valid.validate(), Ok(()));

        let invalid = GraphPattern::Project {
            inner: Box::new(group.clone()),
            variables: Some(vec![var("s"), var("o")]),
        };
        assert_eq!(
            invalid.validate(),
            Err(ValidationError::UngroupedVariable(var("o")))
        );

        let having = GraphPattern::Project {
            inner: Box::new(GraphPattern::Filter {
                expression: Expression::from(var("o")).greater(Literal::from(1).into()),
                inner: Box::new(group),
            }),
            variables: Some(vec![var("s")]),
        };
        assert_eq!(
            having.validate(),
            Err(ValidationError::UngroupedVariable(var("o")))
        );
    }

    #[test]
    fn extend_above_group_is_in_scope() {
        let pattern = GraphPattern::Project {
            inner: Box::new(GraphPattern::Extend {
                inner: Box::new(GraphPattern::Group {
                    inner: Box::new(bgp(var("s"), var("o"))),
                    keys: vec![],
                    aggregates: vec![(var("c"), AggregateExpression::count_solutions())],
                }),
                variable: var("d"),
                expression: Expression::operation(
                    OperatorKind::Multiply,
                    [var("c").into(), Literal::from(2).into()],
                ),
            }),
            variables: Some(vec![var("d")]),
        };
        assert_eq!(pattern.validate(), Ok(()));
    }

    #[test]
    fn wrong_arity() {
        let expression = Expression::operation(OperatorKind::StrLen, []);
        assert_eq!(
            expression.validate(),
            Err(ValidationError::Arity {
                name: "strlen",
                expected: Arity::Exact(1),
                actual: 0
            })
        );
    }

    #[test]
    fn bound_of_constant() {
        let expression = Expression::operation(OperatorKind::Bound, [Literal::from(1).into()]);
        assert_eq!(
            expression.validate(),
            Err(ValidationError::BoundRequiresVariable)
        );
    }

    #[test]
    fn path_range_message() {
        let error = ValidationError::InvalidPathRange {
            min: None,
            max: None,
        };
        assert_eq!(error.to_string(), "The path range {,} is invalid.");
    }
}
