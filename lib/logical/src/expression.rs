use crate::{GraphPattern, OperatorKind};
use rdf_algebra_model::{Literal, NamedNode, Term, Variable};

/// An expression that is evaluated against a single solution.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expression {
    /// A constant term.
    Term(Term),
    Variable(Variable),
    /// A builtin operator or function applied to its operands.
    Operation(OperatorKind, Vec<Expression>),
    /// `EXISTS`. `NOT EXISTS` is the negation of an [Expression::Exists].
    Exists(Box<GraphPattern>),
    /// A function identified by an IRI, like the XSD casts.
    Call(NamedNode, Vec<Expression>),
}

impl Expression {
    pub fn operation(kind: OperatorKind, args: impl IntoIterator<Item = Expression>) -> Self {
        Expression::Operation(kind, args.into_iter().collect())
    }

    pub fn and(self, other: Expression) -> Self {
        Self::operation(OperatorKind::And, [self, other])
    }

    pub fn or(self, other: Expression) -> Self {
        Self::operation(OperatorKind::Or, [self, other])
    }

    pub fn negate(self) -> Self {
        Self::operation(OperatorKind::Not, [self])
    }

    pub fn equal(self, other: Expression) -> Self {
        Self::operation(OperatorKind::Equal, [self, other])
    }

    pub fn less(self, other: Expression) -> Self {
        Self::operation(OperatorKind::Less, [self, other])
    }

    pub fn greater(self, other: Expression) -> Self {
        Self::operation(OperatorKind::Greater, [self, other])
    }

    pub fn not_exists(pattern: GraphPattern) -> Self {
        Expression::Exists(Box::new(pattern)).negate()
    }

    /// Returns `true` if this expression is the constant `true`.
    pub fn is_true_constant(&self) -> bool {
        matches!(self, Expression::Term(Term::Literal(literal)) if *literal == Literal::from(true))
    }

    /// Collects the variables that are referenced by this expression. Variables that only occur
    /// in the pattern of an `EXISTS` are included.
    pub fn collect_variables<'a>(&'a self, variables: &mut Vec<&'a Variable>) {
        match self {
            Expression::Term(_) => {}
            Expression::Variable(variable) => {
                if !variables.contains(&variable) {
                    variables.push(variable)
                }
            }
            Expression::Operation(_, args) | Expression::Call(_, args) => {
                for arg in args {
                    arg.collect_variables(variables)
                }
            }
            Expression::Exists(pattern) => {
                for variable in pattern.in_scope_variables() {
                    if !variables.contains(&variable) {
                        variables.push(variable)
                    }
                }
            }
        }
    }
}

impl From<Term> for Expression {
    fn from(value: Term) -> Self {
        Expression::Term(value)
    }
}

impl From<Literal> for Expression {
    fn from(value: Literal) -> Self {
        Expression::Term(value.into())
    }
}

impl From<NamedNode> for Expression {
    fn from(value: NamedNode) -> Self {
        Expression::Term(value.into())
    }
}

impl From<Variable> for Expression {
    fn from(value: Variable) -> Self {
        Expression::Variable(value)
    }
}

/// The aggregate functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AggregateFunction {
    Count,
    Sum,
    Avg,
    Min,
    Max,
    Sample,
    GroupConcat,
}

impl AggregateFunction {
    pub fn kind(self) -> OperatorKind {
        match self {
            AggregateFunction::Count => OperatorKind::Count,
            AggregateFunction::Sum => OperatorKind::Sum,
            AggregateFunction::Avg => OperatorKind::Avg,
            AggregateFunction::Min => OperatorKind::Min,
            AggregateFunction::Max => OperatorKind::Max,
            AggregateFunction::Sample => OperatorKind::Sample,
            AggregateFunction::GroupConcat => OperatorKind::GroupConcat,
        }
    }

    pub fn from_kind(kind: OperatorKind) -> Option<Self> {
        Some(match kind {
            OperatorKind::Count => AggregateFunction::Count,
            OperatorKind::Sum => AggregateFunction::Sum,
            OperatorKind::Avg => AggregateFunction::Avg,
            OperatorKind::Min => AggregateFunction::Min,
            OperatorKind::Max => AggregateFunction::Max,
            OperatorKind::Sample => AggregateFunction::Sample,
            OperatorKind::GroupConcat => AggregateFunction::GroupConcat,
            _ => return None,
        })
    }
}

/// An aggregate, e.g. `COUNT(DISTINCT ?x)`.
///
/// The modifiers are decided when the aggregate is created and never change afterward.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AggregateExpression {
    pub function: AggregateFunction,
    pub distinct: bool,
    /// The operand. [None] stands for `*`, which is only valid for `COUNT`.
    pub expression: Option<Expression>,
    /// The separator of `GROUP_CONCAT`.
    pub separator: Option<String>,
}

impl AggregateExpression {
    pub fn new(function: AggregateFunction, expression: Expression) -> Self {
        Self {
            function,
            distinct: false,
            expression: Some(expression),
            separator: None,
        }
    }

    /// `COUNT(*)`
    pub fn count_solutions() -> Self {
        Self {
            function: AggregateFunction::Count,
            distinct: false,
            expression: None,
            separator: None,
        }
    }

    #[must_use]
    pub fn with_distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }
}

/// A key of an `ORDER BY` clause.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum OrderExpression {
    Asc(Expression),
    Desc(Expression),
}

impl OrderExpression {
    pub fn expression(&self) -> &Expression {
        match self {
            OrderExpression::Asc(expression) | OrderExpression::Desc(expression) => expression,
        }
    }
}

/// A key of a `GROUP BY` clause. A key with a variable binds the value of the key expression
/// (`GROUP BY (?x + 1 AS ?y)`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub expression: Expression,
    pub variable: Option<Variable>,
}

impl GroupKey {
    /// The variable that the key binds in the output of the group, if any.
    pub fn bound_variable(&self) -> Option<&Variable> {
        match (&self.variable, &self.expression) {
            (Some(variable), _) | (None, Expression::Variable(variable)) => Some(variable),
            _ => None,
        }
    }
}

impl From<Variable> for GroupKey {
    fn from(value: Variable) -> Self {
        Self {
            expression: Expression::Variable(value),
            variable: None,
        }
    }
}
