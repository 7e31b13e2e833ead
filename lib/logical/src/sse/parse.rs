use crate::sse::lexer::{DatatypeToken, Lexer, Token};
use crate::sse::write::{is_decimal_lexical, is_double_lexical, is_integer_lexical};
use crate::sse::SseParseError;
use crate::{
    AggregateExpression, AggregateFunction, Capability, Expression, GraphPattern, GroupKey,
    Operation, OperatorKind, OrderExpression, PropertyPath, Query, QueryDataset, Update,
    UpdateOperation, ValidationError,
};
use rdf_algebra_model::vocab::xsd;
use rdf_algebra_model::{
    term_to_subject, BlankNode, GraphName, GraphNamePattern, Iri, Literal, NamedNode,
    NamedNodePattern, Quad, QuadPattern, Term, TermPattern, Triple, TriplePattern, Variable,
};
use rustc_hash::FxHashMap;
use std::str::FromStr;

type ParseResult<T> = Result<T, SseParseError>;

/// A parsed S-expression.
enum Sexpr {
    List(Vec<Sexpr>, usize),
    Atom(Token, usize),
}

impl Sexpr {
    fn position(&self) -> usize {
        match self {
            Sexpr::List(_, position) | Sexpr::Atom(_, position) => *position,
        }
    }

    fn symbol(&self) -> Option<&str> {
        match self {
            Sexpr::Atom(Token::Symbol(symbol), _) => Some(symbol),
            _ => None,
        }
    }
}

/// Reads exactly one S-expression.
fn read(input: &str) -> ParseResult<Sexpr> {
    let mut stack: Vec<(Vec<Sexpr>, usize)> = Vec::new();
    let mut root = None;
    for token in Lexer::new(input) {
        let (token, position) = token?;
        let sexpr = match token {
            Token::Open => {
                stack.push((Vec::new(), position));
                continue;
            }
            Token::Close => {
                let Some((items, start)) = stack.pop() else {
                    return Err(SseParseError::syntax("Unbalanced ')'", position));
                };
                Sexpr::List(items, start)
            }
            token => Sexpr::Atom(token, position),
        };
        match stack.last_mut() {
            Some((items, _)) => items.push(sexpr),
            None if root.is_none() => root = Some(sexpr),
            None => return Err(SseParseError::syntax("Unexpected trailing input", position)),
        }
    }

    if let Some((_, start)) = stack.last() {
        return Err(SseParseError::syntax("Unbalanced '('", *start));
    }
    root.ok_or_else(|| SseParseError::syntax("Empty input", input.len()))
}

/// Splits a list into its operator name and its operands.
fn list(sexpr: &Sexpr) -> ParseResult<(&str, &[Sexpr], usize)> {
    match sexpr {
        Sexpr::List(items, position) => match items.split_first() {
            Some((Sexpr::Atom(Token::Symbol(name), _), args)) => Ok((name, args, *position)),
            _ => Err(SseParseError::syntax("Expected an operator name", *position)),
        },
        Sexpr::Atom(_, position) => Err(SseParseError::syntax("Expected a list", *position)),
    }
}

fn items(sexpr: &Sexpr) -> ParseResult<&[Sexpr]> {
    match sexpr {
        Sexpr::List(items, _) => Ok(items),
        Sexpr::Atom(_, position) => Err(SseParseError::syntax("Expected a list", *position)),
    }
}

fn variable(sexpr: &Sexpr) -> ParseResult<Variable> {
    match sexpr {
        Sexpr::Atom(Token::Variable(name), position) => Variable::new(name.as_str())
            .map_err(|error| SseParseError::syntax(error.to_string(), *position)),
        Sexpr::Atom(Token::NonDistinguishedVariable(name), _) => {
            Ok(Variable::non_distinguished(name.as_str()))
        }
        _ => Err(SseParseError::syntax(
            "Expected a variable",
            sexpr.position(),
        )),
    }
}

fn is_variable(sexpr: &Sexpr) -> bool {
    matches!(
        sexpr,
        Sexpr::Atom(Token::Variable(_) | Token::NonDistinguishedVariable(_), _)
    )
}

/// Parses a non-negative number. `_` stands for [None].
fn optional_number<T: FromStr>(sexpr: &Sexpr) -> ParseResult<Option<T>> {
    match sexpr.symbol() {
        Some("_") => Ok(None),
        Some(symbol) => symbol
            .parse()
            .map(Some)
            .map_err(|_| SseParseError::syntax("Expected a number", sexpr.position())),
        None => Err(SseParseError::syntax("Expected a number", sexpr.position())),
    }
}

fn number<T: FromStr>(sexpr: &Sexpr) -> ParseResult<T> {
    optional_number(sexpr)?
        .ok_or_else(|| SseParseError::syntax("Expected a number", sexpr.position()))
}

/// The declarations that are visible while parsing a sub-tree.
#[derive(Clone, Default)]
struct Scope {
    base: Option<Iri<String>>,
    prefixes: FxHashMap<String, String>,
}

/// A `prefix` or `base` node that wraps the pattern it applies to.
enum Declaration {
    Prefix(Vec<(String, NamedNode)>),
    Base(NamedNode),
}

impl Declaration {
    fn wrap(self, inner: GraphPattern) -> GraphPattern {
        let inner = Box::new(inner);
        match self {
            Declaration::Prefix(prefixes) => GraphPattern::Prefix { prefixes, inner },
            Declaration::Base(iri) => GraphPattern::Base { iri, inner },
        }
    }
}

#[derive(Default)]
struct Parser {
    scope: Scope,
}

impl Parser {
    /// Looks up an operator and checks its arity.
    fn operator(
        name: &str,
        capability: Capability,
        arity: usize,
    ) -> ParseResult<OperatorKind> {
        let kind = OperatorKind::lookup(name, capability, arity)
            .ok_or_else(|| ValidationError::UnknownOperator(name.to_owned()))?;
        if !kind.arity().accepts(arity) {
            return Err(ValidationError::Arity {
                name: kind.name(),
                expected: kind.arity(),
                actual: arity,
            }
            .into());
        }
        Ok(kind)
    }

    fn operation(&mut self, sexpr: &Sexpr) -> ParseResult<Operation> {
        let (name, args, _) = list(sexpr)?;
        match (name, args) {
            ("prefix" | "base", [declaration, inner]) => {
                let (declaration, saved) = self.declare(name, declaration)?;
                let inner = self.operation(inner);
                self.scope = saved;
                Ok(match inner? {
                    Operation::Query(mut query) => {
                        let pattern = std::mem::replace(query.pattern_mut(), GraphPattern::unit());
                        *query.pattern_mut() = declaration.wrap(pattern);
                        Operation::Query(query)
                    }
                    update => update,
                })
            }
            ("ask" | "construct" | "describe", _) => Ok(Operation::Query(self.query(sexpr)?)),
            ("update", operations) => Ok(Operation::Update(Update::new(
                operations
                    .iter()
                    .map(|operation| self.update_operation(operation))
                    .collect::<ParseResult<Vec<_>>>()?,
            ))),
            _ if OperatorKind::lookup(name, Capability::Update, args.len()).is_some() => {
                Ok(Operation::Update(Update::new([
                    self.update_operation(sexpr)?
                ])))
            }
            _ => Ok(Operation::Query(Query::Select(self.pattern(sexpr)?))),
        }
    }

    fn query(&mut self, sexpr: &Sexpr) -> ParseResult<Query> {
        let (name, args, _) = list(sexpr)?;
        let kind = Self::operator(name, Capability::Query, args.len())?;
        Ok(match (kind, args) {
            (OperatorKind::Ask, [pattern]) => Query::Ask(self.pattern(pattern)?),
            (OperatorKind::Construct, [template, pattern]) => Query::Construct {
                template: items(template)?
                    .iter()
                    .map(|triple| self.triple_pattern(triple))
                    .collect::<ParseResult<_>>()?,
                pattern: self.pattern(pattern)?,
            },
            (OperatorKind::Describe, [terms, pattern]) => Query::Describe {
                terms: items(terms)?
                    .iter()
                    .map(|term| self.term_pattern(term))
                    .collect::<ParseResult<_>>()?,
                pattern: self.pattern(pattern)?,
            },
            _ => Query::Select(self.pattern(sexpr)?),
        })
    }

    /// Applies a `prefix` or `base` declaration to the scope. Returns the previous scope.
    fn declare(&mut self, name: &str, sexpr: &Sexpr) -> ParseResult<(Declaration, Scope)> {
        let saved = self.scope.clone();
        let declaration = if name == "prefix" {
            let mut prefixes = Vec::new();
            for declaration in items(sexpr)? {
                let (prefix, iri) = match items(declaration)? {
                    [prefix, iri] => (prefix, iri),
                    _ => {
                        return Err(SseParseError::syntax(
                            "Expected a prefix declaration",
                            declaration.position(),
                        ))
                    }
                };
                let Some(prefix) = prefix.symbol().and_then(|p| p.strip_suffix(':')) else {
                    return Err(SseParseError::syntax("Expected a prefix", prefix.position()));
                };
                let iri = self.named_node(iri)?;
                self.scope
                    .prefixes
                    .insert(prefix.to_owned(), iri.as_str().to_owned());
                prefixes.push((prefix.to_owned(), iri));
            }
            Declaration::Prefix(prefixes)
        } else {
            let iri = self.named_node(sexpr)?;
            self.scope.base = Some(
                Iri::parse(iri.as_str().to_owned())
                    .map_err(|error| SseParseError::syntax(error.to_string(), sexpr.position()))?,
            );
            Declaration::Base(iri)
        };
        Ok((declaration, saved))
    }

    fn pattern(&mut self, sexpr: &Sexpr) -> ParseResult<GraphPattern> {
        let (name, args, position) = list(sexpr)?;
        let kind = Self::operator(name, Capability::Query, args.len())?;
        Ok(match (kind, args) {
            (OperatorKind::Bgp, triples) => GraphPattern::Bgp {
                patterns: triples
                    .iter()
                    .map(|triple| self.triple_pattern(triple))
                    .collect::<ParseResult<_>>()?,
            },
            (OperatorKind::Path, [subject, path, object]) => GraphPattern::Path {
                subject: self.term_pattern(subject)?,
                path: self.path(path)?,
                object: self.term_pattern(object)?,
            },
            (OperatorKind::Join, [left, right]) => GraphPattern::Join {
                left: Box::new(self.pattern(left)?),
                right: Box::new(self.pattern(right)?),
            },
            (OperatorKind::LeftJoin, [left, right, expression @ ..]) => GraphPattern::LeftJoin {
                left: Box::new(self.pattern(left)?),
                right: Box::new(self.pattern(right)?),
                expression: match expression {
                    [expression] => Some(self.expression(expression)?),
                    _ => None,
                },
            },
            (OperatorKind::Filter, [expression, inner]) => GraphPattern::Filter {
                expression: self.filter_expression(expression)?,
                inner: Box::new(self.pattern(inner)?),
            },
            (OperatorKind::Union, [left, right]) => GraphPattern::Union {
                left: Box::new(self.pattern(left)?),
                right: Box::new(self.pattern(right)?),
            },
            (OperatorKind::Minus, [left, right]) => GraphPattern::Minus {
                left: Box::new(self.pattern(left)?),
                right: Box::new(self.pattern(right)?),
            },
            (OperatorKind::Graph, [name, inner]) => GraphPattern::Graph {
                name: if is_variable(name) {
                    NamedNodePattern::Variable(variable(name)?)
                } else {
                    NamedNodePattern::NamedNode(self.named_node(name)?)
                },
                inner: Box::new(self.pattern(inner)?),
            },
            (OperatorKind::Extend, [bindings, inner]) => {
                let mut pattern = self.pattern(inner)?;
                // Later bindings may use the earlier ones.
                for binding in items(bindings)? {
                    let [variable_sexpr, expression] = items(binding)? else {
                        return Err(SseParseError::syntax(
                            "Expected a binding",
                            binding.position(),
                        ));
                    };
                    pattern = GraphPattern::Extend {
                        inner: Box::new(pattern),
                        variable: variable(variable_sexpr)?,
                        expression: self.expression(expression)?,
                    };
                }
                pattern
            }
            (OperatorKind::Table, args) => self.table(args, position)?,
            (OperatorKind::OrderBy, [keys, inner]) => GraphPattern::OrderBy {
                expression: items(keys)?
                    .iter()
                    .map(|key| self.order_expression(key))
                    .collect::<ParseResult<_>>()?,
                inner: Box::new(self.pattern(inner)?),
            },
            (OperatorKind::Project, [variables, inner]) => GraphPattern::Project {
                variables: match variables.symbol() {
                    Some("*") => None,
                    _ => Some(
                        items(variables)?
                            .iter()
                            .map(variable)
                            .collect::<ParseResult<_>>()?,
                    ),
                },
                inner: Box::new(self.pattern(inner)?),
            },
            (OperatorKind::Distinct, [inner]) => GraphPattern::Distinct {
                inner: Box::new(self.pattern(inner)?),
            },
            (OperatorKind::Reduced, [inner]) => GraphPattern::Reduced {
                inner: Box::new(self.pattern(inner)?),
            },
            (OperatorKind::Slice, [start, length, inner]) => GraphPattern::Slice {
                start: optional_number(start)?.unwrap_or(0),
                length: optional_number(length)?,
                inner: Box::new(self.pattern(inner)?),
            },
            (OperatorKind::Group, [keys, aggregates, inner]) => GraphPattern::Group {
                keys: items(keys)?
                    .iter()
                    .map(|key| self.group_key(key))
                    .collect::<ParseResult<_>>()?,
                aggregates: items(aggregates)?
                    .iter()
                    .map(|aggregate| self.aggregate_binding(aggregate))
                    .collect::<ParseResult<_>>()?,
                inner: Box::new(self.pattern(inner)?),
            },
            (OperatorKind::Dataset, [clauses @ .., inner]) => GraphPattern::Dataset {
                dataset: self.dataset(clauses)?,
                inner: Box::new(self.pattern(inner)?),
            },
            (OperatorKind::Prefix | OperatorKind::Base, [declaration, inner]) => {
                let (declaration, saved) = self.declare(name, declaration)?;
                let inner = self.pattern(inner);
                self.scope = saved;
                declaration.wrap(inner?)
            }
            (OperatorKind::Ask | OperatorKind::Construct | OperatorKind::Describe, _) => {
                return Err(SseParseError::syntax(
                    format!("{name} is only allowed at the root"),
                    position,
                ))
            }
            _ => {
                return Err(SseParseError::syntax(
                    format!("Unexpected operands of {name}"),
                    position,
                ))
            }
        })
    }

    fn table(&self, args: &[Sexpr], position: usize) -> ParseResult<GraphPattern> {
        match args {
            [unit] if unit.symbol() == Some("unit") => {
                return Ok(GraphPattern::Values {
                    variables: Vec::new(),
                    bindings: vec![Vec::new()],
                })
            }
            [empty] if empty.symbol() == Some("empty") => {
                return Ok(GraphPattern::Values {
                    variables: Vec::new(),
                    bindings: Vec::new(),
                })
            }
            _ => {}
        }

        let Some((vars, rows)) = args.split_first() else {
            return Err(SseParseError::syntax("Expected the table variables", position));
        };
        let variables = match list(vars)? {
            ("vars", variables, _) => variables
                .iter()
                .map(variable)
                .collect::<ParseResult<Vec<_>>>()?,
            _ => {
                return Err(SseParseError::syntax(
                    "Expected the table variables",
                    vars.position(),
                ))
            }
        };

        let mut bindings = Vec::new();
        for row in rows {
            let ("row", values, _) = list(row)? else {
                return Err(SseParseError::syntax("Expected a row", row.position()));
            };
            let mut binding = vec![None; variables.len()];
            for value in values {
                let [name, term] = items(value)? else {
                    return Err(SseParseError::syntax("Expected a binding", value.position()));
                };
                let name = variable(name)?;
                let Some(index) = variables.iter().position(|v| *v == name) else {
                    return Err(SseParseError::syntax(
                        format!("{name} is not a variable of the table"),
                        value.position(),
                    ));
                };
                binding[index] = Some(self.term(term)?);
            }
            bindings.push(binding);
        }

        Ok(GraphPattern::Values {
            variables,
            bindings,
        })
    }

    fn order_expression(&mut self, sexpr: &Sexpr) -> ParseResult<OrderExpression> {
        if let Sexpr::List(items, _) = sexpr {
            match items.as_slice() {
                [direction, expression] if direction.symbol() == Some("asc") => {
                    return Ok(OrderExpression::Asc(self.expression(expression)?))
                }
                [direction, expression] if direction.symbol() == Some("desc") => {
                    return Ok(OrderExpression::Desc(self.expression(expression)?))
                }
                _ => {}
            }
        }
        Ok(OrderExpression::Asc(self.expression(sexpr)?))
    }

    fn group_key(&mut self, sexpr: &Sexpr) -> ParseResult<GroupKey> {
        if let Sexpr::List(items, _) = sexpr {
            if let [name, expression] = items.as_slice() {
                if is_variable(name) {
                    return Ok(GroupKey {
                        expression: self.expression(expression)?,
                        variable: Some(variable(name)?),
                    });
                }
            }
        }
        Ok(GroupKey {
            expression: self.expression(sexpr)?,
            variable: None,
        })
    }

    fn aggregate_binding(
        &mut self,
        sexpr: &Sexpr,
    ) -> ParseResult<(Variable, AggregateExpression)> {
        let [name, aggregate] = items(sexpr)? else {
            return Err(SseParseError::syntax(
                "Expected an aggregate binding",
                sexpr.position(),
            ));
        };
        Ok((variable(name)?, self.aggregate(aggregate)?))
    }

    fn aggregate(&mut self, sexpr: &Sexpr) -> ParseResult<AggregateExpression> {
        let (name, mut args, position) = list(sexpr)?;
        let kind = Self::operator(name, Capability::Aggregate, args.len())?;
        let Some(function) = AggregateFunction::from_kind(kind) else {
            return Err(ValidationError::UnknownOperator(name.to_owned()).into());
        };

        let mut distinct = false;
        if let [first, rest @ ..] = args {
            if first.symbol() == Some("distinct") {
                distinct = true;
                args = rest;
            }
        }

        let mut separator = None;
        if let [Sexpr::List(items, _), rest @ ..] = args {
            if let [keyword, Sexpr::Atom(Token::Literal { value, .. }, _)] = items.as_slice() {
                if function == AggregateFunction::GroupConcat
                    && keyword.symbol() == Some("separator")
                {
                    separator = Some(value.clone());
                    args = rest;
                }
            }
        }

        let expression = match args {
            [] => None,
            [expression] => Some(self.expression(expression)?),
            _ => {
                return Err(SseParseError::syntax(
                    format!("Unexpected operands of {name}"),
                    position,
                ))
            }
        };

        Ok(AggregateExpression {
            function,
            distinct,
            expression,
            separator,
        })
    }

    fn dataset(&self, clauses: &[Sexpr]) -> ParseResult<QueryDataset> {
        let mut dataset = QueryDataset::default();
        for clause in clauses {
            let (name, graphs, position) = list(clause)?;
            let graphs = graphs
                .iter()
                .map(|graph| self.named_node(graph))
                .collect::<ParseResult<Vec<_>>>()?;
            match name {
                "default" => dataset.default.extend(graphs),
                "named" => dataset.named.get_or_insert_with(Vec::new).extend(graphs),
                _ => {
                    return Err(SseParseError::syntax(
                        "Expected a default or named clause",
                        position,
                    ))
                }
            }
        }
        Ok(dataset)
    }

    /// `filter` also accepts a list of conjuncts: `(exprlist e1 e2)`.
    fn filter_expression(&mut self, sexpr: &Sexpr) -> ParseResult<Expression> {
        if let Ok(("exprlist", conjuncts, position)) = list(sexpr) {
            return conjuncts
                .iter()
                .map(|conjunct| self.expression(conjunct))
                .reduce(|lhs, rhs| Ok(lhs?.and(rhs?)))
                .unwrap_or_else(|| Err(SseParseError::syntax("Empty expression list", position)));
        }
        self.expression(sexpr)
    }

    fn expression(&mut self, sexpr: &Sexpr) -> ParseResult<Expression> {
        let items = match sexpr {
            Sexpr::Atom(Token::Variable(_) | Token::NonDistinguishedVariable(_), _) => {
                return Ok(Expression::Variable(variable(sexpr)?))
            }
            Sexpr::Atom(..) => return Ok(Expression::Term(self.term(sexpr)?)),
            Sexpr::List(items, _) => items,
        };

        let Some((head, args)) = items.split_first() else {
            return Err(SseParseError::syntax(
                "Expected an expression",
                sexpr.position(),
            ));
        };
        let name = match head {
            Sexpr::Atom(Token::Iri(_), _) => {
                return Ok(Expression::Call(self.named_node(head)?, self.expressions(args)?))
            }
            Sexpr::Atom(Token::Symbol(name), _) => name.as_str(),
            _ => {
                return Err(SseParseError::syntax(
                    "Expected an operator name",
                    head.position(),
                ))
            }
        };

        match (name, args) {
            ("exists", [pattern]) => Ok(Expression::Exists(Box::new(self.pattern(pattern)?))),
            ("notexists", [pattern]) => Ok(Expression::not_exists(self.pattern(pattern)?)),
            ("call", [function, args @ ..]) => Ok(Expression::Call(
                self.named_node(function)?,
                self.expressions(args)?,
            )),
            ("qtriple", _) => Ok(Expression::Term(self.term(sexpr)?)),
            // Functions named by a prefixed IRI, e.g. `(xsd:integer ?x)`.
            (name, args) if name.contains(':') => {
                Ok(Expression::Call(self.named_node(head)?, self.expressions(args)?))
            }
            (name, args) => {
                let kind = Self::operator(name, Capability::Evaluatable, args.len())?;
                Ok(Expression::Operation(kind, self.expressions(args)?))
            }
        }
    }

    fn expressions(&mut self, args: &[Sexpr]) -> ParseResult<Vec<Expression>> {
        args.iter().map(|arg| self.expression(arg)).collect()
    }

    fn path(&self, sexpr: &Sexpr) -> ParseResult<PropertyPath> {
        let (name, args, position) = match sexpr {
            Sexpr::Atom(..) => return Ok(PropertyPath::Link(self.named_node(sexpr)?)),
            Sexpr::List(..) => list(sexpr)?,
        };
        let kind = Self::operator(name, Capability::Path, args.len())?;
        Ok(match (kind, args) {
            (OperatorKind::Reverse, [inner]) => PropertyPath::inverse(self.path(inner)?),
            (OperatorKind::Sequence, [lhs, rhs]) => {
                PropertyPath::sequence(self.path(lhs)?, self.path(rhs)?)
            }
            (OperatorKind::Alternative, [lhs, rhs]) => {
                PropertyPath::alternative(self.path(lhs)?, self.path(rhs)?)
            }
            (OperatorKind::ZeroOrOne, [inner]) => PropertyPath::zero_or_one(self.path(inner)?),
            (OperatorKind::ZeroOrMore, [inner]) => PropertyPath::zero_or_more(self.path(inner)?),
            (OperatorKind::OneOrMore, [inner]) => PropertyPath::one_or_more(self.path(inner)?),
            (OperatorKind::ZeroLength, []) => PropertyPath::ZeroLength,
            (OperatorKind::NegatedPropertySet, nodes) => PropertyPath::NegatedPropertySet(
                nodes
                    .iter()
                    .map(|node| self.named_node(node))
                    .collect::<ParseResult<_>>()?,
            ),
            (OperatorKind::Range, [min, max, inner]) => {
                PropertyPath::range(optional_number(min)?, optional_number(max)?, self.path(inner)?)?
            }
            (OperatorKind::Repeat, [count, inner]) => {
                PropertyPath::repeat(number(count)?, self.path(inner)?)?
            }
            _ => {
                return Err(SseParseError::syntax(
                    format!("Unexpected operands of {name}"),
                    position,
                ))
            }
        })
    }

    fn update_operation(&mut self, sexpr: &Sexpr) -> ParseResult<UpdateOperation> {
        let (name, args, position) = list(sexpr)?;
        let kind = Self::operator(name, Capability::Update, args.len())?;
        let (silent, args) = match args {
            [first, rest @ ..] if first.symbol() == Some("silent") => (true, rest),
            args => (false, args),
        };

        Ok(match kind {
            OperatorKind::InsertData => UpdateOperation::InsertData {
                data: self.quads(args)?,
                silent,
            },
            OperatorKind::DeleteData => UpdateOperation::DeleteData {
                data: self.quads(args)?,
                silent,
            },
            OperatorKind::DeleteWhere => UpdateOperation::DeleteWhere {
                pattern: self.quad_patterns(args)?,
                silent,
            },
            OperatorKind::Modify => {
                let Some((pattern, templates)) = args.split_last() else {
                    return Err(SseParseError::syntax("Expected a pattern", position));
                };
                let mut delete = Vec::new();
                let mut insert = Vec::new();
                for template in templates {
                    match list(template)? {
                        ("delete", quads, _) => delete = self.quad_patterns(quads)?,
                        ("insert", quads, _) => insert = self.quad_patterns(quads)?,
                        _ => {
                            return Err(SseParseError::syntax(
                                "Expected a delete or insert template",
                                template.position(),
                            ))
                        }
                    }
                }
                UpdateOperation::Modify {
                    delete,
                    insert,
                    pattern: Box::new(self.pattern(pattern)?),
                    silent,
                }
            }
            _ => {
                return Err(SseParseError::syntax(
                    format!("Unexpected operation {name}"),
                    position,
                ))
            }
        })
    }

    fn quads(&self, args: &[Sexpr]) -> ParseResult<Vec<Quad>> {
        args.iter()
            .map(|arg| {
                let pattern = self.quad_pattern(arg)?;
                let graph_name = match pattern.graph_name {
                    GraphNamePattern::DefaultGraph => GraphName::DefaultGraph,
                    GraphNamePattern::NamedNode(graph) => GraphName::NamedNode(graph),
                    GraphNamePattern::Variable(_) => {
                        return Err(SseParseError::syntax(
                            "Data must not contain variables",
                            arg.position(),
                        ))
                    }
                };
                pattern
                    .pattern
                    .to_triple()
                    .map(|triple| triple.in_graph(graph_name))
                    .ok_or_else(|| {
                        SseParseError::syntax("Data must not contain variables", arg.position())
                    })
            })
            .collect()
    }

    fn quad_patterns(&self, args: &[Sexpr]) -> ParseResult<Vec<QuadPattern>> {
        args.iter().map(|arg| self.quad_pattern(arg)).collect()
    }

    /// `(triple s p o)` in the default graph or `(quad g s p o)`.
    fn quad_pattern(&self, sexpr: &Sexpr) -> ParseResult<QuadPattern> {
        match list(sexpr)? {
            ("triple", _, _) => Ok(QuadPattern::new(
                self.triple_pattern(sexpr)?,
                GraphNamePattern::DefaultGraph,
            )),
            ("quad", [graph, subject, predicate, object], _) => {
                let graph_name = if is_variable(graph) {
                    GraphNamePattern::Variable(variable(graph)?)
                } else {
                    GraphNamePattern::NamedNode(self.named_node(graph)?)
                };
                Ok(QuadPattern::new(
                    self.triple_pattern_of(subject, predicate, object)?,
                    graph_name,
                ))
            }
            (_, _, position) => Err(SseParseError::syntax("Expected a triple or quad", position)),
        }
    }

    fn triple_pattern(&self, sexpr: &Sexpr) -> ParseResult<TriplePattern> {
        match list(sexpr)? {
            ("triple", [subject, predicate, object], _) => {
                self.triple_pattern_of(subject, predicate, object)
            }
            (_, _, position) => Err(SseParseError::syntax("Expected a triple", position)),
        }
    }

    fn triple_pattern_of(
        &self,
        subject: &Sexpr,
        predicate: &Sexpr,
        object: &Sexpr,
    ) -> ParseResult<TriplePattern> {
        let predicate = if is_variable(predicate) {
            NamedNodePattern::Variable(variable(predicate)?)
        } else {
            NamedNodePattern::NamedNode(self.named_node(predicate)?)
        };
        Ok(TriplePattern {
            subject: self.term_pattern(subject)?,
            predicate,
            object: self.term_pattern(object)?,
        })
    }

    fn term_pattern(&self, sexpr: &Sexpr) -> ParseResult<TermPattern> {
        if is_variable(sexpr) {
            return Ok(TermPattern::Variable(variable(sexpr)?));
        }
        if let Ok(("qtriple", [subject, predicate, object], _)) = list(sexpr) {
            let pattern = self.triple_pattern_of(subject, predicate, object)?;
            return Ok(match pattern.to_triple() {
                Some(triple) => TermPattern::Term(triple.into()),
                None => TermPattern::Triple(Box::new(pattern)),
            });
        }
        Ok(TermPattern::Term(self.term(sexpr)?))
    }

    fn term(&self, sexpr: &Sexpr) -> ParseResult<Term> {
        let position = sexpr.position();
        let syntax = |message: String| SseParseError::syntax(message, position);
        let token = match sexpr {
            Sexpr::Atom(token, _) => token,
            Sexpr::List(..) => {
                let ("qtriple", [subject, predicate, object], _) = list(sexpr)? else {
                    return Err(syntax("Expected a term".to_owned()));
                };
                let subject = term_to_subject(self.term(subject)?)
                    .ok_or_else(|| syntax("A literal cannot be a subject".to_owned()))?;
                return Ok(Term::Triple(Box::new(Triple::new(
                    subject,
                    self.named_node(predicate)?,
                    self.term(object)?,
                ))));
            }
        };

        Ok(match token {
            Token::Iri(_) => self.named_node(sexpr)?.into(),
            Token::BlankNode(label) => BlankNode::new(label.as_str())
                .map_err(|error| syntax(error.to_string()))?
                .into(),
            Token::Literal {
                value,
                language,
                datatype,
            } => match (language, datatype) {
                (Some(language), _) => {
                    Literal::new_language_tagged_literal(value.as_str(), language.as_str())
                        .map_err(|error| syntax(error.to_string()))?
                        .into()
                }
                (None, Some(DatatypeToken::Iri(iri))) => {
                    Literal::new_typed_literal(value.as_str(), self.resolve(iri, position)?).into()
                }
                (None, Some(DatatypeToken::PrefixedName(name))) => {
                    Literal::new_typed_literal(value.as_str(), self.expand(name, position)?).into()
                }
                (None, None) => Literal::new_simple_literal(value.as_str()).into(),
            },
            Token::Symbol(symbol) => match symbol.as_str() {
                "true" => Literal::from(true).into(),
                "false" => Literal::from(false).into(),
                s if is_integer_lexical(s) => Literal::new_typed_literal(s, xsd::INTEGER).into(),
                s if is_decimal_lexical(s) => Literal::new_typed_literal(s, xsd::DECIMAL).into(),
                s if is_double_lexical(s) => Literal::new_typed_literal(s, xsd::DOUBLE).into(),
                s if s.contains(':') => self.expand(s, position)?.into(),
                s => return Err(syntax(format!("Unexpected symbol {s}"))),
            },
            Token::Variable(_) | Token::NonDistinguishedVariable(_) => {
                return Err(syntax("Expected a term but found a variable".to_owned()))
            }
            Token::Open | Token::Close => return Err(syntax("Expected a term".to_owned())),
        })
    }

    fn named_node(&self, sexpr: &Sexpr) -> ParseResult<NamedNode> {
        match sexpr {
            Sexpr::Atom(Token::Iri(iri), position) => self.resolve(iri, *position),
            Sexpr::Atom(Token::Symbol(name), position) if name.contains(':') => {
                self.expand(name, *position)
            }
            _ => Err(SseParseError::syntax("Expected an IRI", sexpr.position())),
        }
    }

    /// Resolves a possibly relative IRI against the base.
    fn resolve(&self, iri: &str, position: usize) -> ParseResult<NamedNode> {
        let resolved = match &self.scope.base {
            Some(base) => base.resolve(iri).map(Iri::into_inner),
            None => Iri::parse(iri.to_owned()).map(Iri::into_inner),
        };
        resolved
            .map(NamedNode::new_unchecked)
            .map_err(|error| SseParseError::syntax(error.to_string(), position))
    }

    /// Expands a prefixed name.
    fn expand(&self, name: &str, position: usize) -> ParseResult<NamedNode> {
        let Some((prefix, local)) = name.split_once(':') else {
            return Err(SseParseError::syntax("Expected a prefixed name", position));
        };
        let Some(namespace) = self.scope.prefixes.get(prefix) else {
            return Err(SseParseError::syntax(
                format!("Unknown prefix {prefix}:"),
                position,
            ));
        };
        NamedNode::new(format!("{namespace}{local}"))
            .map_err(|error| SseParseError::syntax(error.to_string(), position))
    }
}

impl FromStr for Operation {
    type Err = SseParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let operation = Parser::default().operation(&read(s)?)?;
        match &operation {
            Operation::Query(query) => query.validate()?,
            Operation::Update(update) => update.validate()?,
        }
        Ok(operation)
    }
}

impl FromStr for Query {
    type Err = SseParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Operation::from_str(s)? {
            Operation::Query(query) => Ok(query),
            Operation::Update(_) => Err(SseParseError::syntax("Expected a query", 0)),
        }
    }
}

impl FromStr for Update {
    type Err = SseParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Operation::from_str(s)? {
            Operation::Update(update) => Ok(update),
            Operation::Query(_) => Err(SseParseError::syntax("Expected an update", 0)),
        }
    }
}

impl FromStr for GraphPattern {
    type Err = SseParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pattern = Parser::default().pattern(&read(s)?)?;
        pattern.validate()?;
        Ok(pattern)
    }
}

impl FromStr for Expression {
    type Err = SseParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let expression = Parser::default().expression(&read(s)?)?;
        expression.validate()?;
        Ok(expression)
    }
}

impl FromStr for PropertyPath {
    type Err = SseParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Parser::default().path(&read(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip<T: FromStr<Err = SseParseError> + ToString + PartialEq + std::fmt::Debug>(
        input: &str,
    ) -> T {
        let parsed = input.parse::<T>().unwrap();
        let rendered = parsed.to_string();
        assert_eq!(rendered.parse::<T>().unwrap(), parsed, "{rendered}");
        parsed
    }

    #[test]
    fn round_trip_patterns() {
        let inputs = [
            "(bgp (triple ?s ?p ?o))",
            "(join (bgp (triple ?s <http://a> ?o)) (leftjoin (bgp) (bgp (triple ?s <http://b> ?x)) (bound ?x)))",
            "(path ?a (seq <http://p1> (alt (reverse <http://p2>) (path+ <http://p3>))) ?b)",
            "(path ?a (notoneof <http://p1> <http://p2>) ??b)",
            "(filter (&& (< ?o 10) (regex (str ?s) \"^http\" \"i\")) (bgp (triple ?s <http://p> ?o)))",
            "(extend ((?x (+ ?o 1)) (?y (* ?x 2.5))) (bgp (triple ?s <http://p> ?o)))",
            "(minus (bgp (triple ?s <http://p> ?o)) (bgp (triple ?s <http://q> ?o)))",
            "(table (vars ?x ?y) (row (?x 1) (?y \"a\"@en)) (row (?y _:b)))",
            "(table unit)",
            "(order ((desc ?o) (asc (str ?s))) (bgp (triple ?s <http://p> ?o)))",
            "(slice 2 _ (distinct (project * (bgp (triple ?s <http://p> ?o)))))",
            "(reduced (slice 0 5 (bgp (triple ?s <http://p> ?o))))",
            "(group (?s (?k (lang ?o))) ((?c (count distinct ?o)) (?all (count)) (?g (group_concat distinct (separator \";\") ?o))) (bgp (triple ?s <http://p> ?o)))",
            "(graph ?g (union (bgp (triple ?s <http://p> ?o)) (graph <http://g> (bgp))))",
            "(dataset (default <http://g1>) (named <http://g2>) (bgp (triple ?s ?p ?o)))",
            "(filter (notexists (bgp (triple ?s <http://p> \"x\"^^<http://dt>))) (bgp (triple ?s ?p ?o)))",
            "(filter (in ?o 1 1.5 \"1.0e0\"^^<http://www.w3.org/2001/XMLSchema#double> true) (bgp (triple ?s ?p ?o)))",
            "(extend ((?x (call <http://www.w3.org/2001/XMLSchema#integer> ?o))) (bgp (triple ?s ?p ?o)))",
            "(bgp (triple (qtriple ?s <http://p> 1) <http://q> (qtriple <http://a> <http://p> 1)))",
        ];
        for input in inputs {
            round_trip::<GraphPattern>(input);
        }
    }

    #[test]
    fn round_trip_queries_and_updates() {
        let inputs = [
            "(ask (bgp (triple ?s ?p ?o)))",
            "(construct ((triple ?s <http://q> _:b)) (bgp (triple ?s <http://p> ?o)))",
            "(describe (<http://a> ?s) (bgp (triple ?s <http://p> ?o)))",
            "(bgp (triple ?s ?p ?o))",
        ];
        for input in inputs {
            round_trip::<Query>(input);
        }

        let update = round_trip::<Update>(
            "(update (insertdata (triple <http://a> <http://p> 1) (quad <http://g> <http://a> <http://p> \"x\")) (deletewhere silent (quad ?g ?s <http://p> ?o)) (modify (delete (triple ?s <http://p> ?o)) (insert (triple ?s <http://q> ?o)) (bgp (triple ?s <http://p> ?o))))",
        );
        assert_eq!(update.operations.len(), 3);
        assert!(update.operations[1].is_silent());
    }

    #[test]
    fn prefixes_and_base() {
        let pattern = "(prefix ((ex: <http://example.com/>)) (base <http://example.com/base/> (bgp (triple ex:a <p> ?o))))"
            .parse::<GraphPattern>()
            .unwrap();
        insta::assert_snapshot!(pattern, @r"
        (prefix ((ex: <http://example.com/>))
          (base <http://example.com/base/>
            (bgp (triple <http://example.com/a> <http://example.com/base/p> ?o))))
        ");
    }

    #[test]
    fn prefix_around_query_form() {
        let query = "(prefix ((ex: <http://example.com/>)) (ask (bgp (triple ex:a ?p ?o))))"
            .parse::<Query>()
            .unwrap();
        let Query::Ask(GraphPattern::Prefix { inner, .. }) = query else {
            panic!("expected the prefix to wrap the pattern");
        };
        insta::assert_snapshot!(inner, @"(bgp (triple <http://example.com/a> ?p ?o))");
    }

    #[test]
    fn ranges_are_compiled() {
        let path = "(mod 1 2 <http://p>)".parse::<PropertyPath>().unwrap();
        insta::assert_snapshot!(path, @"(seq <http://p> (path? <http://p>))");

        let path = "(mod _ 1 <http://p>)".parse::<PropertyPath>().unwrap();
        insta::assert_snapshot!(path, @"(path? <http://p>)");

        assert_eq!(
            "(mod _ _ <http://p>)".parse::<PropertyPath>(),
            Err(SseParseError::Validation(ValidationError::InvalidPathRange {
                min: None,
                max: None
            }))
        );
    }

    #[test]
    fn arity_errors() {
        assert_eq!(
            "(strlen)".parse::<Expression>(),
            Err(SseParseError::Validation(ValidationError::Arity {
                name: "strlen",
                expected: crate::Arity::Exact(1),
                actual: 0
            }))
        );
        assert_eq!(
            "(frobnicate ?x)".parse::<Expression>(),
            Err(SseParseError::Validation(ValidationError::UnknownOperator(
                "frobnicate".to_owned()
            )))
        );
    }

    #[test]
    fn unary_and_binary_minus() {
        assert_eq!(
            "(- ?x)".parse::<Expression>().unwrap(),
            Expression::operation(OperatorKind::UnaryMinus, [Variable::new_unchecked("x").into()])
        );
        assert_eq!(
            "(- ?x -1)".parse::<Expression>().unwrap(),
            Expression::operation(
                OperatorKind::Subtract,
                [Variable::new_unchecked("x").into(), Literal::from(-1).into()]
            )
        );
    }

    #[test]
    fn validation_runs_after_parsing() {
        assert_eq!(
            "(extend ((?o 1)) (bgp (triple ?s <http://p> ?o)))".parse::<GraphPattern>(),
            Err(SseParseError::Validation(
                ValidationError::VariableAlreadyBound(Variable::new_unchecked("o"))
            ))
        );
    }

    #[test]
    fn syntax_errors() {
        assert_eq!(
            "(bgp (triple ?s ?p ?o)".parse::<GraphPattern>(),
            Err(SseParseError::syntax("Unbalanced '('", 0))
        );
        assert_eq!(
            "(bgp (triple ex:a ?p ?o))".parse::<GraphPattern>(),
            Err(SseParseError::syntax("Unknown prefix ex:", 13))
        );
    }
}
