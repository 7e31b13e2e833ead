//! Renders operator trees in the textual exchange form.
//!
//! Graph patterns are pretty-printed with one nested pattern per line, expressions and paths are
//! written inline. Parsing the rendering of a tree reconstructs an equal tree.

use crate::{
    AggregateExpression, AggregateFunction, Expression, GraphPattern, GroupKey, OperatorKind,
    OrderExpression, PropertyPath, Query, QueryDataset, Update, UpdateOperation,
};
use rdf_algebra_model::vocab::xsd;
use rdf_algebra_model::{
    GraphName, GraphNamePattern, Literal, NamedNodePattern, Quad, QuadPattern, Term,
    TermPattern, TriplePattern, Variable,
};
use std::fmt::{Display, Formatter, Result, Write};

/// Where nested graph patterns are written.
#[derive(Clone, Copy)]
struct Layout {
    /// [None] writes everything on a single line.
    indent: Option<usize>,
}

impl Layout {
    const PRETTY: Layout = Layout { indent: Some(0) };
    const COMPACT: Layout = Layout { indent: None };

    fn nested(self) -> Self {
        Self {
            indent: self.indent.map(|indent| indent + 2),
        }
    }

    fn break_line(self, f: &mut Formatter<'_>) -> Result {
        match self.indent {
            Some(indent) => write!(f, "\n{:indent$}", ""),
            None => f.write_char(' '),
        }
    }
}

impl Display for GraphPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write_pattern(f, self, Layout::PRETTY)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write_expression(f, self)
    }
}

impl Display for PropertyPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write_path(f, self)
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let layout = Layout::PRETTY;
        match self {
            Query::Select(pattern) => write_pattern(f, pattern, layout),
            Query::Ask(pattern) => {
                f.write_str("(ask")?;
                write_child(f, pattern, layout)?;
                f.write_char(')')
            }
            Query::Construct { template, pattern } => {
                f.write_str("(construct (")?;
                write_separated(f, template, write_triple_pattern)?;
                f.write_char(')')?;
                write_child(f, pattern, layout)?;
                f.write_char(')')
            }
            Query::Describe { terms, pattern } => {
                f.write_str("(describe (")?;
                write_separated(f, terms, write_term_pattern)?;
                f.write_char(')')?;
                write_child(f, pattern, layout)?;
                f.write_char(')')
            }
        }
    }
}

impl Display for Update {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let layout = Layout::PRETTY.nested();
        f.write_str("(update")?;
        for operation in &self.operations {
            layout.break_line(f)?;
            write_update_operation(f, operation, layout)?;
        }
        f.write_char(')')
    }
}

impl Display for UpdateOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write_update_operation(f, self, Layout::PRETTY)
    }
}

fn write_child(f: &mut Formatter<'_>, pattern: &GraphPattern, layout: Layout) -> Result {
    let nested = layout.nested();
    nested.break_line(f)?;
    write_pattern(f, pattern, nested)
}

fn write_separated<T>(
    f: &mut Formatter<'_>,
    items: &[T],
    write_item: impl Fn(&mut Formatter<'_>, &T) -> Result,
) -> Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_char(' ')?;
        }
        write_item(f, item)?;
    }
    Ok(())
}

fn write_pattern(f: &mut Formatter<'_>, pattern: &GraphPattern, layout: Layout) -> Result {
    match pattern {
        GraphPattern::Bgp { patterns } => {
            f.write_str("(bgp")?;
            match patterns.as_slice() {
                [] => {}
                [pattern] => {
                    f.write_char(' ')?;
                    write_triple_pattern(f, pattern)?;
                }
                patterns => {
                    for pattern in patterns {
                        layout.nested().break_line(f)?;
                        write_triple_pattern(f, pattern)?;
                    }
                }
            }
        }
        GraphPattern::Path {
            subject,
            path,
            object,
        } => {
            f.write_str("(path ")?;
            write_term_pattern(f, subject)?;
            f.write_char(' ')?;
            write_path(f, path)?;
            f.write_char(' ')?;
            write_term_pattern(f, object)?;
        }
        GraphPattern::Join { left, right } => write_binary(f, "join", left, right, layout)?,
        GraphPattern::Union { left, right } => write_binary(f, "union", left, right, layout)?,
        GraphPattern::Minus { left, right } => write_binary(f, "minus", left, right, layout)?,
        GraphPattern::LeftJoin {
            left,
            right,
            expression,
        } => {
            write_binary(f, "leftjoin", left, right, layout)?;
            if let Some(expression) = expression {
                layout.nested().break_line(f)?;
                write_expression(f, expression)?;
            }
        }
        GraphPattern::Filter { expression, inner } => {
            f.write_str("(filter ")?;
            write_expression(f, expression)?;
            write_child(f, inner, layout)?;
        }
        GraphPattern::Graph { name, inner } => {
            f.write_str("(graph ")?;
            write_named_node_pattern(f, name)?;
            write_child(f, inner, layout)?;
        }
        GraphPattern::Extend {
            inner,
            variable,
            expression,
        } => {
            write!(f, "(extend (({variable} ")?;
            write_expression(f, expression)?;
            f.write_str("))")?;
            write_child(f, inner, layout)?;
        }
        GraphPattern::Values {
            variables,
            bindings,
        } => write_table(f, variables, bindings, layout)?,
        GraphPattern::OrderBy { inner, expression } => {
            f.write_str("(order (")?;
            write_separated(f, expression, write_order_expression)?;
            f.write_char(')')?;
            write_child(f, inner, layout)?;
        }
        GraphPattern::Project { inner, variables } => {
            f.write_str("(project ")?;
            match variables {
                Some(variables) => {
                    f.write_char('(')?;
                    write_separated(f, variables, |f, v| write!(f, "{v}"))?;
                    f.write_char(')')?;
                }
                None => f.write_char('*')?,
            }
            write_child(f, inner, layout)?;
        }
        GraphPattern::Distinct { inner } => {
            f.write_str("(distinct")?;
            write_child(f, inner, layout)?;
        }
        GraphPattern::Reduced { inner } => {
            f.write_str("(reduced")?;
            write_child(f, inner, layout)?;
        }
        GraphPattern::Slice {
            inner,
            start,
            length,
        } => {
            write!(f, "(slice {start} ")?;
            match length {
                Some(length) => write!(f, "{length}")?,
                None => f.write_char('_')?,
            }
            write_child(f, inner, layout)?;
        }
        GraphPattern::Group {
            inner,
            keys,
            aggregates,
        } => {
            f.write_str("(group (")?;
            write_separated(f, keys, write_group_key)?;
            f.write_str(") (")?;
            write_separated(f, aggregates, |f, (variable, aggregate)| {
                write!(f, "({variable} ")?;
                write_aggregate(f, aggregate)?;
                f.write_char(')')
            })?;
            f.write_char(')')?;
            write_child(f, inner, layout)?;
        }
        GraphPattern::Dataset { dataset, inner } => {
            f.write_str("(dataset ")?;
            write_dataset(f, dataset)?;
            write_child(f, inner, layout)?;
        }
        GraphPattern::Prefix { prefixes, inner } => {
            f.write_str("(prefix (")?;
            write_separated(f, prefixes, |f, (prefix, iri)| write!(f, "({prefix}: {iri})"))?;
            f.write_char(')')?;
            write_child(f, inner, layout)?;
        }
        GraphPattern::Base { iri, inner } => {
            write!(f, "(base {iri}")?;
            write_child(f, inner, layout)?;
        }
    }
    f.write_char(')')
}

fn write_binary(
    f: &mut Formatter<'_>,
    name: &str,
    left: &GraphPattern,
    right: &GraphPattern,
    layout: Layout,
) -> Result {
    write!(f, "({name}")?;
    write_child(f, left, layout)?;
    write_child(f, right, layout)
}

fn write_table(
    f: &mut Formatter<'_>,
    variables: &[Variable],
    bindings: &[Vec<Option<Term>>],
    layout: Layout,
) -> Result {
    if variables.is_empty() {
        match bindings.len() {
            0 => return f.write_str("(table empty"),
            1 => return f.write_str("(table unit"),
            _ => {}
        }
    }

    f.write_str("(table (vars")?;
    for variable in variables {
        write!(f, " {variable}")?;
    }
    f.write_char(')')?;
    for row in bindings {
        layout.nested().break_line(f)?;
        f.write_str("(row")?;
        for (variable, value) in variables.iter().zip(row) {
            if let Some(value) = value {
                write!(f, " ({variable} ")?;
                write_term(f, value)?;
                f.write_char(')')?;
            }
        }
        f.write_char(')')?;
    }
    Ok(())
}

fn write_order_expression(f: &mut Formatter<'_>, order: &OrderExpression) -> Result {
    let (name, expression) = match order {
        OrderExpression::Asc(expression) => ("asc", expression),
        OrderExpression::Desc(expression) => ("desc", expression),
    };
    write!(f, "({name} ")?;
    write_expression(f, expression)?;
    f.write_char(')')
}

fn write_group_key(f: &mut Formatter<'_>, key: &GroupKey) -> Result {
    match &key.variable {
        Some(variable) => {
            write!(f, "({variable} ")?;
            write_expression(f, &key.expression)?;
            f.write_char(')')
        }
        None => write_expression(f, &key.expression),
    }
}

fn write_aggregate(f: &mut Formatter<'_>, aggregate: &AggregateExpression) -> Result {
    write!(f, "({}", aggregate.function.kind().name())?;
    if aggregate.distinct {
        f.write_str(" distinct")?;
    }
    if aggregate.function == AggregateFunction::GroupConcat {
        if let Some(separator) = &aggregate.separator {
            f.write_str(" (separator ")?;
            write_string(f, separator)?;
            f.write_char(')')?;
        }
    }
    if let Some(expression) = &aggregate.expression {
        f.write_char(' ')?;
        write_expression(f, expression)?;
    }
    f.write_char(')')
}

fn write_dataset(f: &mut Formatter<'_>, dataset: &QueryDataset) -> Result {
    f.write_str("(default")?;
    for graph in &dataset.default {
        write!(f, " {graph}")?;
    }
    f.write_char(')')?;
    if let Some(named) = &dataset.named {
        f.write_str(" (named")?;
        for graph in named {
            write!(f, " {graph}")?;
        }
        f.write_char(')')?;
    }
    Ok(())
}

fn write_update_operation(
    f: &mut Formatter<'_>,
    operation: &UpdateOperation,
    layout: Layout,
) -> Result {
    fn head(f: &mut Formatter<'_>, name: &str, silent: bool) -> Result {
        write!(f, "({name}")?;
        if silent {
            f.write_str(" silent")?;
        }
        Ok(())
    }

    match operation {
        UpdateOperation::InsertData { data, silent } => {
            head(f, "insertdata", *silent)?;
            for quad in data {
                f.write_char(' ')?;
                write_quad(f, quad)?;
            }
        }
        UpdateOperation::DeleteData { data, silent } => {
            head(f, "deletedata", *silent)?;
            for quad in data {
                f.write_char(' ')?;
                write_quad(f, quad)?;
            }
        }
        UpdateOperation::DeleteWhere { pattern, silent } => {
            head(f, "deletewhere", *silent)?;
            for quad in pattern {
                f.write_char(' ')?;
                write_quad_pattern(f, quad)?;
            }
        }
        UpdateOperation::Modify {
            delete,
            insert,
            pattern,
            silent,
        } => {
            head(f, "modify", *silent)?;
            f.write_str(" (delete")?;
            for quad in delete {
                f.write_char(' ')?;
                write_quad_pattern(f, quad)?;
            }
            f.write_str(") (insert")?;
            for quad in insert {
                f.write_char(' ')?;
                write_quad_pattern(f, quad)?;
            }
            f.write_char(')')?;
            write_child(f, pattern, layout)?;
        }
    }
    f.write_char(')')
}

fn write_quad(f: &mut Formatter<'_>, quad: &Quad) -> Result {
    match &quad.graph_name {
        GraphName::NamedNode(graph) => write!(f, "(quad {graph} ")?,
        GraphName::BlankNode(graph) => write!(f, "(quad {graph} ")?,
        GraphName::DefaultGraph => f.write_str("(triple ")?,
    }
    write_term(f, &quad.subject.clone().into())?;
    write!(f, " {} ", quad.predicate)?;
    write_term(f, &quad.object)?;
    f.write_char(')')
}

fn write_quad_pattern(f: &mut Formatter<'_>, quad: &QuadPattern) -> Result {
    match &quad.graph_name {
        GraphNamePattern::DefaultGraph => write_triple_pattern(f, &quad.pattern),
        GraphNamePattern::NamedNode(graph) => write_quad_pattern_in(f, graph, &quad.pattern),
        GraphNamePattern::Variable(graph) => write_quad_pattern_in(f, graph, &quad.pattern),
    }
}

fn write_quad_pattern_in(
    f: &mut Formatter<'_>,
    graph: &dyn Display,
    pattern: &TriplePattern,
) -> Result {
    write!(f, "(quad {graph} ")?;
    write_triple_pattern_body(f, pattern)?;
    f.write_char(')')
}

fn write_triple_pattern(f: &mut Formatter<'_>, pattern: &TriplePattern) -> Result {
    f.write_str("(triple ")?;
    write_triple_pattern_body(f, pattern)?;
    f.write_char(')')
}

fn write_triple_pattern_body(f: &mut Formatter<'_>, pattern: &TriplePattern) -> Result {
    write_term_pattern(f, &pattern.subject)?;
    f.write_char(' ')?;
    write_named_node_pattern(f, &pattern.predicate)?;
    f.write_char(' ')?;
    write_term_pattern(f, &pattern.object)
}

fn write_term_pattern(f: &mut Formatter<'_>, pattern: &TermPattern) -> Result {
    match pattern {
        TermPattern::Term(term) => write_term(f, term),
        TermPattern::Variable(variable) => write!(f, "{variable}"),
        TermPattern::Triple(triple) => {
            f.write_str("(qtriple ")?;
            write_triple_pattern_body(f, triple)?;
            f.write_char(')')
        }
    }
}

fn write_named_node_pattern(f: &mut Formatter<'_>, pattern: &NamedNodePattern) -> Result {
    match pattern {
        NamedNodePattern::NamedNode(node) => write!(f, "{node}"),
        NamedNodePattern::Variable(variable) => write!(f, "{variable}"),
    }
}

fn write_path(f: &mut Formatter<'_>, path: &PropertyPath) -> Result {
    let (kind, inner) = match path {
        PropertyPath::Link(node) => return write!(f, "{node}"),
        PropertyPath::ZeroLength => return f.write_str("(path0)"),
        PropertyPath::NegatedPropertySet(nodes) => {
            f.write_str("(notoneof")?;
            for node in nodes {
                write!(f, " {node}")?;
            }
            return f.write_char(')');
        }
        PropertyPath::Sequence(lhs, rhs) => return write_path_pair(f, "seq", lhs, rhs),
        PropertyPath::Alternative(lhs, rhs) => return write_path_pair(f, "alt", lhs, rhs),
        PropertyPath::Inverse(inner) => (OperatorKind::Reverse, inner),
        PropertyPath::ZeroOrOne(inner) => (OperatorKind::ZeroOrOne, inner),
        PropertyPath::ZeroOrMore(inner) => (OperatorKind::ZeroOrMore, inner),
        PropertyPath::OneOrMore(inner) => (OperatorKind::OneOrMore, inner),
    };
    write!(f, "({kind} ")?;
    write_path(f, inner)?;
    f.write_char(')')
}

fn write_path_pair(
    f: &mut Formatter<'_>,
    name: &str,
    lhs: &PropertyPath,
    rhs: &PropertyPath,
) -> Result {
    write!(f, "({name} ")?;
    write_path(f, lhs)?;
    f.write_char(' ')?;
    write_path(f, rhs)?;
    f.write_char(')')
}

fn write_expression(f: &mut Formatter<'_>, expression: &Expression) -> Result {
    match expression {
        Expression::Term(term) => write_term(f, term),
        Expression::Variable(variable) => write!(f, "{variable}"),
        Expression::Operation(OperatorKind::Not, args) => match args.as_slice() {
            [Expression::Exists(pattern)] => {
                f.write_str("(notexists ")?;
                write_pattern(f, pattern, Layout::COMPACT)?;
                f.write_char(')')
            }
            _ => write_operation(f, OperatorKind::Not.name(), args),
        },
        Expression::Operation(kind, args) => write_operation(f, kind.name(), args),
        Expression::Exists(pattern) => {
            f.write_str("(exists ")?;
            write_pattern(f, pattern, Layout::COMPACT)?;
            f.write_char(')')
        }
        Expression::Call(function, args) => {
            write!(f, "(call {function}")?;
            for arg in args {
                f.write_char(' ')?;
                write_expression(f, arg)?;
            }
            f.write_char(')')
        }
    }
}

fn write_operation(f: &mut Formatter<'_>, name: &str, args: &[Expression]) -> Result {
    write!(f, "({name}")?;
    for arg in args {
        f.write_char(' ')?;
        write_expression(f, arg)?;
    }
    f.write_char(')')
}

/// Writes a term. Integers, decimals and booleans with a canonical-looking lexical form use the
/// short notation.
pub(crate) fn write_term(f: &mut Formatter<'_>, term: &Term) -> Result {
    match term {
        Term::NamedNode(node) => write!(f, "{node}"),
        Term::BlankNode(node) => write!(f, "{node}"),
        Term::Literal(literal) => write_literal(f, literal),
        Term::Triple(triple) => {
            f.write_str("(qtriple ")?;
            write_term(f, &triple.subject.clone().into())?;
            write!(f, " {} ", triple.predicate)?;
            write_term(f, &triple.object)?;
            f.write_char(')')
        }
    }
}

fn write_literal(f: &mut Formatter<'_>, literal: &Literal) -> Result {
    let value = literal.value();
    if let Some(language) = literal.language() {
        write_string(f, value)?;
        return write!(f, "@{language}");
    }

    let datatype = literal.datatype();
    let short = (datatype == xsd::INTEGER && is_integer_lexical(value))
        || (datatype == xsd::DECIMAL && is_decimal_lexical(value))
        || (datatype == xsd::BOOLEAN && (value == "true" || value == "false"));
    if short {
        return f.write_str(value);
    }

    write_string(f, value)?;
    if datatype != xsd::STRING {
        write!(f, "^^{datatype}")?;
    }
    Ok(())
}

fn write_string(f: &mut Formatter<'_>, value: &str) -> Result {
    f.write_char('"')?;
    for c in value.chars() {
        match c {
            '\t' => f.write_str("\\t")?,
            '\u{08}' => f.write_str("\\b")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\u{0C}' => f.write_str("\\f")?,
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

fn strip_sign(value: &str) -> &str {
    value
        .strip_prefix(['+', '-'])
        .unwrap_or(value)
}

/// `[+-]?[0-9]+`
pub(super) fn is_integer_lexical(value: &str) -> bool {
    let digits = strip_sign(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// `[+-]?[0-9]*\.[0-9]+`
pub(super) fn is_decimal_lexical(value: &str) -> bool {
    let Some((integer, fraction)) = strip_sign(value).split_once('.') else {
        return false;
    };
    integer.bytes().all(|b| b.is_ascii_digit())
        && !fraction.is_empty()
        && fraction.bytes().all(|b| b.is_ascii_digit())
}

/// `[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)[eE][+-]?[0-9]+`
pub(super) fn is_double_lexical(value: &str) -> bool {
    let Some((mantissa, exponent)) = strip_sign(value).split_once(['e', 'E']) else {
        return false;
    };
    let mantissa_valid = match mantissa.split_once('.') {
        Some((integer, fraction)) => {
            (!integer.is_empty() || !fraction.is_empty())
                && integer.bytes().all(|b| b.is_ascii_digit())
                && fraction.bytes().all(|b| b.is_ascii_digit())
        }
        None => !mantissa.is_empty() && mantissa.bytes().all(|b| b.is_ascii_digit()),
    };
    mantissa_valid && is_integer_lexical(exponent)
}
