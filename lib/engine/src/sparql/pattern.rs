use crate::sparql::aggregate::group;
use crate::sparql::error::QueryEvaluationError;
use crate::sparql::expression::evaluate_in_row;
use crate::sparql::path::PathEvaluator;
use crate::sparql::{EvalContext, Evaluatable, Executable, Scope};
use rdf_algebra_functions::effective_boolean_value;
use rdf_algebra_logical::{GraphPattern, OrderExpression, QueryDataset};
use rdf_algebra_model::{
    compare_terms, ActiveGraph, GraphName, Iri, NamedNode, NamedNodePattern, Solution, Solutions,
    Term, TermPattern, TriplePattern, Variable,
};
use std::cmp::Ordering;
use tracing::{debug, trace};

impl Executable for GraphPattern {
    fn execute(
        &self,
        ctx: &EvalContext<'_>,
        scope: &Scope,
    ) -> Result<Solutions, QueryEvaluationError> {
        let _guard = ctx.enter()?;
        trace!(kind = self.kind().name(), graph = %scope.graph, "Executing pattern");

        let solutions = match self {
            GraphPattern::Bgp { patterns } => execute_bgp(patterns, ctx, scope)?,
            GraphPattern::Path {
                subject,
                path,
                object,
            } => {
                let subject = blank_nodes_to_variables(subject).bind(&substitution(scope));
                let object = blank_nodes_to_variables(object).bind(&substitution(scope));
                PathEvaluator::new(ctx, &scope.graph)
                    .evaluate(&subject, path, &object)?
                    .without_non_distinguished()
            }
            GraphPattern::Join { left, right } => {
                let left = left.execute(ctx, scope)?;
                let right = right.execute(ctx, scope)?;
                join(&left, &right)
            }
            GraphPattern::LeftJoin {
                left,
                right,
                expression,
            } => {
                let left = left.execute(ctx, scope)?;
                let right = right.execute(ctx, scope)?;
                let solutions = left_join(&left, &right, expression.as_ref(), ctx, scope);
                ctx.check_fatal()?;
                solutions
            }
            GraphPattern::Filter { expression, inner } => {
                let solutions = inner
                    .execute(ctx, scope)?
                    .into_iter()
                    .filter(|solution| {
                        match expression
                            .evaluate(solution, ctx, scope)
                            .and_then(|term| effective_boolean_value(&term))
                        {
                            Ok(keep) => keep,
                            Err(error) => {
                                debug!(%solution, %error, "Filter expression failed");
                                false
                            }
                        }
                    })
                    .collect();
                ctx.check_fatal()?;
                solutions
            }
            GraphPattern::Union { left, right } => {
                let mut solutions = left.execute(ctx, scope)?;
                solutions.extend(right.execute(ctx, scope)?);
                solutions
            }
            GraphPattern::Graph { name, inner } => execute_graph(name, inner, ctx, scope)?,
            GraphPattern::Extend { .. } => execute_extend_chain(self, ctx, scope)?,
            GraphPattern::Minus { left, right } => {
                let right = right.execute(ctx, scope)?;
                left.execute(ctx, scope)?
                    .into_iter()
                    .filter(|solution| {
                        !right.iter().any(|other| {
                            solution.is_compatible(other) && solution.shares_variable_with(other)
                        })
                    })
                    .collect()
            }
            GraphPattern::Values {
                variables,
                bindings,
            } => {
                let substitution = substitution(scope);
                bindings
                    .iter()
                    .map(|row| {
                        variables
                            .iter()
                            .zip(row)
                            .filter_map(|(variable, term)| {
                                term.as_ref().map(|term| (variable.clone(), term.clone()))
                            })
                            .collect::<Solution>()
                    })
                    .filter(|solution| solution.is_compatible(&substitution))
                    .collect()
            }
            GraphPattern::OrderBy { inner, expression } => {
                let solutions = order_by(inner.execute(ctx, scope)?, expression, ctx, scope);
                ctx.check_fatal()?;
                solutions
            }
            GraphPattern::Project { inner, variables } => inner
                .execute(ctx, scope)?
                .project(variables.as_deref()),
            GraphPattern::Distinct { inner } => inner.execute(ctx, scope)?.distinct(),
            GraphPattern::Reduced { inner } => inner.execute(ctx, scope)?.reduced(),
            GraphPattern::Slice {
                inner,
                start,
                length,
            } => inner.execute(ctx, scope)?.slice(*start, *length),
            GraphPattern::Group {
                inner,
                keys,
                aggregates,
            } => {
                let solutions = inner.execute(ctx, scope)?;
                let solutions = group(&solutions, keys, aggregates, ctx, scope);
                ctx.check_fatal()?;
                solutions
            }
            GraphPattern::Dataset { dataset, inner } => {
                inner.execute(ctx, &dataset_scope(dataset, scope))?
            }
            GraphPattern::Prefix { inner, .. } => inner.execute(ctx, scope)?,
            GraphPattern::Base { iri, inner } => {
                let base_iri = match Iri::parse(iri.as_str().to_owned()) {
                    Ok(base_iri) => Some(base_iri),
                    Err(error) => {
                        debug!(%iri, %error, "Ignoring invalid base IRI");
                        scope.base_iri.clone()
                    }
                };
                let scope = Scope {
                    base_iri,
                    ..scope.clone()
                };
                inner.execute(ctx, &scope)?
            }
        };

        trace!(kind = self.kind().name(), count = solutions.len(), "Executed pattern");
        Ok(solutions)
    }
}

/// The bindings that an `EXISTS` substitutes into its pattern.
fn substitution(scope: &Scope) -> Solution {
    scope.substitution.clone().unwrap_or_default()
}

/// Blank nodes in a pattern behave like variables that are never projected.
fn blank_nodes_to_variables(pattern: &TermPattern) -> TermPattern {
    match pattern {
        TermPattern::Term(Term::BlankNode(node)) => {
            TermPattern::Variable(Variable::non_distinguished(node.as_str()))
        }
        TermPattern::Triple(triple) => TermPattern::Triple(Box::new(TriplePattern {
            subject: blank_nodes_to_variables(&triple.subject),
            predicate: triple.predicate.clone(),
            object: blank_nodes_to_variables(&triple.object),
        })),
        _ => pattern.clone(),
    }
}

fn execute_bgp(
    patterns: &[TriplePattern],
    ctx: &EvalContext<'_>,
    scope: &Scope,
) -> Result<Solutions, QueryEvaluationError> {
    let substitution = substitution(scope);
    let mut solutions = Solutions::unit();
    for pattern in patterns {
        let pattern = TriplePattern {
            subject: blank_nodes_to_variables(&pattern.subject),
            predicate: pattern.predicate.clone(),
            object: blank_nodes_to_variables(&pattern.object),
        }
        .bind(&substitution);

        let mut next = Solutions::empty();
        for solution in &solutions {
            let matches = ctx.store().query(&pattern.bind(solution), &scope.graph)?;
            next.extend(matches.iter().filter_map(|other| solution.merge(other)));
        }
        if next.is_empty() {
            return Ok(next);
        }
        solutions = next;
    }
    // Blank nodes are scoped to the pattern.
    Ok(solutions.without_non_distinguished())
}

/// Executes a chain of nested `Extend`s. The bindings of the chain are computed one input row of
/// the innermost pattern at a time, and all of them are evaluated in the same row.
fn execute_extend_chain(
    pattern: &GraphPattern,
    ctx: &EvalContext<'_>,
    scope: &Scope,
) -> Result<Solutions, QueryEvaluationError> {
    let mut bindings = Vec::new();
    let mut inner = pattern;
    while let GraphPattern::Extend {
        inner: next,
        variable,
        expression,
    } = inner
    {
        bindings.push((variable, expression));
        inner = &**next;
    }
    bindings.reverse();

    let solutions = inner
        .execute(ctx, scope)?
        .into_iter()
        .map(|mut solution| {
            let row = ctx.bnodes().next_row();
            for (variable, expression) in &bindings {
                match evaluate_in_row(expression, &solution, ctx, scope, row) {
                    Ok(term) => {
                        solution.insert((*variable).clone(), term);
                    }
                    Err(error) => {
                        debug!(%variable, %error, "Extension left the variable unbound");
                    }
                }
            }
            solution
        })
        .collect();
    ctx.check_fatal()?;
    Ok(solutions)
}

pub(crate) fn join(left: &Solutions, right: &Solutions) -> Solutions {
    left.iter()
        .flat_map(|a| right.iter().filter_map(move |b| a.merge(b)))
        .collect()
}

fn left_join(
    left: &Solutions,
    right: &Solutions,
    expression: Option<&rdf_algebra_logical::Expression>,
    ctx: &EvalContext<'_>,
    scope: &Scope,
) -> Solutions {
    let mut solutions = Solutions::empty();
    for a in left {
        let mut matched = false;
        for merged in right.iter().filter_map(|b| a.merge(b)) {
            let keep = match expression {
                None => true,
                Some(expression) => expression
                    .evaluate(&merged, ctx, scope)
                    .and_then(|term| effective_boolean_value(&term))
                    .unwrap_or(false),
            };
            if keep {
                matched = true;
                solutions.push(merged);
            }
        }
        if !matched {
            solutions.push(a.clone());
        }
    }
    solutions
}

fn execute_graph(
    name: &NamedNodePattern,
    inner: &GraphPattern,
    ctx: &EvalContext<'_>,
    scope: &Scope,
) -> Result<Solutions, QueryEvaluationError> {
    let graph_variable = match name {
        NamedNodePattern::NamedNode(name) => return execute_in_graph(name, inner, ctx, scope),
        NamedNodePattern::Variable(variable) => variable,
    };

    if let Some(term) = scope.substituted(graph_variable) {
        return match term {
            Term::NamedNode(name) => execute_in_graph(name, inner, ctx, scope),
            _ => Ok(Solutions::empty()),
        };
    }

    let graph_names = match &scope.named_graphs {
        Some(named_graphs) => named_graphs.clone(),
        None => ctx.store().named_graphs()?,
    };
    let mut solutions = Solutions::empty();
    for graph_name in graph_names {
        let binding = Term::NamedNode(graph_name.clone());
        for mut solution in execute_in_graph(&graph_name, inner, ctx, scope)? {
            match solution.get(graph_variable) {
                Some(bound) if *bound != binding => continue,
                Some(_) => {}
                None => {
                    solution.insert(graph_variable.clone(), binding.clone());
                }
            }
            solutions.push(solution);
        }
    }
    Ok(solutions)
}

fn execute_in_graph(
    name: &NamedNode,
    inner: &GraphPattern,
    ctx: &EvalContext<'_>,
    scope: &Scope,
) -> Result<Solutions, QueryEvaluationError> {
    if !scope.is_visible(name) {
        return Ok(Solutions::empty());
    }
    inner.execute(ctx, &scope.with_graph(ActiveGraph::NamedGraph(name.clone())))
}

/// The default graph of the data set is the merge of the listed graphs. Only the listed named
/// graphs are visible to `GRAPH`.
fn dataset_scope(dataset: &QueryDataset, scope: &Scope) -> Scope {
    let default = dataset
        .default
        .iter()
        .cloned()
        .map(GraphName::NamedNode)
        .collect();
    Scope {
        graph: ActiveGraph::Union(default),
        named_graphs: Some(dataset.named.clone().unwrap_or_default()),
        ..scope.clone()
    }
}

fn order_by(
    solutions: Solutions,
    expressions: &[OrderExpression],
    ctx: &EvalContext<'_>,
    scope: &Scope,
) -> Solutions {
    let mut keyed = solutions
        .into_iter()
        .map(|solution| {
            let keys = expressions
                .iter()
                .map(|expression| expression.expression().evaluate(&solution, ctx, scope).ok())
                .collect::<Vec<_>>();
            (keys, solution)
        })
        .collect::<Vec<_>>();

    keyed.sort_by(|(a, _), (b, _)| {
        for (expression, (a, b)) in expressions.iter().zip(a.iter().zip(b)) {
            let ordering = compare_terms(a.as_ref(), b.as_ref(), true).unwrap_or(Ordering::Equal);
            let ordering = match expression {
                OrderExpression::Asc(_) => ordering,
                OrderExpression::Desc(_) => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
    keyed.into_iter().map(|(_, solution)| solution).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_store::TestStore;
    use crate::ExecutionOptions;

    fn execute(store: &TestStore, pattern: &str) -> Solutions {
        let options = ExecutionOptions::default();
        let ctx = EvalContext::new(store, &options);
        let pattern: GraphPattern = pattern.parse().unwrap();
        pattern.execute(&ctx, &ctx.root_scope()).unwrap()
    }

    fn store() -> TestStore {
        TestStore::from_turtle(
            r#"
            @prefix ex: <http://example.com/> .
            ex:a ex:p ex:b ; ex:v 1 .
            ex:b ex:p ex:c ; ex:v "x" .
            ex:c ex:v 3 .
            "#,
        )
    }

    #[test]
    fn bgp_join() {
        let solutions = execute(
            &store(),
            "(bgp (triple ?s <http://example.com/p> ?o) (triple ?o <http://example.com/p> ?x))",
        );
        insta::assert_snapshot!(solutions, @"{?o -> <http://example.com/b>, ?s -> <http://example.com/a>, ?x -> <http://example.com/c>}");
    }

    #[test]
    fn empty_bgp_is_unit() {
        assert_eq!(execute(&store(), "(bgp)"), Solutions::unit());
    }

    #[test]
    fn left_join_with_unit_is_identity() {
        let solutions = execute(
            &store(),
            "(leftjoin (bgp (triple ?s <http://example.com/p> ?o)) (bgp))",
        );
        assert_eq!(
            solutions,
            execute(&store(), "(bgp (triple ?s <http://example.com/p> ?o))")
        );
    }

    #[test]
    fn left_join_keeps_unmatched() {
        let solutions = execute(
            &store(),
            "(leftjoin (bgp (triple ?s <http://example.com/v> ?v)) (bgp (triple ?s <http://example.com/p> ?o)) (isIRI ?o))",
        );
        insta::assert_snapshot!(solutions, @r#"
        {?o -> <http://example.com/b>, ?s -> <http://example.com/a>, ?v -> "1"^^<http://www.w3.org/2001/XMLSchema#integer>}
        {?o -> <http://example.com/c>, ?s -> <http://example.com/b>, ?v -> "x"}
        {?s -> <http://example.com/c>, ?v -> "3"^^<http://www.w3.org/2001/XMLSchema#integer>}
        "#);
    }

    #[test]
    fn filter_drops_errors() {
        let solutions = execute(
            &store(),
            "(filter (< ?v 2) (bgp (triple ?s <http://example.com/v> ?v)))",
        );
        insta::assert_snapshot!(solutions, @r#"{?s -> <http://example.com/a>, ?v -> "1"^^<http://www.w3.org/2001/XMLSchema#integer>}"#);
    }

    #[test]
    fn minus_requires_shared_variable() {
        let solutions = execute(
            &store(),
            "(minus (bgp (triple ?s <http://example.com/p> ?o)) (bgp (triple ?x <http://example.com/v> 3)))",
        );
        assert_eq!(solutions.len(), 2);

        let solutions = execute(
            &store(),
            "(minus (bgp (triple ?s <http://example.com/p> ?o)) (bgp (triple ?o <http://example.com/v> 3)))",
        );
        insta::assert_snapshot!(solutions, @"{?o -> <http://example.com/b>, ?s -> <http://example.com/a>}");
    }

    #[test]
    fn order_by_mixed_types() {
        let solutions = execute(
            &store(),
            "(project (?v) (order ((desc ?v)) (bgp (triple ?s <http://example.com/v> ?v))))",
        );
        insta::assert_snapshot!(solutions, @r#"
        {?v -> "x"}
        {?v -> "3"^^<http://www.w3.org/2001/XMLSchema#integer>}
        {?v -> "1"^^<http://www.w3.org/2001/XMLSchema#integer>}
        "#);
    }

    #[test]
    fn extend_error_leaves_unbound() {
        let solutions = execute(
            &store(),
            "(extend ((?w (+ ?v 1))) (bgp (triple ?s <http://example.com/v> ?v)))",
        );
        assert_eq!(
            solutions
                .iter()
                .filter(|solution| solution.contains(&Variable::new_unchecked("w")))
                .count(),
            2
        );
        assert_eq!(solutions.len(), 3);
    }

    #[test]
    fn graph_variable_enumerates_named_graphs() {
        let store = TestStore::new([
            rdf_algebra_model::Quad::new(
                NamedNode::new_unchecked("http://example.com/s"),
                NamedNode::new_unchecked("http://example.com/p"),
                NamedNode::new_unchecked("http://example.com/o"),
                NamedNode::new_unchecked("http://example.com/g"),
            ),
        ]);
        let solutions = execute(&store, "(graph ?g (bgp (triple ?s ?p ?o)))");
        insta::assert_snapshot!(solutions, @"{?g -> <http://example.com/g>, ?o -> <http://example.com/o>, ?p -> <http://example.com/p>, ?s -> <http://example.com/s>}");
        assert!(execute(&store, "(bgp (triple ?s ?p ?o))").is_empty());
    }

    #[test]
    fn depth_limit() {
        let store = store();
        let options = ExecutionOptions::default().with_max_depth(2);
        let ctx = EvalContext::new(&store, &options);
        let pattern: GraphPattern = "(distinct (distinct (bgp)))".parse().unwrap();
        assert!(matches!(
            pattern.execute(&ctx, &ctx.root_scope()),
            Err(QueryEvaluationError::DepthLimitExceeded(2))
        ));
    }

    #[test]
    fn bnode_differs_between_equal_rows() {
        let solutions = execute(
            &store(),
            r#"(extend ((?b (bnode "a"))) (table (vars ?x) (row (?x 1)) (row (?x 1))))"#,
        );
        let nodes = solutions
            .iter()
            .filter_map(|solution| solution.get(&Variable::new_unchecked("b")))
            .collect::<Vec<_>>();
        assert_eq!(nodes.len(), 2);
        assert_ne!(nodes[0], nodes[1]);
    }

    #[test]
    fn distinct_ignores_blank_node_bindings() {
        let solutions = execute(
            &store(),
            "(distinct (bgp (triple ?s <http://example.com/v> _:o) (triple ?s <http://example.com/p> _:n)))",
        );
        insta::assert_snapshot!(solutions, @r"
        {?s -> <http://example.com/a>}
        {?s -> <http://example.com/b>}
        ");

        let store = TestStore::from_turtle(
            r#"
            @prefix ex: <http://example.com/> .
            ex:a ex:p 1, 2 .
            "#,
        );
        let solutions = execute(&store, "(distinct (bgp (triple ?s <http://example.com/p> _:o)))");
        insta::assert_snapshot!(solutions, @"{?s -> <http://example.com/a>}");
    }

    #[test]
    fn path_hides_blank_node_endpoints() {
        let solutions = execute(
            &store(),
            "(distinct (path ?s (seq <http://example.com/p> <http://example.com/v>) _:o))",
        );
        insta::assert_snapshot!(solutions, @r"
        {?s -> <http://example.com/a>}
        {?s -> <http://example.com/b>}
        ");
    }
}
