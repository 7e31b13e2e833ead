use crate::queryable::Queryable;
use crate::results::{QueryResults, UpdateSummary};
use crate::sparql::error::QueryEvaluationError;
use crate::sparql::forms::{construct, describe};
use crate::sparql::{EvalContext, Evaluatable, Executable, Updatable};
use crate::ExecutionOptions;
use rdf_algebra_logical::{optimize_query, optimize_update, Expression, Operation, Query, Update};
use rdf_algebra_model::{Solution, Term};
use std::borrow::Cow;
use tracing::debug;

/// Executes a query or an update.
///
/// Queries only read from `store`. The results of an update are the numbers of changed quads.
pub fn execute(
    operation: &Operation,
    store: &mut dyn Queryable,
    options: &ExecutionOptions,
) -> Result<QueryResults, QueryEvaluationError> {
    match operation {
        Operation::Query(query) => execute_query(query, &*store, options),
        Operation::Update(update) => {
            execute_update(update, store, options).map(QueryResults::Updated)
        }
    }
}

/// Executes a query against `store`.
///
/// The solutions of a `SELECT` query never bind non-distinguished variables.
pub fn execute_query(
    query: &Query,
    store: &dyn Queryable,
    options: &ExecutionOptions,
) -> Result<QueryResults, QueryEvaluationError> {
    query.validate()?;
    let query = if options.optimize {
        Cow::Owned(optimize_query(query.clone())?)
    } else {
        Cow::Borrowed(query)
    };

    debug!(query = %query.pattern(), "Executing query");
    let ctx = EvalContext::new(store, options);
    let solutions = query.pattern().execute(&ctx, &ctx.root_scope())?;
    debug!(count = solutions.len(), "Executed query");

    Ok(match &*query {
        Query::Select(_) => QueryResults::Solutions(solutions.without_non_distinguished()),
        Query::Ask(_) => QueryResults::Boolean(!solutions.is_empty()),
        Query::Construct { template, .. } => QueryResults::Graph(construct(template, &solutions)),
        Query::Describe { terms, .. } => QueryResults::Graph(describe(terms, &solutions, &ctx)?),
    })
}

/// Executes the operations of `update` in order.
///
/// An operation that fails aborts the update. The changes of the operations before it remain.
pub fn execute_update(
    update: &Update,
    store: &mut dyn Queryable,
    options: &ExecutionOptions,
) -> Result<UpdateSummary, QueryEvaluationError> {
    update.validate()?;
    let update = if options.optimize {
        Cow::Owned(optimize_update(update.clone())?)
    } else {
        Cow::Borrowed(update)
    };

    debug!(operations = update.operations.len(), "Executing update");
    let mut summary = UpdateSummary::default();
    for operation in &update.operations {
        summary.add(operation.apply(store, options)?);
    }
    debug!(%summary, "Executed update");
    Ok(summary)
}

/// Evaluates a single expression for `solution`.
///
/// Unlike inside a pattern, an error of the expression is returned to the caller.
pub fn evaluate_expression(
    expression: &Expression,
    solution: &Solution,
    store: &dyn Queryable,
    options: &ExecutionOptions,
) -> Result<Term, QueryEvaluationError> {
    expression.validate()?;
    let ctx = EvalContext::new(store, options);
    let result = expression.evaluate(solution, &ctx, &ctx.root_scope());
    ctx.check_fatal()?;
    Ok(result?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_store::TestStore;
    use rdf_algebra_model::EvalError;

    const DATA: &str = r#"
        @prefix ex: <http://example.com/> .
        ex:a ex:p ex:b .
        _:x ex:p ex:c .
    "#;

    fn query(store: &TestStore, query: &str) -> QueryResults {
        let query: Query = query.parse().unwrap();
        execute_query(&query, store, &ExecutionOptions::default()).unwrap()
    }

    #[test]
    fn select_hides_blank_node_variables() {
        let store = TestStore::from_turtle(DATA);
        let results = query(&store, "(bgp (triple _:s <http://example.com/p> ?o))");
        insta::assert_snapshot!(results, @r"
        {?o -> <http://example.com/b>}
        {?o -> <http://example.com/c>}
        ");
    }

    #[test]
    fn ask() {
        let store = TestStore::from_turtle(DATA);
        let results = query(&store, "(ask (bgp (triple ?s <http://example.com/p> <http://example.com/c>)))");
        assert_eq!(results.as_boolean(), Some(true));
        let results = query(&store, "(ask (bgp (triple ?s <http://example.com/q> ?o)))");
        assert_eq!(results.as_boolean(), Some(false));
    }

    #[test]
    fn construct_skips_ill_formed_triples() {
        let store = TestStore::from_turtle(DATA);
        let results = query(
            &store,
            "(construct ((triple ?o <http://example.com/inverse> <http://example.com/a>)) (bgp (triple <http://example.com/a> <http://example.com/p> ?o)))",
        );
        insta::assert_snapshot!(results, @"<http://example.com/b> <http://example.com/inverse> <http://example.com/a> .");
    }

    #[test]
    fn top_level_expression_errors_are_returned() {
        let store = TestStore::default();
        let expression: Expression = "(/ 1 0)".parse().unwrap();
        let error = evaluate_expression(
            &expression,
            &Solution::new(),
            &store,
            &ExecutionOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(
            error,
            QueryEvaluationError::Expression(EvalError::DivisionByZero)
        ));
    }

    #[test]
    fn exists_sees_the_current_solution() {
        let store = TestStore::from_turtle(DATA);
        let results = query(
            &store,
            "(filter (exists (bgp (triple ?o <http://example.com/p> ?x))) (bgp (triple ?s <http://example.com/p> ?o)))",
        );
        assert!(results.into_solutions().unwrap().is_empty());

        let results = query(
            &store,
            "(filter (notexists (bgp (triple ?o <http://example.com/p> ?x))) (bgp (triple ?s <http://example.com/p> ?o)))",
        );
        assert_eq!(results.into_solutions().unwrap().len(), 2);
    }

    #[test]
    fn now_is_fixed_per_execution() {
        let store = TestStore::default();
        let options = ExecutionOptions::default();
        let expression: Expression = "(= (now) (now))".parse().unwrap();
        insta::assert_snapshot!(
            evaluate_expression(&expression, &Solution::new(), &store, &options).unwrap(),
            @r#""true"^^<http://www.w3.org/2001/XMLSchema#boolean>"#
        );
    }
}
