#![cfg(test)]

use rdf_algebra::engine::{
    evaluate_expression, DefaultGraphMode, ExecutionOptions, QueryEvaluationError, StorageError, UpdateSummary,
};
use rdf_algebra::io::RdfFormat;
use rdf_algebra::logical::{Expression, Query};
use rdf_algebra::model::{EvalError, Literal, Solution, Solutions, Term, Variable};
use rdf_algebra::storage::MemoryStore;
use rdf_algebra::store::Store;

fn store(turtle: &str) -> Store {
    let mut store = Store::new();
    store
        .load_from_reader(RdfFormat::TriG, turtle.as_bytes())
        .unwrap();
    store
}

fn select(store: &Store, query: &str) -> Solutions {
    store.query(query).unwrap().into_solutions().unwrap()
}

fn evaluate(expression: &str) -> Result<Term, QueryEvaluationError> {
    let expression: Expression = expression.parse().unwrap();
    evaluate_expression(
        &expression,
        &Solution::new(),
        Store::new().storage(),
        &ExecutionOptions::default(),
    )
}

/// The sorted string forms of the values of `variable`.
fn values(solutions: &Solutions, variable: &str) -> Vec<String> {
    let mut values = solutions
        .iter()
        .map(|solution| {
            solution
                .get(&Variable::new_unchecked(variable))
                .map_or_else(String::new, Term::to_string)
        })
        .collect::<Vec<_>>();
    values.sort();
    values
}

#[test]
fn bgp_matches_single_triple() {
    let store = store("<http://example.com/x> <http://example.com/y> <http://example.com/z> .");
    insta::assert_snapshot!(
        select(&store, "(bgp (triple ?s ?p ?o))"),
        @"{?o -> <http://example.com/z>, ?p -> <http://example.com/y>, ?s -> <http://example.com/x>}"
    );
}

#[test]
fn group_by_subject_counts_objects() {
    let store = store(
        r#"
        @prefix ex: <http://example.com/> .
        ex:s1 ex:p 1, 2 .
        ex:s2 ex:p 3 .
        "#,
    );
    insta::assert_snapshot!(
        select(
            &store,
            "(prefix ((ex: <http://example.com/>)) (project (?s ?count) (group (?s) ((?count (count ?o))) (bgp (triple ?s ex:p ?o)))))"
        ),
        @r#"
    {?count -> "2"^^<http://www.w3.org/2001/XMLSchema#integer>, ?s -> <http://example.com/s1>}
    {?count -> "1"^^<http://www.w3.org/2001/XMLSchema#integer>, ?s -> <http://example.com/s2>}
    "#
    );
}

#[test]
fn aggregates_over_empty_group() {
    let store = Store::new();
    insta::assert_snapshot!(
        select(
            &store,
            "(group () ((?sum (sum ?o)) (?max (max ?o))) (bgp (triple ?s <http://example.com/p> ?o)))"
        ),
        @r#"{?sum -> "0"^^<http://www.w3.org/2001/XMLSchema#integer>}"#
    );
}

#[test]
fn division_by_zero() {
    assert!(matches!(
        evaluate("(/ 1 0)"),
        Err(QueryEvaluationError::Expression(EvalError::DivisionByZero))
    ));

    let Term::Literal(nan) =
        evaluate(r#"(/ 1 "0.0"^^<http://www.w3.org/2001/XMLSchema#double>)"#).unwrap()
    else {
        panic!("Expected a literal");
    };
    assert_eq!(nan.value(), "NaN");
}

#[test]
fn order_by_mixed_types_is_total() {
    let store = store(
        r#"
        @prefix ex: <http://example.com/> .
        ex:a a ex:T ; ex:v "x" .
        ex:b a ex:T ; ex:v 3 .
        ex:c a ex:T ; ex:v 1 .
        ex:d a ex:T .
        "#,
    );
    insta::assert_snapshot!(
        select(
            &store,
            "(prefix ((ex: <http://example.com/>) (rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>))
               (order (?v)
                 (leftjoin (bgp (triple ?s rdf:type ex:T)) (bgp (triple ?s ex:v ?v)))))"
        ),
        @r#"
    {?s -> <http://example.com/d>}
    {?s -> <http://example.com/c>, ?v -> "1"^^<http://www.w3.org/2001/XMLSchema#integer>}
    {?s -> <http://example.com/b>, ?v -> "3"^^<http://www.w3.org/2001/XMLSchema#integer>}
    {?s -> <http://example.com/a>, ?v -> "x"}
    "#
    );
}

#[test]
fn filter_on_incomparable_values_excludes_the_row() {
    let store = store(
        r#"
        @prefix ex: <http://example.com/> .
        ex:a ex:v 1 ; ex:w "x" .
        ex:b ex:v 1 ; ex:w 2 .
        "#,
    );
    insta::assert_snapshot!(
        select(
            &store,
            "(prefix ((ex: <http://example.com/>))
               (filter (< ?v ?w) (bgp (triple ?s ex:v ?v) (triple ?s ex:w ?w))))"
        ),
        @r#"{?s -> <http://example.com/b>, ?v -> "1"^^<http://www.w3.org/2001/XMLSchema#integer>, ?w -> "2"^^<http://www.w3.org/2001/XMLSchema#integer>}"#
    );
}

#[test]
fn one_or_more_path_terminates_on_cycles() {
    let store = store(
        r#"
        @prefix ex: <http://example.com/> .
        ex:a ex:p ex:b .
        ex:b ex:p ex:a .
        "#,
    );
    let solutions = select(
        &store,
        "(path <http://example.com/a> (path+ <http://example.com/p>) ?x)",
    );
    assert_eq!(
        values(&solutions, "x"),
        ["<http://example.com/a>", "<http://example.com/b>"]
    );
}

#[test]
fn zero_or_one_sequence_path() {
    let store = store(
        r#"
        @prefix ex: <http://example.com/> .
        ex:a ex:p ex:c .
        ex:c ex:p ex:b .
        "#,
    );
    let path = "(path? (seq <http://example.com/p> <http://example.com/p>))";
    let between = select(
        &store,
        &format!("(path <http://example.com/a> {path} <http://example.com/b>)"),
    );
    assert_eq!(between, Solutions::unit());

    let identity = select(
        &store,
        &format!("(path <http://example.com/a> {path} <http://example.com/a>)"),
    );
    assert_eq!(identity, Solutions::unit());
}

#[test]
fn left_join_with_empty_pattern_is_identity() {
    let store = store(
        r#"
        @prefix ex: <http://example.com/> .
        ex:a ex:p 1, 2 .
        ex:b ex:q ex:c .
        "#,
    );
    let options = ExecutionOptions::default().without_optimizations();
    let left_join = store
        .query_opt("(leftjoin (bgp (triple ?s ?p ?o)) (bgp))", &options)
        .unwrap();
    let plain = store
        .query_opt("(bgp (triple ?s ?p ?o))", &options)
        .unwrap();
    assert_eq!(left_join, plain);
}

#[test]
fn textual_form_round_trips() {
    let query: Query = r#"(construct ((triple ?s <http://example.com/label> ?label))
        (distinct (project (?s ?label)
          (extend ((?label (concat (str ?o) "!")))
            (filter (exists (bgp (triple ?s <http://example.com/q> ?x)))
              (path ?s (path* (alt <http://example.com/p> (reverse <http://example.com/r>))) ?o))))))"#
        .parse()
        .unwrap();
    assert_eq!(query.to_string().parse::<Query>().unwrap(), query);
}

#[test]
fn updates() {
    let mut store = Store::new();
    let summary = store
        .update(
            "(insertdata (triple <http://example.com/a> <http://example.com/p> 1) (triple <http://example.com/b> <http://example.com/p> 2))",
        )
        .unwrap();
    assert_eq!(summary, UpdateSummary { inserted: 2, deleted: 0 });

    let summary = store
        .update(
            "(modify (delete (triple ?s <http://example.com/p> ?o)) (insert (triple ?s <http://example.com/q> ?o)) (filter (> ?o 1) (bgp (triple ?s <http://example.com/p> ?o))))",
        )
        .unwrap();
    assert_eq!(summary, UpdateSummary { inserted: 1, deleted: 1 });
    assert_eq!(store.len(), 2);
}

#[test]
fn read_only_store_rejects_updates() {
    let mut store = Store::from(MemoryStore::new().read_only());
    let error = store
        .update("(insertdata (triple <http://example.com/a> <http://example.com/p> 1))")
        .unwrap_err();
    assert!(matches!(
        error,
        QueryEvaluationError::Storage(StorageError::Immutable)
    ));

    let summary = store
        .update("(insertdata silent (triple <http://example.com/a> <http://example.com/p> 1))")
        .unwrap();
    assert_eq!(summary, UpdateSummary::default());
}

#[test]
fn construct_and_describe() {
    let store = store(
        r#"
        @prefix ex: <http://example.com/> .
        ex:a ex:p ex:b ; ex:address [ ex:city "Vienna" ] .
        ex:b ex:p ex:c .
        "#,
    );
    let constructed = store
        .query("(construct ((triple ?o <http://example.com/inverse> ?s)) (bgp (triple ?s <http://example.com/p> ?o)))")
        .unwrap();
    insta::assert_snapshot!(constructed, @r"
    <http://example.com/b> <http://example.com/inverse> <http://example.com/a> .
    <http://example.com/c> <http://example.com/inverse> <http://example.com/b> .
    ");

    let described = store
        .query("(describe (<http://example.com/a>) (bgp))")
        .unwrap()
        .into_graph()
        .unwrap();
    assert_eq!(described.len(), 3);
}

#[test]
fn dataset_restricts_the_graphs() {
    let store = store(
        r#"
        @prefix ex: <http://example.com/> .
        ex:g1 { ex:a ex:p 1 . }
        ex:g2 { ex:b ex:p 2 . }
        "#,
    );
    insta::assert_snapshot!(
        select(
            &store,
            "(dataset (default <http://example.com/g1>) (bgp (triple ?s ?p ?o)))"
        ),
        @r#"{?o -> "1"^^<http://www.w3.org/2001/XMLSchema#integer>, ?p -> <http://example.com/p>, ?s -> <http://example.com/a>}"#
    );
    insta::assert_snapshot!(
        select(
            &store,
            "(dataset (named <http://example.com/g2>) (graph ?g (bgp (triple ?s ?p ?o))))"
        ),
        @r#"{?g -> <http://example.com/g2>, ?o -> "2"^^<http://www.w3.org/2001/XMLSchema#integer>, ?p -> <http://example.com/p>, ?s -> <http://example.com/b>}"#
    );
}

#[test]
fn ask_over_union_of_all_graphs() {
    let store = store("<http://example.com/g> { <http://example.com/a> <http://example.com/p> 1 . }");
    let query = "(ask (bgp (triple ?s <http://example.com/p> ?o)))";
    assert_eq!(store.query(query).unwrap().as_boolean(), Some(false));

    let options =
        ExecutionOptions::default().with_default_graph(DefaultGraphMode::UnionOfAllGraphs);
    assert_eq!(
        store.query_opt(query, &options).unwrap().as_boolean(),
        Some(true)
    );
}

#[test]
fn literal_results_keep_their_datatype() {
    let store = Store::new();
    let solutions = select(&store, "(extend ((?x (+ 1 2))) (bgp))");
    let solution = solutions.iter().next().unwrap();
    assert_eq!(
        solution.iter().next().map(|(_, term)| term.clone()),
        Some(Literal::from(3).into())
    );
}
