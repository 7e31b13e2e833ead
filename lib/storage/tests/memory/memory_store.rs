use crate::{example_quad, example_quad_in_graph};
use oxrdfio::RdfFormat;
use rdf_algebra_engine::{
    execute_query, ExecutionOptions, LoadOptions, Queryable, StorageError,
};
use rdf_algebra_logical::Query;
use rdf_algebra_model::{
    ActiveGraph, GraphName, NamedNode, Term, TriplePattern, Variable,
};
use rdf_algebra_storage::MemoryStore;

fn any_triple() -> TriplePattern {
    TriplePattern::new(
        Variable::new_unchecked("s"),
        Variable::new_unchecked("p"),
        Variable::new_unchecked("o"),
    )
}

fn graph(name: &str) -> NamedNode {
    NamedNode::new_unchecked(name)
}

#[test]
fn insert_quad() {
    let mut store = MemoryStore::new();

    assert!(store.insert(&example_quad()).unwrap());
    assert!(!store.insert(&example_quad()).unwrap());

    assert_eq!(store.len(), 1);
}

#[test]
fn insert_quad_then_read() {
    let mut store = MemoryStore::new();
    store.insert(&example_quad()).unwrap();

    let solutions = store
        .query(&any_triple(), &ActiveGraph::DefaultGraph)
        .unwrap();
    insta::assert_snapshot!(solutions, @r#"{?o -> "value", ?p -> <http://example.com/predicate>, ?s -> <http://example.com/subject>}"#);
}

#[test]
fn named_graph_is_not_part_of_default_graph() {
    let mut store = MemoryStore::new();
    store
        .insert(&example_quad_in_graph("http://example.com/g"))
        .unwrap();

    assert!(store
        .query(&any_triple(), &ActiveGraph::DefaultGraph)
        .unwrap()
        .is_empty());
    assert_eq!(
        store
            .query(
                &any_triple(),
                &ActiveGraph::NamedGraph(graph("http://example.com/g"))
            )
            .unwrap()
            .len(),
        1
    );
    assert_eq!(
        store.named_graphs().unwrap(),
        vec![graph("http://example.com/g")]
    );
}

#[test]
fn merged_graphs_match_a_triple_once() {
    let mut store = MemoryStore::new();
    store.insert(&example_quad()).unwrap();
    store
        .insert(&example_quad_in_graph("http://example.com/g1"))
        .unwrap();
    store
        .insert(&example_quad_in_graph("http://example.com/g2"))
        .unwrap();

    let all = store.query(&any_triple(), &ActiveGraph::AllGraphs).unwrap();
    assert_eq!(all.len(), 1);

    let union = ActiveGraph::Union(vec![
        GraphName::NamedNode(graph("http://example.com/g1")),
        GraphName::NamedNode(graph("http://example.com/g2")),
        GraphName::NamedNode(graph("http://example.com/unknown")),
    ]);
    assert_eq!(store.query(&any_triple(), &union).unwrap().len(), 1);
}

#[test]
fn empty_named_graph() {
    let mut store = MemoryStore::new();
    let name = graph("http://example.com/empty");

    assert!(!store.contains_named_graph(&name).unwrap());
    assert!(store.insert_named_graph(&name).unwrap());
    assert!(!store.insert_named_graph(&name).unwrap());
    assert!(store.contains_named_graph(&name).unwrap());
    assert!(store.is_empty());
}

#[test]
fn named_graph_survives_removal_of_its_quads() {
    let quad = example_quad_in_graph("http://example.com/g");
    let mut store = MemoryStore::from_quads([quad.clone()]).unwrap();

    assert!(store.remove(&quad).unwrap());
    assert!(!store.remove(&quad).unwrap());
    assert!(store
        .contains_named_graph(&graph("http://example.com/g"))
        .unwrap());
}

#[test]
fn subjects_and_objects() {
    let mut store = MemoryStore::new();
    store.insert(&example_quad()).unwrap();

    let terms = store
        .subjects_and_objects(&ActiveGraph::DefaultGraph)
        .unwrap()
        .iter()
        .map(Term::to_string)
        .collect::<Vec<_>>();
    assert_eq!(terms, ["<http://example.com/subject>", "\"value\""]);
}

#[test]
fn read_only_store_rejects_modifications() {
    let mut store = MemoryStore::from_quads([example_quad()])
        .unwrap()
        .read_only();

    assert!(!store.is_mutable());
    assert!(matches!(
        store.insert(&example_quad_in_graph("http://example.com/g")),
        Err(StorageError::Immutable)
    ));
    assert!(matches!(store.clear(), Err(StorageError::Immutable)));
    assert!(store.contains(&example_quad()));
}

#[test]
fn load_turtle_into_graph() {
    let mut store = MemoryStore::new();
    let data = b"@prefix ex: <http://example.com/> . <a> ex:p ex:b , ex:c .";
    let options = LoadOptions::default()
        .with_format(RdfFormat::Turtle)
        .with_base_iri("http://example.com/")
        .with_graph(graph("http://example.com/g"));

    let count = store
        .load_from_reader(&mut data.as_slice(), &options)
        .unwrap();
    assert_eq!(count, 2);

    let quads = store
        .quads()
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    insta::assert_snapshot!(quads.join("\n"), @r"
    <http://example.com/a> <http://example.com/p> <http://example.com/b> <http://example.com/g>
    <http://example.com/a> <http://example.com/p> <http://example.com/c> <http://example.com/g>
    ");
}

#[test]
fn load_requires_a_format() {
    let mut store = MemoryStore::new();
    let result = store.load_from_reader(&mut b"".as_slice(), &LoadOptions::default());
    assert!(matches!(result, Err(StorageError::UnknownFormat(_))));
}

#[test]
fn execute_query_over_named_graphs() {
    let mut store = MemoryStore::new();
    store
        .insert(&example_quad_in_graph("http://example.com/g1"))
        .unwrap();
    store
        .insert(&example_quad_in_graph("http://example.com/g2"))
        .unwrap();

    let query: Query = "(graph ?g (bgp (triple ?s <http://example.com/predicate> ?o)))"
        .parse()
        .unwrap();
    let solutions = execute_query(&query, &store, &ExecutionOptions::default())
        .unwrap()
        .into_solutions()
        .unwrap();
    insta::assert_snapshot!(solutions, @r#"
    {?g -> <http://example.com/g1>, ?o -> "value", ?s -> <http://example.com/subject>}
    {?g -> <http://example.com/g2>, ?o -> "value", ?s -> <http://example.com/subject>}
    "#);
}
