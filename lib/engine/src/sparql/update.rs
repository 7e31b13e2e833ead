use crate::error::StorageError;
use crate::queryable::Queryable;
use crate::results::UpdateSummary;
use crate::sparql::error::QueryEvaluationError;
use crate::sparql::forms::with_fresh_blank_nodes;
use crate::sparql::{EvalContext, Executable, Updatable};
use crate::ExecutionOptions;
use rdf_algebra_logical::{GraphPattern, UpdateOperation};
use rdf_algebra_model::{
    GraphNamePattern, NamedNodePattern, Quad, QuadPattern, TriplePattern,
};
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

impl Updatable for UpdateOperation {
    fn apply(
        &self,
        store: &mut dyn Queryable,
        options: &ExecutionOptions,
    ) -> Result<UpdateSummary, QueryEvaluationError> {
        let result = if store.is_mutable() {
            apply_to_mutable(self, store, options)
        } else {
            Err(StorageError::Immutable.into())
        };

        match result {
            Err(QueryEvaluationError::Storage(error)) if self.is_silent() => {
                warn!(%error, "Ignoring a storage error of a silent update");
                Ok(UpdateSummary::default())
            }
            result => result,
        }
    }
}

fn apply_to_mutable(
    operation: &UpdateOperation,
    store: &mut dyn Queryable,
    options: &ExecutionOptions,
) -> Result<UpdateSummary, QueryEvaluationError> {
    match operation {
        UpdateOperation::InsertData { data, .. } => insert(store, data),
        UpdateOperation::DeleteData { data, .. } => delete(store, data),
        UpdateOperation::DeleteWhere { pattern, .. } => {
            modify(store, options, pattern, &[], &delete_where_pattern(pattern))
        }
        UpdateOperation::Modify {
            delete,
            insert,
            pattern,
            ..
        } => modify(store, options, delete, insert, pattern),
    }
}

fn insert(store: &mut dyn Queryable, quads: &[Quad]) -> Result<UpdateSummary, QueryEvaluationError> {
    let mut summary = UpdateSummary::default();
    for quad in quads {
        if store.insert(quad)? {
            summary.inserted += 1;
        }
    }
    Ok(summary)
}

fn delete(store: &mut dyn Queryable, quads: &[Quad]) -> Result<UpdateSummary, QueryEvaluationError> {
    let mut summary = UpdateSummary::default();
    for quad in quads {
        if store.remove(quad)? {
            summary.deleted += 1;
        }
    }
    Ok(summary)
}

/// Evaluates `pattern` and instantiates the templates with its solutions. The quads of `delete` are
/// removed before the quads of `insert` are added.
fn modify(
    store: &mut dyn Queryable,
    options: &ExecutionOptions,
    delete_template: &[QuadPattern],
    insert_template: &[QuadPattern],
    pattern: &GraphPattern,
) -> Result<UpdateSummary, QueryEvaluationError> {
    let (deletions, insertions) = {
        let ctx = EvalContext::new(&*store, options);
        let solutions = pattern.execute(&ctx, &ctx.root_scope())?;
        debug!(count = solutions.len(), "Instantiating update templates");

        let mut deletions = Vec::new();
        let mut insertions = Vec::new();
        for solution in &solutions {
            deletions.extend(
                delete_template
                    .iter()
                    .filter_map(|template| template.instantiate(solution)),
            );
            let mut blank_nodes = FxHashMap::default();
            for template in insert_template {
                let template = QuadPattern::new(
                    with_fresh_blank_nodes(&template.pattern, &mut blank_nodes),
                    template.graph_name.clone(),
                );
                insertions.extend(template.instantiate(solution));
            }
        }
        (deletions, insertions)
    };

    let mut summary = delete(store, &deletions)?;
    summary.add(insert(store, &insertions)?);
    Ok(summary)
}

/// The pattern of `DELETE WHERE`: the patterns of the default graph form a basic graph pattern, the
/// patterns of each named graph a `GRAPH` pattern.
fn delete_where_pattern(patterns: &[QuadPattern]) -> GraphPattern {
    let mut default = Vec::new();
    let mut named: Vec<(NamedNodePattern, Vec<TriplePattern>)> = Vec::new();
    for pattern in patterns {
        let name = match &pattern.graph_name {
            GraphNamePattern::DefaultGraph => {
                default.push(pattern.pattern.clone());
                continue;
            }
            GraphNamePattern::NamedNode(node) => NamedNodePattern::NamedNode(node.clone()),
            GraphNamePattern::Variable(variable) => NamedNodePattern::Variable(variable.clone()),
        };
        match named.iter_mut().find(|(graph, _)| *graph == name) {
            Some((_, triples)) => triples.push(pattern.pattern.clone()),
            None => named.push((name, vec![pattern.pattern.clone()])),
        }
    }

    named
        .into_iter()
        .map(|(name, patterns)| GraphPattern::Graph {
            name,
            inner: Box::new(GraphPattern::Bgp { patterns }),
        })
        .fold(GraphPattern::Bgp { patterns: default }, |left, right| {
            GraphPattern::Join {
                left: Box::new(left),
                right: Box::new(right),
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_store::TestStore;
    use rdf_algebra_logical::Update;

    const DATA: &str = r#"
        @prefix ex: <http://example.com/> .
        ex:a ex:p 1 .
        ex:b ex:p 2 .
    "#;

    fn apply(store: &mut TestStore, update: &str) -> Result<UpdateSummary, QueryEvaluationError> {
        let update: Update = update.parse().unwrap();
        let mut summary = UpdateSummary::default();
        for operation in &update.operations {
            summary.add(operation.apply(store, &ExecutionOptions::default())?);
        }
        Ok(summary)
    }

    #[test]
    fn modify_deletes_before_inserting() {
        let mut store = TestStore::from_turtle(DATA);
        let summary = apply(
            &mut store,
            "(modify (delete (triple ?s <http://example.com/p> ?o)) (insert (triple ?s <http://example.com/q> ?o)) (bgp (triple ?s <http://example.com/p> ?o)))",
        )
        .unwrap();
        assert_eq!(summary, UpdateSummary { inserted: 2, deleted: 2 });
        assert!(store
            .quads()
            .iter()
            .all(|quad| quad.predicate.as_str() == "http://example.com/q"));
    }

    #[test]
    fn delete_where() {
        let mut store = TestStore::from_turtle(DATA);
        let summary = apply(
            &mut store,
            "(deletewhere (triple <http://example.com/a> ?p ?o))",
        )
        .unwrap();
        assert_eq!(summary.deleted, 1);
        assert_eq!(store.quads().len(), 1);
    }

    #[test]
    fn insert_fresh_blank_nodes() {
        let mut store = TestStore::from_turtle(DATA);
        apply(
            &mut store,
            "(modify (insert (triple ?s <http://example.com/node> _:b)) (bgp (triple ?s <http://example.com/p> ?o)))",
        )
        .unwrap();
        let objects = store
            .quads()
            .iter()
            .filter(|quad| quad.predicate.as_str() == "http://example.com/node")
            .map(|quad| quad.object.clone())
            .collect::<Vec<_>>();
        assert_eq!(objects.len(), 2);
        assert_ne!(objects[0], objects[1]);
    }

    #[test]
    fn immutable_store() {
        let mut store = TestStore::from_turtle(DATA).read_only();
        let error = apply(
            &mut store,
            "(insertdata (triple <http://example.com/c> <http://example.com/p> 3))",
        )
        .unwrap_err();
        assert!(matches!(
            error,
            QueryEvaluationError::Storage(StorageError::Immutable)
        ));

        let summary = apply(
            &mut store,
            "(insertdata silent (triple <http://example.com/c> <http://example.com/p> 3))",
        )
        .unwrap();
        assert_eq!(summary, UpdateSummary::default());
    }
}
