use crate::sparql::error::QueryEvaluationError;
use crate::sparql::EvalContext;
use rdf_algebra_model::{
    term_to_subject, BlankNode, Graph, NamedNodePattern, Solution, Solutions, Subject, Term,
    TermPattern, Triple, TriplePattern, Variable,
};
use rustc_hash::{FxHashMap, FxHashSet};

/// Instantiates `template` once per solution.
///
/// Blank nodes of the template are replaced by fresh blank nodes for every solution. Triples with
/// unbound variables or with a literal in the subject position are skipped.
pub(crate) fn construct(template: &[TriplePattern], solutions: &Solutions) -> Graph {
    let mut graph = Graph::new();
    for solution in solutions {
        let mut blank_nodes = FxHashMap::default();
        for pattern in template {
            let pattern = with_fresh_blank_nodes(pattern, &mut blank_nodes);
            if let Some(triple) = pattern.instantiate(solution) {
                graph.insert(&triple);
            }
        }
    }
    graph
}

/// Replaces the blank nodes of `pattern` with the fresh blank nodes in `blank_nodes`, creating
/// them as needed.
pub(crate) fn with_fresh_blank_nodes(
    pattern: &TriplePattern,
    blank_nodes: &mut FxHashMap<BlankNode, BlankNode>,
) -> TriplePattern {
    TriplePattern {
        subject: term_with_fresh_blank_nodes(&pattern.subject, blank_nodes),
        predicate: pattern.predicate.clone(),
        object: term_with_fresh_blank_nodes(&pattern.object, blank_nodes),
    }
}

fn term_with_fresh_blank_nodes(
    pattern: &TermPattern,
    blank_nodes: &mut FxHashMap<BlankNode, BlankNode>,
) -> TermPattern {
    match pattern {
        TermPattern::Term(Term::BlankNode(node)) => TermPattern::Term(
            blank_nodes
                .entry(node.clone())
                .or_insert_with(BlankNode::default)
                .clone()
                .into(),
        ),
        TermPattern::Triple(triple) => {
            TermPattern::Triple(Box::new(with_fresh_blank_nodes(triple, blank_nodes)))
        }
        _ => pattern.clone(),
    }
}

/// Returns the concise bounded description of the described resources: their outgoing triples,
/// and recursively the outgoing triples of the blank nodes among the objects.
///
/// A resource is either given as a term or as a variable whose bindings in `solutions` are
/// described.
pub(crate) fn describe(
    resources: &[TermPattern],
    solutions: &Solutions,
    ctx: &EvalContext<'_>,
) -> Result<Graph, QueryEvaluationError> {
    let mut pending = Vec::new();
    for resource in resources {
        match resource {
            TermPattern::Variable(variable) => pending.extend(
                solutions
                    .iter()
                    .filter_map(|solution| solution.get(variable).cloned()),
            ),
            _ => pending.extend(resource.to_term()),
        }
    }

    let predicate = Variable::non_distinguished("describe.predicate");
    let object = Variable::non_distinguished("describe.object");
    let scope = ctx.root_scope();
    let mut described = FxHashSet::default();
    let mut graph = Graph::new();
    while let Some(resource) = pending.pop() {
        if !described.insert(resource.clone()) {
            continue;
        }
        let Some(subject) = term_to_subject(resource.clone()) else {
            continue;
        };
        let pattern = TriplePattern::new(
            resource,
            NamedNodePattern::Variable(predicate.clone()),
            object.clone(),
        );
        for solution in &ctx.store().query(&pattern, &scope.graph)? {
            let Some(triple) = triple_for(&subject, solution, &predicate, &object) else {
                continue;
            };
            if triple.object.is_blank_node() {
                pending.push(triple.object.clone());
            }
            graph.insert(&triple);
        }
    }
    Ok(graph)
}

fn triple_for(
    subject: &Subject,
    solution: &Solution,
    predicate: &Variable,
    object: &Variable,
) -> Option<Triple> {
    let Term::NamedNode(predicate) = solution.get(predicate)? else {
        return None;
    };
    Some(Triple::new(
        subject.clone(),
        predicate.clone(),
        solution.get(object)?.clone(),
    ))
}
