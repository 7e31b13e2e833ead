use crate::options::{DefaultGraphMode, ExecutionOptions};
use crate::queryable::Queryable;
use crate::sparql::error::QueryEvaluationError;
use rdf_algebra_functions::BNodeCache;
use rdf_algebra_model::{ActiveGraph, DateTime, Iri, NamedNode, Solution, Term, Variable};
use std::cell::{Cell, RefCell};

/// The state of one execution.
///
/// The context is created when an execution starts and dropped when it finishes. Everything that
/// must stay the same for the whole execution lives here: the value of `NOW()`, the blank nodes of
/// `BNODE(label)`, and the counter of synthesized variables.
pub struct EvalContext<'ctx> {
    store: &'ctx dyn Queryable,
    options: &'ctx ExecutionOptions,
    now: DateTime,
    bnodes: BNodeCache,
    fresh_variables: Cell<usize>,
    depth: Cell<usize>,
    /// An error that occurred inside an expression (e.g., in the pattern of an `EXISTS`) and must
    /// abort the execution.
    fatal: RefCell<Option<QueryEvaluationError>>,
}

impl<'ctx> EvalContext<'ctx> {
    pub fn new(store: &'ctx dyn Queryable, options: &'ctx ExecutionOptions) -> Self {
        Self {
            store,
            options,
            now: options.now.unwrap_or_else(DateTime::now),
            bnodes: BNodeCache::new(),
            fresh_variables: Cell::new(0),
            depth: Cell::new(0),
            fatal: RefCell::new(None),
        }
    }

    pub fn store(&self) -> &'ctx dyn Queryable {
        self.store
    }

    pub fn options(&self) -> &'ctx ExecutionOptions {
        self.options
    }

    /// The value of `NOW()` for this execution.
    pub fn now(&self) -> DateTime {
        self.now
    }

    pub fn bnodes(&self) -> &BNodeCache {
        &self.bnodes
    }

    /// The scope at the root of the operator tree.
    pub fn root_scope(&self) -> Scope {
        let graph = match self.options.default_graph {
            DefaultGraphMode::DefaultGraph => ActiveGraph::DefaultGraph,
            DefaultGraphMode::UnionOfAllGraphs => ActiveGraph::AllGraphs,
        };
        Scope {
            graph,
            named_graphs: None,
            base_iri: self.options.base_iri.clone(),
            substitution: None,
        }
    }

    /// Creates a non-distinguished variable that is not used anywhere else in this execution.
    pub fn fresh_variable(&self) -> Variable {
        let id = self.fresh_variables.get();
        self.fresh_variables.set(id + 1);
        Variable::non_distinguished(format!("path.{id}"))
    }

    /// Increases the evaluation depth until the returned guard is dropped.
    pub(crate) fn enter(&self) -> Result<DepthGuard<'_>, QueryEvaluationError> {
        let depth = self.depth.get() + 1;
        if depth > self.options.max_depth {
            return Err(QueryEvaluationError::DepthLimitExceeded(self.options.max_depth));
        }
        self.depth.set(depth);
        Ok(DepthGuard { depth: &self.depth })
    }

    /// Keeps `error` until the next call to [Self::check_fatal]. Only the first error is kept.
    pub(crate) fn record_fatal(&self, error: QueryEvaluationError) {
        self.fatal.borrow_mut().get_or_insert(error);
    }

    /// Returns the error that was recorded with [Self::record_fatal], if any.
    pub(crate) fn check_fatal(&self) -> Result<(), QueryEvaluationError> {
        match self.fatal.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

pub(crate) struct DepthGuard<'ctx> {
    depth: &'ctx Cell<usize>,
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get() - 1);
    }
}

/// The part of the evaluation state that nested operators may change.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    /// The graph that triple patterns are matched against.
    pub graph: ActiveGraph,
    /// The named graphs that `GRAPH ?g` iterates. [None] stands for all named graphs of the store.
    pub named_graphs: Option<Vec<NamedNode>>,
    /// The base IRI of `IRI()`.
    pub base_iri: Option<Iri<String>>,
    /// The bindings of the solution that an `EXISTS` is evaluated for. The variables are replaced
    /// by these terms before the inner pattern is evaluated.
    pub substitution: Option<Solution>,
}

impl Scope {
    #[must_use]
    pub fn with_graph(&self, graph: ActiveGraph) -> Self {
        Self {
            graph,
            ..self.clone()
        }
    }

    /// Looks up `variable` in the substitution of this scope.
    pub fn substituted(&self, variable: &Variable) -> Option<&Term> {
        self.substitution
            .as_ref()
            .and_then(|substitution| substitution.get(variable))
    }

    /// Returns whether `name` is visible to `GRAPH` in this scope.
    pub fn is_visible(&self, name: &NamedNode) -> bool {
        self.named_graphs
            .as_ref()
            .map_or(true, |named_graphs| named_graphs.contains(name))
    }
}
