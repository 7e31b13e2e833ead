use crate::GraphPattern;
use rdf_algebra_model::{Quad, QuadPattern, TermPattern, TriplePattern};

/// A query form wrapped around a graph pattern.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Query {
    /// Returns the solutions of the pattern.
    Select(GraphPattern),
    /// Returns whether the pattern has at least one solution.
    Ask(GraphPattern),
    /// Instantiates the template for every solution of the pattern.
    Construct {
        template: Vec<TriplePattern>,
        pattern: GraphPattern,
    },
    /// Describes the given resources. Variables are replaced by their bindings in the solutions of
    /// the pattern.
    Describe {
        terms: Vec<TermPattern>,
        pattern: GraphPattern,
    },
}

impl Query {
    pub fn pattern(&self) -> &GraphPattern {
        match self {
            Query::Select(pattern)
            | Query::Ask(pattern)
            | Query::Construct { pattern, .. }
            | Query::Describe { pattern, .. } => pattern,
        }
    }

    pub fn pattern_mut(&mut self) -> &mut GraphPattern {
        match self {
            Query::Select(pattern)
            | Query::Ask(pattern)
            | Query::Construct { pattern, .. }
            | Query::Describe { pattern, .. } => pattern,
        }
    }
}

/// A single operation of an [Update].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum UpdateOperation {
    InsertData {
        data: Vec<Quad>,
        silent: bool,
    },
    DeleteData {
        data: Vec<Quad>,
        silent: bool,
    },
    /// Deletes the quads matching the patterns.
    DeleteWhere {
        pattern: Vec<QuadPattern>,
        silent: bool,
    },
    /// `DELETE { .. } INSERT { .. } WHERE { .. }`. The templates are instantiated for every
    /// solution of the pattern. All deletions happen before the insertions.
    Modify {
        delete: Vec<QuadPattern>,
        insert: Vec<QuadPattern>,
        pattern: Box<GraphPattern>,
        silent: bool,
    },
}

impl UpdateOperation {
    pub fn is_silent(&self) -> bool {
        match self {
            UpdateOperation::InsertData { silent, .. }
            | UpdateOperation::DeleteData { silent, .. }
            | UpdateOperation::DeleteWhere { silent, .. }
            | UpdateOperation::Modify { silent, .. } => *silent,
        }
    }
}

/// A sequence of update operations that are executed in order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Update {
    pub operations: Vec<UpdateOperation>,
}

impl Update {
    pub fn new(operations: impl IntoIterator<Item = UpdateOperation>) -> Self {
        Self {
            operations: operations.into_iter().collect(),
        }
    }
}

/// Everything that the textual exchange form can describe at its root.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Query(Query),
    Update(Update),
}

impl From<Query> for Operation {
    fn from(value: Query) -> Self {
        Operation::Query(value)
    }
}

impl From<GraphPattern> for Operation {
    fn from(value: GraphPattern) -> Self {
        Operation::Query(Query::Select(value))
    }
}

impl From<Update> for Operation {
    fn from(value: Update) -> Self {
        Operation::Update(value)
    }
}

