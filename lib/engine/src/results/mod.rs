//! The results of executing an operation.

use rdf_algebra_model::{Graph, Solutions};
use std::fmt::{Display, Formatter};

/// The results of a query or an update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryResults {
    /// The solutions of a `SELECT` query.
    Solutions(Solutions),
    /// The result of an `ASK` query.
    Boolean(bool),
    /// The result of a `CONSTRUCT` or `DESCRIBE` query.
    Graph(Graph),
    /// The summary of an update.
    Updated(UpdateSummary),
}

impl QueryResults {
    /// Returns the solutions, if these are the results of a `SELECT` query.
    pub fn into_solutions(self) -> Option<Solutions> {
        match self {
            QueryResults::Solutions(solutions) => Some(solutions),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            QueryResults::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn into_graph(self) -> Option<Graph> {
        match self {
            QueryResults::Graph(graph) => Some(graph),
            _ => None,
        }
    }
}

impl From<Solutions> for QueryResults {
    fn from(value: Solutions) -> Self {
        QueryResults::Solutions(value)
    }
}

impl Display for QueryResults {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryResults::Solutions(solutions) => solutions.fmt(f),
            QueryResults::Boolean(value) => value.fmt(f),
            QueryResults::Graph(graph) => {
                for triple in graph {
                    writeln!(f, "{triple} .")?;
                }
                Ok(())
            }
            QueryResults::Updated(summary) => summary.fmt(f),
        }
    }
}

/// The number of quads that an update changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct UpdateSummary {
    pub inserted: usize,
    pub deleted: usize,
}

impl UpdateSummary {
    pub(crate) fn add(&mut self, other: UpdateSummary) {
        self.inserted += other.inserted;
        self.deleted += other.deleted;
    }
}

impl Display for UpdateSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "inserted {}, deleted {}", self.inserted, self.deleted)
    }
}
