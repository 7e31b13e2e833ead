use crate::{GraphName, NamedNode};
use std::fmt::Display;

/// The active graph defines which graphs can partake in the pattern matching process.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActiveGraph {
    /// Only the default graph forms the active graph.
    #[default]
    DefaultGraph,
    /// The merge of all graphs, including the default graph, forms the active graph.
    AllGraphs,
    /// The merge of a set of graphs forms the active graph. This is the default graph of a query
    /// that restricts its data set.
    Union(Vec<GraphName>),
    /// A single named graph is the active graph. This is the case inside a `GRAPH` pattern.
    NamedGraph(NamedNode),
}

impl Display for ActiveGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActiveGraph::DefaultGraph => write!(f, "Default Graph"),
            ActiveGraph::AllGraphs => write!(f, "All Graphs"),
            ActiveGraph::Union(graphs) => {
                write!(f, "Union of [")?;
                for (i, graph) in graphs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{graph}")?;
                }
                write!(f, "]")
            }
            ActiveGraph::NamedGraph(name) => write!(f, "Named Graph {name}"),
        }
    }
}
