use crate::index::{EncodedQuad, IndexPermutations, IndexScanInstructions};
use crate::memory::{ObjectId, ObjectIdMapping, DEFAULT_GRAPH_ID};
use oxrdfio::RdfParser;
use rdf_algebra_engine::{LoadOptions, Queryable, StorageError};
use rdf_algebra_model::{
    ActiveGraph, NamedNode, NamedNodePattern, Quad, Solutions, Term, TriplePattern,
};
use rustc_hash::FxHashSet;
use std::io::Read;
use std::iter::once;
use tracing::debug;

/// An in-memory quad store.
///
/// Every term is interned into an [ObjectId]. The encoded quads are kept in a GSPO, a GPOS, and a
/// GOSP permutation and each triple pattern is answered by a range scan over the best suited one.
/// Named graphs are registered when a quad is inserted into them or explicitly with
/// [MemoryStore::insert_named_graph]. They stay registered when their last quad is removed.
///
/// Usage example:
/// ```
/// use rdf_algebra_engine::Queryable;
/// use rdf_algebra_model::*;
/// use rdf_algebra_storage::MemoryStore;
///
/// let ex = NamedNode::new("http://example.com")?;
/// let quad = Quad::new(ex.clone(), ex.clone(), ex.clone(), GraphName::DefaultGraph);
///
/// let mut store = MemoryStore::new();
/// assert!(store.insert(&quad)?);
/// assert!(!store.insert(&quad)?);
/// assert!(store.contains(&quad));
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    mapping: ObjectIdMapping,
    indexes: IndexPermutations,
    read_only: bool,
}

impl MemoryStore {
    /// Creates a new empty, mutable store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that contains `quads`.
    pub fn from_quads(quads: impl IntoIterator<Item = Quad>) -> Result<Self, StorageError> {
        let mut store = Self::new();
        for quad in quads {
            store.insert(&quad)?;
        }
        Ok(store)
    }

    /// Rejects all further modifications of the store.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Returns the number of quads.
    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, quad: &Quad) -> bool {
        self.mapping
            .try_encode_quad(quad)
            .is_some_and(|quad| self.indexes.contains(&quad))
    }

    /// Returns all quads of the store.
    pub fn quads(&self) -> Result<Vec<Quad>, StorageError> {
        self.indexes
            .scan(IndexScanInstructions([None; 4]))
            .map(|quad| self.decode_quad(&quad))
            .collect()
    }

    /// Registers a named graph, even if it holds no quads. Returns `true` if the graph was not
    /// already registered.
    pub fn insert_named_graph(&mut self, graph_name: &NamedNode) -> Result<bool, StorageError> {
        self.check_mutable()?;
        let id = self.mapping.encode_term(&graph_name.clone().into())?;
        Ok(self.indexes.insert_named_graph(id))
    }

    fn check_mutable(&self) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::Immutable);
        }
        Ok(())
    }

    fn decode_quad(&self, quad: &EncodedQuad) -> Result<Quad, StorageError> {
        let triple = self.mapping.decode_triple(quad)?;
        Ok(triple.in_graph(self.mapping.decode_graph_name(quad.graph_name)?))
    }

    /// Returns the ids of the graphs that form `graph`. Graphs that the store does not know are
    /// skipped.
    fn graph_ids(&self, graph: &ActiveGraph) -> Vec<ObjectId> {
        match graph {
            ActiveGraph::DefaultGraph => vec![DEFAULT_GRAPH_ID],
            ActiveGraph::AllGraphs => once(DEFAULT_GRAPH_ID)
                .chain(self.indexes.named_graphs())
                .collect(),
            ActiveGraph::Union(graphs) => graphs
                .iter()
                .filter_map(|graph| self.mapping.try_encode_graph_name(graph))
                .collect(),
            ActiveGraph::NamedGraph(name) => self
                .mapping
                .try_encode_term(&name.clone().into())
                .into_iter()
                .collect(),
        }
    }

    /// Encodes a position of a triple pattern. Returns [None] if the position is bound to a term
    /// that the store does not know, i.e., no triple can match.
    fn encode_position(&self, term: Option<Term>) -> Option<Option<ObjectId>> {
        match term {
            Some(term) => self.mapping.try_encode_term(&term).map(Some),
            None => Some(None),
        }
    }
}

impl Queryable for MemoryStore {
    fn query(
        &self,
        pattern: &TriplePattern,
        graph: &ActiveGraph,
    ) -> Result<Solutions, StorageError> {
        let predicate = match &pattern.predicate {
            NamedNodePattern::NamedNode(node) => Some(Term::from(node.clone())),
            NamedNodePattern::Variable(_) => None,
        };
        let (Some(subject), Some(predicate), Some(object)) = (
            self.encode_position(pattern.subject.to_term()),
            self.encode_position(predicate),
            self.encode_position(pattern.object.to_term()),
        ) else {
            return Ok(Solutions::empty());
        };

        let graph_ids = self.graph_ids(graph);
        let merged = graph_ids.len() > 1;
        let mut seen = FxHashSet::default();
        let mut solutions = Solutions::empty();
        for graph_id in graph_ids {
            let instructions =
                IndexScanInstructions([Some(graph_id), subject, predicate, object]);
            for quad in self.indexes.scan(instructions) {
                if merged && !seen.insert([quad.subject, quad.predicate, quad.object]) {
                    continue;
                }
                // Repeated variables and quoted triple patterns are checked here.
                let triple = self.mapping.decode_triple(&quad)?;
                if let Some(solution) = pattern.solution_for(&triple) {
                    solutions.push(solution);
                }
            }
        }
        Ok(solutions)
    }

    fn subjects_and_objects(&self, graph: &ActiveGraph) -> Result<Vec<Term>, StorageError> {
        let mut seen = FxHashSet::default();
        let mut terms = Vec::new();
        for graph_id in self.graph_ids(graph) {
            let instructions = IndexScanInstructions([Some(graph_id), None, None, None]);
            for quad in self.indexes.scan(instructions) {
                for id in [quad.subject, quad.object] {
                    if seen.insert(id) {
                        terms.push(self.mapping.decode_term(id)?.clone());
                    }
                }
            }
        }
        Ok(terms)
    }

    fn named_graphs(&self) -> Result<Vec<NamedNode>, StorageError> {
        let mut graphs = Vec::new();
        for id in self.indexes.named_graphs() {
            // Blank node graph names cannot be addressed by a query.
            if let Term::NamedNode(node) = self.mapping.decode_term(id)? {
                graphs.push(node.clone());
            }
        }
        Ok(graphs)
    }

    fn contains_named_graph(&self, graph_name: &NamedNode) -> Result<bool, StorageError> {
        Ok(self
            .mapping
            .try_encode_term(&graph_name.clone().into())
            .is_some_and(|id| self.indexes.contains_named_graph(id)))
    }

    fn insert(&mut self, quad: &Quad) -> Result<bool, StorageError> {
        self.check_mutable()?;
        let quad = self.mapping.encode_quad(quad)?;
        Ok(self.indexes.insert(&quad))
    }

    fn remove(&mut self, quad: &Quad) -> Result<bool, StorageError> {
        self.check_mutable()?;
        Ok(match self.mapping.try_encode_quad(quad) {
            Some(quad) => self.indexes.remove(&quad),
            None => false,
        })
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.check_mutable()?;
        self.indexes.clear();
        self.mapping.clear();
        Ok(())
    }

    fn load_from_reader(
        &mut self,
        reader: &mut dyn Read,
        options: &LoadOptions,
    ) -> Result<usize, StorageError> {
        self.check_mutable()?;
        let format = options
            .format
            .ok_or_else(|| StorageError::UnknownFormat("the reader".to_owned()))?;
        let mut parser = RdfParser::from_format(format)
            .with_default_graph(options.graph.clone())
            .rename_blank_nodes();
        if let Some(base_iri) = &options.base_iri {
            parser = parser.with_base_iri(base_iri.as_str())?;
        }

        let mut count = 0;
        for quad in parser.for_reader(reader) {
            if self.insert(&quad?)? {
                count += 1;
            }
        }
        debug!(count, %format, "Loaded quads");
        Ok(count)
    }

    fn is_mutable(&self) -> bool {
        !self.read_only
    }
}
