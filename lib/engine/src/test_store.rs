use crate::error::StorageError;
use crate::options::LoadOptions;
use crate::queryable::Queryable;
use itertools::Itertools;
use oxrdfio::RdfParser;
use rdf_algebra_model::{
    subject_to_term, ActiveGraph, GraphName, NamedNode, Quad, Solutions, Term, Triple,
    TriplePattern,
};
use std::io::Read;

/// A minimal [Queryable] that scans a list of quads.
#[derive(Default)]
pub struct TestStore {
    quads: Vec<Quad>,
    mutable: bool,
}

impl TestStore {
    pub fn new(quads: impl IntoIterator<Item = Quad>) -> Self {
        Self {
            quads: quads.into_iter().collect(),
            mutable: true,
        }
    }

    pub fn read_only(mut self) -> Self {
        self.mutable = false;
        self
    }

    pub fn from_turtle(data: &str) -> Self {
        let mut store = Self::new([]);
        store
            .load_from_reader(
                &mut data.as_bytes(),
                &LoadOptions::default().with_format(oxrdfio::RdfFormat::Turtle),
            )
            .unwrap();
        store
    }

    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }

    fn in_graph<'a>(&'a self, graph: &'a ActiveGraph) -> impl Iterator<Item = &'a Quad> + 'a {
        self.quads.iter().filter(move |quad| match graph {
            ActiveGraph::DefaultGraph => quad.graph_name.is_default_graph(),
            ActiveGraph::AllGraphs => true,
            ActiveGraph::Union(graphs) => graphs.contains(&quad.graph_name),
            ActiveGraph::NamedGraph(name) => {
                quad.graph_name == GraphName::NamedNode(name.clone())
            }
        })
    }
}

impl Queryable for TestStore {
    fn query(
        &self,
        pattern: &TriplePattern,
        graph: &ActiveGraph,
    ) -> Result<Solutions, StorageError> {
        Ok(self
            .in_graph(graph)
            .map(|quad| Triple::from(quad.clone()))
            .unique()
            .filter_map(|triple| pattern.solution_for(&triple))
            .collect())
    }

    fn subjects_and_objects(&self, graph: &ActiveGraph) -> Result<Vec<Term>, StorageError> {
        Ok(self
            .in_graph(graph)
            .flat_map(|quad| [subject_to_term(&quad.subject), quad.object.clone()])
            .unique()
            .collect())
    }

    fn named_graphs(&self) -> Result<Vec<NamedNode>, StorageError> {
        Ok(self
            .quads
            .iter()
            .filter_map(|quad| match &quad.graph_name {
                GraphName::NamedNode(name) => Some(name.clone()),
                _ => None,
            })
            .unique()
            .collect())
    }

    fn contains_named_graph(&self, graph_name: &NamedNode) -> Result<bool, StorageError> {
        Ok(self.named_graphs()?.contains(graph_name))
    }

    fn insert(&mut self, quad: &Quad) -> Result<bool, StorageError> {
        if self.quads.contains(quad) {
            return Ok(false);
        }
        self.quads.push(quad.clone());
        Ok(true)
    }

    fn remove(&mut self, quad: &Quad) -> Result<bool, StorageError> {
        let len = self.quads.len();
        self.quads.retain(|q| q != quad);
        Ok(self.quads.len() != len)
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.quads.clear();
        Ok(())
    }

    fn load_from_reader(
        &mut self,
        reader: &mut dyn Read,
        options: &LoadOptions,
    ) -> Result<usize, StorageError> {
        let format = options
            .format
            .ok_or_else(|| StorageError::UnknownFormat("unspecified".to_owned()))?;
        let mut count = 0;
        for quad in RdfParser::from_format(format)
            .with_default_graph(options.graph.clone())
            .for_reader(reader)
        {
            if self.insert(&quad?)? {
                count += 1;
            }
        }
        Ok(count)
    }

    fn is_mutable(&self) -> bool {
        self.mutable
    }
}
