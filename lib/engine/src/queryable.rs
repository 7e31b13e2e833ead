use crate::error::StorageError;
use crate::options::LoadOptions;
use oxrdfio::RdfFormat;
use rdf_algebra_model::{ActiveGraph, NamedNode, Quad, Solutions, Term, TriplePattern};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// The contract between the engine and the store that holds the data.
///
/// The engine reads through [Queryable::query] and the graph enumeration methods while it executes
/// a query. Updates use the mutating methods and are rejected by stores that are not
/// [mutable](Queryable::is_mutable).
///
/// # Consistency
///
/// The engine does not lock the store. While a query is executed the store is only borrowed
/// immutably, so all triple patterns of the query see the same data.
pub trait Queryable {
    /// Returns one solution for every triple of `graph` that matches `pattern`. The solutions bind
    /// exactly the variables of `pattern`.
    ///
    /// If `graph` is the merge of multiple graphs, a triple that is contained in more than one of
    /// them is only matched once.
    fn query(&self, pattern: &TriplePattern, graph: &ActiveGraph)
        -> Result<Solutions, StorageError>;

    /// Returns every term that is the subject or the object of a triple in `graph`, without
    /// duplicates.
    fn subjects_and_objects(&self, graph: &ActiveGraph) -> Result<Vec<Term>, StorageError>;

    /// Returns the names of all named graphs.
    fn named_graphs(&self) -> Result<Vec<NamedNode>, StorageError>;

    /// Returns whether `graph_name` is a named graph of the store.
    fn contains_named_graph(&self, graph_name: &NamedNode) -> Result<bool, StorageError>;

    /// Inserts a quad. Returns `true` if the quad was not already contained in the store.
    fn insert(&mut self, quad: &Quad) -> Result<bool, StorageError>;

    /// Removes a quad. Returns `true` if the quad was contained in the store.
    fn remove(&mut self, quad: &Quad) -> Result<bool, StorageError>;

    /// Removes all quads and named graphs.
    fn clear(&mut self) -> Result<(), StorageError>;

    /// Loads the quads that `reader` provides. Returns the number of inserted quads.
    ///
    /// The format must be given in `options`.
    fn load_from_reader(
        &mut self,
        reader: &mut dyn Read,
        options: &LoadOptions,
    ) -> Result<usize, StorageError>;

    /// Returns whether the store accepts modifications.
    fn is_mutable(&self) -> bool;

    /// Loads the file at `path`. If `options` has no format, it is guessed from the extension of
    /// the file.
    fn load(&mut self, path: &Path, options: &LoadOptions) -> Result<usize, StorageError> {
        let format = match options.format {
            Some(format) => format,
            None => path
                .extension()
                .and_then(|extension| extension.to_str())
                .and_then(RdfFormat::from_extension)
                .ok_or_else(|| StorageError::UnknownFormat(path.display().to_string()))?,
        };
        let mut reader = BufReader::new(File::open(path)?);
        self.load_from_reader(&mut reader, &options.clone().with_format(format))
    }
}
