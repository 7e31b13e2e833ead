//! An in-memory [RDF dataset](https://www.w3.org/TR/rdf11-concepts/#dfn-rdf-dataset) that
//! evaluates operator trees.
//!
//! The entry point of the module is the [`Store`] struct.

use oxrdfio::RdfFormat;
use rdf_algebra_engine::{
    execute, execute_query, execute_update, ExecutionOptions, LoadOptions, QueryEvaluationError,
    QueryResults, Queryable, StorageError, UpdateSummary,
};
use rdf_algebra_logical::{Operation, Query, Update};
use rdf_algebra_model::{NamedNode, Quad};
use rdf_algebra_storage::MemoryStore;
use std::io::Read;

/// An [RDF dataset](https://www.w3.org/TR/rdf11-concepts/#dfn-rdf-dataset) store.
///
/// The store is queried and updated with operator trees, given either as [Operation]s or in their
/// textual form.
///
/// Usage example:
/// ```
/// use rdf_algebra::store::Store;
///
/// let mut store = Store::new();
///
/// // update
/// let summary = store.update(
///     "(insertdata (triple <http://example.com/s> <http://example.com/p> <http://example.com/o>))",
/// )?;
/// assert_eq!(summary.inserted, 1);
///
/// // query
/// let results = store.query("(ask (bgp (triple ?s <http://example.com/p> ?o)))")?;
/// assert_eq!(results.as_boolean(), Some(true));
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Default)]
pub struct Store {
    storage: MemoryStore,
}

impl From<MemoryStore> for Store {
    fn from(storage: MemoryStore) -> Self {
        Self { storage }
    }
}

impl Store {
    /// Creates an empty [Store].
    pub fn new() -> Store {
        Self::default()
    }

    /// Returns a reference to the underlying [MemoryStore].
    pub fn storage(&self) -> &MemoryStore {
        &self.storage
    }

    /// Executes a query given in the textual form.
    pub fn query(&self, query: &str) -> Result<QueryResults, QueryEvaluationError> {
        self.query_opt(query, &ExecutionOptions::default())
    }

    /// Executes a query given in the textual form with some options.
    ///
    /// Usage example:
    /// ```
    /// use rdf_algebra::engine::ExecutionOptions;
    /// use rdf_algebra::store::Store;
    ///
    /// let store = Store::new();
    /// let options = ExecutionOptions::default().with_base_iri("http://example.com/")?;
    /// let results = store.query_opt("(extend ((?iri (iri \"a\"))) (bgp))", &options)?;
    /// assert_eq!(results.to_string().trim(), "{?iri -> <http://example.com/a>}");
    /// # Result::<_, Box<dyn std::error::Error>>::Ok(())
    /// ```
    pub fn query_opt(
        &self,
        query: &str,
        options: &ExecutionOptions,
    ) -> Result<QueryResults, QueryEvaluationError> {
        let query = query.parse::<Query>()?;
        execute_query(&query, &self.storage, options)
    }

    /// Executes an update given in the textual form.
    pub fn update(&mut self, update: &str) -> Result<UpdateSummary, QueryEvaluationError> {
        self.update_opt(update, &ExecutionOptions::default())
    }

    /// Executes an update given in the textual form with some options.
    pub fn update_opt(
        &mut self,
        update: &str,
        options: &ExecutionOptions,
    ) -> Result<UpdateSummary, QueryEvaluationError> {
        let update = update.parse::<Update>()?;
        execute_update(&update, &mut self.storage, options)
    }

    /// Executes a query or an update that has already been built.
    pub fn execute(
        &mut self,
        operation: &Operation,
        options: &ExecutionOptions,
    ) -> Result<QueryResults, QueryEvaluationError> {
        execute(operation, &mut self.storage, options)
    }

    /// Loads an RDF file into the store. Returns the number of inserted quads.
    ///
    /// Usage example:
    /// ```
    /// use rdf_algebra::io::RdfFormat;
    /// use rdf_algebra::store::Store;
    ///
    /// let mut store = Store::new();
    /// let file = b"<http://example.com> <http://example.com> <http://example.com> <http://example.com/g> .";
    /// assert_eq!(store.load_from_reader(RdfFormat::NQuads, file.as_ref())?, 1);
    /// assert_eq!(store.named_graphs()?.len(), 1);
    /// # Result::<_, Box<dyn std::error::Error>>::Ok(())
    /// ```
    pub fn load_from_reader(
        &mut self,
        format: RdfFormat,
        mut reader: impl Read,
    ) -> Result<usize, StorageError> {
        self.storage
            .load_from_reader(&mut reader, &LoadOptions::default().with_format(format))
    }

    /// Adds a quad to this store.
    ///
    /// Returns `true` if the quad was not already in the store.
    pub fn insert(&mut self, quad: &Quad) -> Result<bool, StorageError> {
        self.storage.insert(quad)
    }

    /// Removes a quad from this store.
    ///
    /// Returns `true` if the quad was in the store and has been removed.
    pub fn remove(&mut self, quad: &Quad) -> Result<bool, StorageError> {
        self.storage.remove(quad)
    }

    pub fn contains(&self, quad: &Quad) -> bool {
        self.storage.contains(quad)
    }

    /// Returns the number of quads in the store.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Returns the names of all named graphs.
    pub fn named_graphs(&self) -> Result<Vec<NamedNode>, StorageError> {
        self.storage.named_graphs()
    }

    /// Removes all quads and named graphs.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.storage.clear()
    }
}
