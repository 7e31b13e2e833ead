use oxrdfio::RdfFormat;
use rdf_algebra_model::{DateTime, GraphName, Iri, IriParseError};

/// What the default graph of a query is, if the query does not define its own data set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DefaultGraphMode {
    /// The default graph of the store.
    #[default]
    DefaultGraph,
    /// The merge of the default graph and all named graphs of the store.
    UnionOfAllGraphs,
}

/// Options for the execution of a query or an update.
#[derive(Clone, Debug)]
pub struct ExecutionOptions {
    /// The base IRI that `IRI()` resolves relative IRIs against. A `base` node in the operator
    /// tree overrides it.
    pub base_iri: Option<Iri<String>>,
    /// The maximum depth of nested operator evaluations.
    pub max_depth: usize,
    /// Whether the operator tree is simplified before it is executed.
    pub optimize: bool,
    pub default_graph: DefaultGraphMode,
    /// The value of `NOW()`. If it is not set, the current time is captured once per execution.
    pub now: Option<DateTime>,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            base_iri: None,
            max_depth: 1024,
            optimize: true,
            default_graph: DefaultGraphMode::default(),
            now: None,
        }
    }
}

impl ExecutionOptions {
    /// Sets the base IRI.
    pub fn with_base_iri(mut self, base_iri: impl Into<String>) -> Result<Self, IriParseError> {
        self.base_iri = Some(Iri::parse(base_iri.into())?);
        Ok(self)
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Executes the operator tree exactly as it is given.
    #[must_use]
    pub fn without_optimizations(mut self) -> Self {
        self.optimize = false;
        self
    }

    #[must_use]
    pub fn with_default_graph(mut self, default_graph: DefaultGraphMode) -> Self {
        self.default_graph = default_graph;
        self
    }

    /// Fixes the value of `NOW()`.
    #[must_use]
    pub fn with_now(mut self, now: DateTime) -> Self {
        self.now = Some(now);
        self
    }
}

/// Options for loading a file into a store.
#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    /// The format of the file. Loading a file by its path guesses the format from the extension
    /// if it is not given.
    pub format: Option<RdfFormat>,
    /// The base IRI for relative IRIs in the file.
    pub base_iri: Option<String>,
    /// The graph that receives the triples of the default graph of the file.
    pub graph: GraphName,
}

impl LoadOptions {
    #[must_use]
    pub fn with_format(mut self, format: RdfFormat) -> Self {
        self.format = Some(format);
        self
    }

    #[must_use]
    pub fn with_base_iri(mut self, base_iri: impl Into<String>) -> Self {
        self.base_iri = Some(base_iri.into());
        self
    }

    #[must_use]
    pub fn with_graph(mut self, graph: impl Into<GraphName>) -> Self {
        self.graph = graph.into();
        self
    }
}
