use oxrdfio::RdfParseError;
use rdf_algebra_model::{IriParseError, NamedNode};
use std::error::Error;
use std::io;

/// An error related to storage operations (reads, writes, loading...).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StorageError {
    /// Error from the OS I/O layer.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// Error while parsing a file that is loaded into the store.
    #[error(transparent)]
    Parse(#[from] RdfParseError),
    /// The base IRI of a load operation is invalid.
    #[error(transparent)]
    InvalidBaseIri(#[from] IriParseError),
    /// The format of a file could not be derived from its name.
    #[error("The RDF format of {0} is unknown")]
    UnknownFormat(String),
    /// The store does not accept modifications.
    #[error("The store is read-only")]
    Immutable,
    /// A graph that an operation refers to does not exist.
    #[error("The graph {0} does not exist")]
    GraphDoesNotExist(NamedNode),
    #[error("{0}")]
    Other(#[source] Box<dyn Error + Send + Sync + 'static>),
}

impl From<StorageError> for io::Error {
    #[inline]
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::Io(error) => error,
            error => Self::other(error),
        }
    }
}
