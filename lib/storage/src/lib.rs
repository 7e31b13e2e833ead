//! Contains the in-memory store of [RDF Algebra](https://docs.rs/rdf-algebra/).
//!
//! The [MemoryStore] implements [Queryable](rdf_algebra_engine::Queryable) and can therefore be
//! used for executing queries and updates.

pub(crate) mod index;
pub mod memory;

pub use memory::MemoryStore;
