//! The in-memory store.
//!
//! Terms are interned into [ObjectId]s by an object id mapping. The encoded quads are kept in
//! multiple sorted permutations so that every triple pattern can be answered with a range scan.

mod object_id;
mod object_id_mapping;
mod store;

pub(crate) use object_id::DEFAULT_GRAPH_ID;
pub use object_id::ObjectId;
pub(crate) use object_id_mapping::ObjectIdMapping;
pub use object_id_mapping::ObjectIdMappingError;
pub use store::MemoryStore;
