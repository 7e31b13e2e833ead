//! Contains the quad indexes of the in-memory store.
//!
//! A quad index represents a particular sorting of the quad components graph name, subject,
//! predicate, and object. For example, the [IndexComponents::GSPO] index represents that exact
//! ordering while the [IndexComponents::GPOS] has the predicate as the second component. Different
//! triple patterns are better suited for different indexes.
//!
//! [IndexPermutations] provides access to multiple indexes while implementing the reordering
//! logic.

mod components;
mod permutations;
mod quad_index;

pub use components::*;
pub use permutations::*;
pub use quad_index::*;
