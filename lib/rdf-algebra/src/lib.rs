#![doc(test(attr(deny(warnings))))]

//! Evaluates SPARQL algebra trees against RDF stores.
//!
//! Operator trees are built with the types of [logical], either programmatically or by parsing
//! their parenthesized textual form. The [engine] executes them against any store that
//! implements [Queryable](engine::Queryable). [Store](store::Store) bundles the engine with the
//! in-memory store of [storage].
//!
//! Usage example:
//! ```
//! use rdf_algebra::model::*;
//! use rdf_algebra::store::Store;
//!
//! let mut store = Store::new();
//! let ex = NamedNode::new("http://example.com")?;
//! store.insert(&Quad::new(ex.clone(), ex.clone(), ex.clone(), GraphName::DefaultGraph))?;
//!
//! let solutions = store
//!     .query("(bgp (triple ?s ?p ?o))")?
//!     .into_solutions()
//!     .unwrap_or_default();
//! assert_eq!(solutions.len(), 1);
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! ```

pub mod store;

pub mod io {
    pub use oxrdfio::{RdfFormat, RdfParser};
}

pub mod model {
    pub use rdf_algebra_model::*;
}

pub mod functions {
    pub use rdf_algebra_functions::*;
}

pub mod logical {
    pub use rdf_algebra_logical::*;
}

pub mod engine {
    pub use rdf_algebra_engine::*;
}

pub mod storage {
    pub use rdf_algebra_storage::*;
}
