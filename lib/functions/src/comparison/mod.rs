mod equal;
mod generic;
mod same_term;

pub(crate) use equal::sparql_equals;
pub use equal::{EqualSparqlOp, NotEqualSparqlOp};
pub use generic::{
    GreaterOrEqualSparqlOp, GreaterThanSparqlOp, LessOrEqualSparqlOp, LessThanSparqlOp,
};
pub use same_term::SameTermSparqlOp;
