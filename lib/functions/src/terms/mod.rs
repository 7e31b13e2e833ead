mod bnode;
mod datatype;
mod iri;
mod is_blank;
mod is_iri;
mod is_literal;
mod is_numeric;
mod is_triple;
mod lang;
mod str;
mod strdt;
mod strlang;
mod struuid;
mod triple;
mod uuid;

pub use bnode::{BNodeCache, BNodeSparqlOp};
pub use datatype::DatatypeSparqlOp;
pub use iri::IriSparqlOp;
pub use is_blank::IsBlankSparqlOp;
pub use is_iri::IsIriSparqlOp;
pub use is_literal::IsLiteralSparqlOp;
pub use is_numeric::IsNumericSparqlOp;
pub use is_triple::IsTripleSparqlOp;
pub use lang::LangSparqlOp;
pub use self::str::StrSparqlOp;
pub use strdt::StrDtSparqlOp;
pub use strlang::StrLangSparqlOp;
pub use struuid::StrUuidSparqlOp;
pub use triple::{ObjectSparqlOp, PredicateSparqlOp, SubjectSparqlOp, TripleSparqlOp};
pub use self::uuid::UuidSparqlOp;
