mod concat;
mod contains;
mod encode_for_uri;
mod lang_matches;
mod lcase;
mod regex;
mod replace;
mod strafter;
mod strbefore;
mod strends;
mod strlen;
mod strstarts;
mod substr;
mod ucase;

pub use concat::ConcatSparqlOp;
pub use contains::ContainsSparqlOp;
pub use encode_for_uri::EncodeForUriSparqlOp;
pub use lang_matches::LangMatchesSparqlOp;
pub use lcase::LCaseSparqlOp;
pub use self::regex::RegexSparqlOp;
pub use replace::ReplaceSparqlOp;
pub use strafter::StrAfterSparqlOp;
pub use strbefore::StrBeforeSparqlOp;
pub use strends::StrEndsSparqlOp;
pub use strlen::StrLenSparqlOp;
pub use strstarts::StrStartsSparqlOp;
pub use substr::SubStrSparqlOp;
pub use ucase::UCaseSparqlOp;
