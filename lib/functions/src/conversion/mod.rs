//! Casts to XSD data types, called like functions named by the data type IRI.

mod as_boolean;
mod as_datetime;
mod as_decimal;
mod as_double;
mod as_float;
mod as_integer;
mod as_string;

pub use as_boolean::AsBooleanSparqlOp;
pub use as_datetime::AsDateTimeSparqlOp;
pub use as_decimal::AsDecimalSparqlOp;
pub use as_double::AsDoubleSparqlOp;
pub use as_float::AsFloatSparqlOp;
pub use as_integer::AsIntegerSparqlOp;
pub use as_string::AsStringSparqlOp;
