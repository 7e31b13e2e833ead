mod active_graph;
mod error;
mod numeric;
mod order;
mod pattern;
mod solution;
mod solutions;
mod string_literal;
mod typed_value;
mod value_arg;
mod variable;
pub mod xsd;

pub use active_graph::*;
pub use error::*;
pub use numeric::*;
pub use order::*;
pub use pattern::*;
pub use solution::*;
pub use solutions::*;
pub use string_literal::*;
pub use typed_value::*;
pub use value_arg::*;
pub use variable::*;

// Re-export some oxrdf types.
pub use oxiri::{Iri, IriParseError};
pub use oxrdf::vocab;
pub use oxrdf::{
    BlankNode, BlankNodeIdParseError, BlankNodeRef, Dataset, Graph, GraphName, GraphNameRef,
    LanguageTagParseError, Literal, LiteralRef, NamedNode, NamedNodeRef, NamedOrBlankNode, Quad,
    QuadRef, Subject, SubjectRef, Term, TermRef, Triple, TripleRef,
};

// Re-export the XSD value spaces.
pub use oxsdatatypes::{
    Boolean, Date, DateTime, DateTimeOverflowError, DayTimeDuration, Decimal, Double, Duration,
    Float, Integer, OppositeSignInDurationComponentsError, ParseDateTimeError, ParseDecimalError,
    ParseDurationError, Time, TimezoneOffset, TooLargeForDecimalError, TooLargeForIntegerError,
    YearMonthDuration,
};
