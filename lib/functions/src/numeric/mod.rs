mod abs;
mod add;
mod ceil;
mod div;
mod floor;
mod mul;
mod rand;
mod round;
mod sub;
mod unary_minus;
mod unary_plus;

pub use abs::AbsSparqlOp;
pub use add::AddSparqlOp;
pub use ceil::CeilSparqlOp;
pub use div::DivSparqlOp;
pub use floor::FloorSparqlOp;
pub use mul::MulSparqlOp;
pub use self::rand::RandSparqlOp;
pub use round::RoundSparqlOp;
pub use sub::SubSparqlOp;
pub use unary_minus::UnaryMinusSparqlOp;
pub use unary_plus::UnaryPlusSparqlOp;
