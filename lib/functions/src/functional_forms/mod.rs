//! Functional forms do not evaluate all of their operands eagerly. The evaluator passes the
//! results of the operands it evaluated (or closures that evaluate them) to these functions.

mod coalesce;
mod in_list;
mod logical;
mod sparql_if;

pub use coalesce::coalesce;
pub use in_list::in_list;
pub use logical::{logical_and, logical_not, logical_or};
pub use sparql_if::sparql_if;
