mod day;
mod hours;
mod minutes;
mod month;
mod now;
mod seconds;
mod timezone;
mod tz;
mod year;

pub use day::DaySparqlOp;
pub use hours::HoursSparqlOp;
pub use minutes::MinutesSparqlOp;
pub use month::MonthSparqlOp;
pub use now::NowSparqlOp;
pub use seconds::SecondsSparqlOp;
pub use timezone::TimezoneSparqlOp;
pub use tz::TzSparqlOp;
pub use year::YearSparqlOp;
