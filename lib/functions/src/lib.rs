//! The builtin functions and aggregates of the expression evaluator.
//!
//! Every function is a small struct implementing one (or more) of the `*SparqlOp` traits. The
//! traits declare the argument types of a function, and the generic `evaluate_*` helpers take care
//! of converting the operand terms into these types. A failed conversion is a type error.

pub mod aggregates;
mod comparison;
mod conversion;
mod dates_and_times;
mod ebv;
mod functional_forms;
mod hash;
mod into_term;
mod numeric;
mod strings;
mod terms;

pub use comparison::*;
pub use conversion::*;
pub use dates_and_times::*;
pub use ebv::*;
pub use functional_forms::*;
pub use hash::*;
pub use into_term::IntoTerm;
pub use numeric::*;
pub use strings::*;
pub use terms::*;

use rdf_algebra_model::{EvalError, EvalResult, RdfValueArg, Term};

/// A builtin function.
pub trait SparqlOp {
    /// The name of the function, as used in the textual algebra.
    fn name(&self) -> &str;
}

pub trait NullarySparqlOp: SparqlOp {
    type Result: IntoTerm;

    fn evaluate(&self) -> EvalResult<Self::Result>;
}

pub trait UnarySparqlOp: SparqlOp {
    type Arg<'data>: RdfValueArg<'data>;
    type Result<'data>: IntoTerm;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>>;
}

pub trait BinarySparqlOp: SparqlOp {
    type ArgLhs<'data>: RdfValueArg<'data>;
    type ArgRhs<'data>: RdfValueArg<'data>;
    type Result<'data>: IntoTerm;

    fn evaluate<'data>(
        &self,
        lhs: Self::ArgLhs<'data>,
        rhs: Self::ArgRhs<'data>,
    ) -> EvalResult<Self::Result<'data>>;
}

pub trait TernarySparqlOp: SparqlOp {
    type Arg0<'data>: RdfValueArg<'data>;
    type Arg1<'data>: RdfValueArg<'data>;
    type Arg2<'data>: RdfValueArg<'data>;
    type Result<'data>: IntoTerm;

    fn evaluate<'data>(
        &self,
        arg0: Self::Arg0<'data>,
        arg1: Self::Arg1<'data>,
        arg2: Self::Arg2<'data>,
    ) -> EvalResult<Self::Result<'data>>;
}

pub trait QuaternarySparqlOp: SparqlOp {
    type Arg0<'data>: RdfValueArg<'data>;
    type Arg1<'data>: RdfValueArg<'data>;
    type Arg2<'data>: RdfValueArg<'data>;
    type Arg3<'data>: RdfValueArg<'data>;
    type Result<'data>: IntoTerm;

    fn evaluate<'data>(
        &self,
        arg0: Self::Arg0<'data>,
        arg1: Self::Arg1<'data>,
        arg2: Self::Arg2<'data>,
        arg3: Self::Arg3<'data>,
    ) -> EvalResult<Self::Result<'data>>;
}

pub trait NArySparqlOp: SparqlOp {
    type Args<'data>: RdfValueArg<'data>;
    type Result<'data>: IntoTerm;

    fn evaluate<'data>(&self, args: &[Self::Args<'data>]) -> EvalResult<Self::Result<'data>>;
}

fn arg<'data, T: RdfValueArg<'data>>(term: &'data Term) -> EvalResult<T> {
    T::try_from_term(term)
}

pub fn evaluate_nullary<Op: NullarySparqlOp>(op: &Op) -> EvalResult<Term> {
    op.evaluate().map(IntoTerm::into_term)
}

pub fn evaluate_unary<Op: UnarySparqlOp>(op: &Op, value: &Term) -> EvalResult<Term> {
    op.evaluate(arg(value)?).map(IntoTerm::into_term)
}

pub fn evaluate_binary<Op: BinarySparqlOp>(op: &Op, lhs: &Term, rhs: &Term) -> EvalResult<Term> {
    op.evaluate(arg(lhs)?, arg(rhs)?).map(IntoTerm::into_term)
}

pub fn evaluate_ternary<Op: TernarySparqlOp>(
    op: &Op,
    arg0: &Term,
    arg1: &Term,
    arg2: &Term,
) -> EvalResult<Term> {
    op.evaluate(arg(arg0)?, arg(arg1)?, arg(arg2)?)
        .map(IntoTerm::into_term)
}

pub fn evaluate_quaternary<Op: QuaternarySparqlOp>(
    op: &Op,
    arg0: &Term,
    arg1: &Term,
    arg2: &Term,
    arg3: &Term,
) -> EvalResult<Term> {
    op.evaluate(arg(arg0)?, arg(arg1)?, arg(arg2)?, arg(arg3)?)
        .map(IntoTerm::into_term)
}

pub fn evaluate_n_ary<Op: NArySparqlOp>(op: &Op, args: &[Term]) -> EvalResult<Term> {
    let args = args.iter().map(arg).collect::<EvalResult<Vec<_>>>()?;
    op.evaluate(&args).map(IntoTerm::into_term)
}

/// Dispatches a function that accepts an optional trailing argument (e.g., `SUBSTR`, `REGEX`).
pub fn evaluate_binary_or_ternary<Op: BinarySparqlOp + TernarySparqlOp>(
    op: &Op,
    args: &[Term],
) -> EvalResult<Term> {
    match args {
        [lhs, rhs] => evaluate_binary(op, lhs, rhs),
        [arg0, arg1, arg2] => evaluate_ternary(op, arg0, arg1, arg2),
        _ => EvalError::expected(),
    }
}

/// Dispatches a function that accepts an optional trailing argument (e.g., `REPLACE`).
pub fn evaluate_ternary_or_quaternary<Op: TernarySparqlOp + QuaternarySparqlOp>(
    op: &Op,
    args: &[Term],
) -> EvalResult<Term> {
    match args {
        [arg0, arg1, arg2] => evaluate_ternary(op, arg0, arg1, arg2),
        [arg0, arg1, arg2, arg3] => evaluate_quaternary(op, arg0, arg1, arg2, arg3),
        _ => EvalError::expected(),
    }
}
