//! Accumulators for the aggregate functions.
//!
//! The evaluator creates one accumulator per group and aggregate, feeds it the values of the
//! aggregate operand for every solution of the group, and finally asks for the result. Operand
//! values that failed to evaluate are never passed to an accumulator.

mod avg;
mod count;
mod group_concat;
mod min_max;
mod sample;
mod sum;

pub use avg::AvgAccumulator;
pub use count::CountAccumulator;
pub use group_concat::GroupConcatAccumulator;
pub use min_max::{MaxAccumulator, MinAccumulator};
pub use sample::SampleAccumulator;
pub use sum::SumAccumulator;

use rdf_algebra_model::{EvalResult, Term};
use rustc_hash::FxHashSet;

/// The state of an aggregate function for a single group.
pub trait Accumulator {
    /// Adds a value of the group to the aggregate.
    fn add(&mut self, value: Term);

    /// Computes the result of the aggregate.
    fn finish(self: Box<Self>) -> EvalResult<Term>;
}

/// Wraps another accumulator and skips every value that was already added.
pub struct DistinctAccumulator {
    seen: FxHashSet<Term>,
    inner: Box<dyn Accumulator>,
}

impl DistinctAccumulator {
    pub fn new(inner: Box<dyn Accumulator>) -> Self {
        Self {
            seen: FxHashSet::default(),
            inner,
        }
    }
}

impl Accumulator for DistinctAccumulator {
    fn add(&mut self, value: Term) {
        if self.seen.insert(value.clone()) {
            self.inner.add(value)
        }
    }

    fn finish(self: Box<Self>) -> EvalResult<Term> {
        self.inner.finish()
    }
}

#[cfg(test)]
fn aggregate(mut accumulator: Box<dyn Accumulator>, values: Vec<Term>) -> EvalResult<Term> {
    for value in values {
        accumulator.add(value);
    }
    accumulator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdf_algebra_model::Literal;

    #[test]
    fn distinct_count() {
        let result = aggregate(
            Box::new(DistinctAccumulator::new(Box::new(CountAccumulator::new()))),
            vec![
                Literal::from(1).into(),
                Literal::from(1).into(),
                Literal::from(2).into(),
            ],
        );
        assert_eq!(result, Ok(Literal::from(2).into()));
    }

    #[test]
    fn distinct_sum() {
        let result = aggregate(
            Box::new(DistinctAccumulator::new(Box::new(SumAccumulator::new()))),
            vec![
                Literal::from(3).into(),
                Literal::from(3).into(),
                Literal::from(4).into(),
            ],
        );
        assert_eq!(result, Ok(Literal::from(7).into()));
    }
}
