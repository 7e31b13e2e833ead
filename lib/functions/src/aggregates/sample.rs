use crate::aggregates::Accumulator;
use rdf_algebra_model::{EvalError, EvalResult, Term};

/// `SAMPLE` returns the first value of the group.
#[derive(Debug, Default)]
pub struct SampleAccumulator {
    value: Option<Term>,
}

impl SampleAccumulator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accumulator for SampleAccumulator {
    fn add(&mut self, value: Term) {
        if self.value.is_none() {
            self.value = Some(value);
        }
    }

    fn finish(self: Box<Self>) -> EvalResult<Term> {
        self.value.ok_or(EvalError::EmptyAggregate("SAMPLE"))
    }
}
