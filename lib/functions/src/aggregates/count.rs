use crate::aggregates::Accumulator;
use rdf_algebra_model::{EvalResult, Literal, Term};

/// `COUNT`. For `COUNT(*)`, the evaluator adds one value per solution.
#[derive(Debug, Default)]
pub struct CountAccumulator {
    count: i64,
}

impl CountAccumulator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accumulator for CountAccumulator {
    fn add(&mut self, _value: Term) {
        self.count += 1;
    }

    fn finish(self: Box<Self>) -> EvalResult<Term> {
        Ok(Literal::from(self.count).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregates::aggregate;

    #[test]
    fn empty_group() {
        let result = aggregate(Box::new(CountAccumulator::new()), vec![]);
        assert_eq!(result, Ok(Literal::from(0).into()));
    }
}
