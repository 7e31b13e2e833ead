use crate::aggregates::Accumulator;
use crate::{evaluate_binary, AddSparqlOp, DivSparqlOp};
use rdf_algebra_model::{EvalResult, Literal, Term};

/// `AVG`, computed as the sum divided by the count. The average of an empty group is `0`.
#[derive(Debug)]
pub struct AvgAccumulator {
    sum: EvalResult<Term>,
    count: i64,
}

impl Default for AvgAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl AvgAccumulator {
    pub fn new() -> Self {
        Self {
            sum: Ok(Literal::from(0).into()),
            count: 0,
        }
    }
}

impl Accumulator for AvgAccumulator {
    fn add(&mut self, value: Term) {
        if let Ok(sum) = &self.sum {
            self.sum = evaluate_binary(&AddSparqlOp::new(), sum, &value);
        }
        self.count += 1;
    }

    fn finish(self: Box<Self>) -> EvalResult<Term> {
        let sum = self.sum?;
        if self.count == 0 {
            return Ok(sum);
        }
        evaluate_binary(&DivSparqlOp::new(), &sum, &Literal::from(self.count).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregates::aggregate;

    #[test]
    fn empty_average_is_zero() {
        let result = aggregate(Box::new(AvgAccumulator::new()), vec![]);
        assert_eq!(result, Ok(Literal::from(0).into()));
    }

    #[test]
    fn integer_average_is_decimal() {
        let result = aggregate(
            Box::new(AvgAccumulator::new()),
            vec![Literal::from(1).into(), Literal::from(2).into()],
        );
        insta::assert_snapshot!(result.unwrap(), @r#""1.5"^^<http://www.w3.org/2001/XMLSchema#decimal>"#);
    }
}
