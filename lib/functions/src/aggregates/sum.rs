use crate::aggregates::Accumulator;
use crate::{evaluate_binary, AddSparqlOp};
use rdf_algebra_model::{EvalResult, Literal, Term};

/// `SUM`. The sum of an empty group is `0`. Adding a non-numeric value makes the sum an error.
#[derive(Debug)]
pub struct SumAccumulator {
    sum: EvalResult<Term>,
}

impl Default for SumAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl SumAccumulator {
    pub fn new() -> Self {
        Self {
            sum: Ok(Literal::from(0).into()),
        }
    }
}

impl Accumulator for SumAccumulator {
    fn add(&mut self, value: Term) {
        if let Ok(sum) = &self.sum {
            self.sum = evaluate_binary(&AddSparqlOp::new(), sum, &value);
        }
    }

    fn finish(self: Box<Self>) -> EvalResult<Term> {
        self.sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregates::aggregate;
    use rdf_algebra_model::vocab::xsd;
    use rdf_algebra_model::EvalError;

    #[test]
    fn empty_sum_is_zero() {
        let result = aggregate(Box::new(SumAccumulator::new()), vec![]);
        assert_eq!(result, Ok(Literal::from(0).into()));
    }

    #[test]
    fn promotes_numeric_types() {
        let result = aggregate(
            Box::new(SumAccumulator::new()),
            vec![
                Literal::from(1).into(),
                Literal::new_typed_literal("1.5", xsd::DECIMAL).into(),
            ],
        );
        insta::assert_snapshot!(result.unwrap(), @r#""2.5"^^<http://www.w3.org/2001/XMLSchema#decimal>"#);
    }

    #[test]
    fn non_numeric_values_are_errors() {
        let result = aggregate(
            Box::new(SumAccumulator::new()),
            vec![Literal::from(1).into(), Literal::new_simple_literal("a").into()],
        );
        assert_eq!(result, Err(EvalError::TypeError));
    }
}
