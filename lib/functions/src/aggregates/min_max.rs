use crate::aggregates::Accumulator;
use rdf_algebra_model::{cmp_terms_total, EvalError, EvalResult, Term};
use std::cmp::Ordering;

/// `MIN` with the total order that is also used by `ORDER BY`.
#[derive(Debug, Default)]
pub struct MinAccumulator {
    min: Option<Term>,
}

impl MinAccumulator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accumulator for MinAccumulator {
    fn add(&mut self, value: Term) {
        match &self.min {
            Some(min) if cmp_terms_total(&value, min) != Ordering::Less => {}
            _ => self.min = Some(value),
        }
    }

    fn finish(self: Box<Self>) -> EvalResult<Term> {
        self.min.ok_or(EvalError::EmptyAggregate("MIN"))
    }
}

/// `MAX` with the total order that is also used by `ORDER BY`.
#[derive(Debug, Default)]
pub struct MaxAccumulator {
    max: Option<Term>,
}

impl MaxAccumulator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accumulator for MaxAccumulator {
    fn add(&mut self, value: Term) {
        match &self.max {
            Some(max) if cmp_terms_total(&value, max) != Ordering::Greater => {}
            _ => self.max = Some(value),
        }
    }

    fn finish(self: Box<Self>) -> EvalResult<Term> {
        self.max.ok_or(EvalError::EmptyAggregate("MAX"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregates::aggregate;
    use rdf_algebra_model::vocab::xsd;
    use rdf_algebra_model::{Literal, NamedNode};

    fn mixed() -> Vec<Term> {
        vec![
            Literal::new_simple_literal("b").into(),
            Literal::from(3).into(),
            NamedNode::new_unchecked("http://example.com/").into(),
            Literal::new_typed_literal("2.5", xsd::DECIMAL).into(),
        ]
    }

    #[test]
    fn min_of_mixed_values() {
        let result = aggregate(Box::new(MinAccumulator::new()), mixed());
        insta::assert_snapshot!(result.unwrap(), @"<http://example.com/>");
    }

    #[test]
    fn max_of_mixed_values() {
        let result = aggregate(Box::new(MaxAccumulator::new()), mixed());
        insta::assert_snapshot!(result.unwrap(), @r#""b""#);
    }

    #[test]
    fn empty_group_is_error() {
        let result = aggregate(Box::new(MaxAccumulator::new()), vec![]);
        assert_eq!(result, Err(EvalError::EmptyAggregate("MAX")));
    }
}
