use crate::{SparqlOp, UnarySparqlOp};
use rdf_algebra_model::{DateTime, EvalResult, Integer};

#[derive(Debug)]
pub struct HoursSparqlOp;

impl Default for HoursSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl HoursSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for HoursSparqlOp {
    fn name(&self) -> &str {
        "hours"
    }
}

impl UnarySparqlOp for HoursSparqlOp {
    type Arg<'data> = DateTime;
    type Result<'data> = Integer;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        Ok(Integer::from(i64::from(value.hour())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{evaluate_unary, SecondsSparqlOp, TimezoneSparqlOp, TzSparqlOp};
    use rdf_algebra_model::vocab::xsd;
    use rdf_algebra_model::{Literal, Term};

    fn date_time(value: &str) -> Term {
        Literal::new_typed_literal(value, xsd::DATE_TIME).into()
    }

    #[test]
    fn extracts_components() {
        let value = date_time("2011-01-10T14:45:13.815-05:00");
        assert_eq!(evaluate_unary(&HoursSparqlOp::new(), &value), Ok(Literal::from(14).into()));
        insta::assert_snapshot!(evaluate_unary(&SecondsSparqlOp::new(), &value).unwrap(), @r#""13.815"^^<http://www.w3.org/2001/XMLSchema#decimal>"#);
        insta::assert_snapshot!(evaluate_unary(&TimezoneSparqlOp::new(), &value).unwrap(), @r#""-PT5H"^^<http://www.w3.org/2001/XMLSchema#dayTimeDuration>"#);
        insta::assert_snapshot!(evaluate_unary(&TzSparqlOp::new(), &value).unwrap(), @r#""-05:00""#);
    }

    #[test]
    fn missing_timezone() {
        let value = date_time("2011-01-10T14:45:13");
        assert_eq!(
            evaluate_unary(&TimezoneSparqlOp::new(), &value),
            Err(rdf_algebra_model::EvalError::TypeError)
        );
        insta::assert_snapshot!(evaluate_unary(&TzSparqlOp::new(), &value).unwrap(), @r#""""#);
    }
}
