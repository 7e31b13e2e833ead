use crate::{SparqlOp, UnarySparqlOp};
use rdf_algebra_model::{EvalError, EvalResult, NamedNode, TermRef};

#[derive(Debug)]
pub struct DatatypeSparqlOp;

impl Default for DatatypeSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl DatatypeSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for DatatypeSparqlOp {
    fn name(&self) -> &str {
        "datatype"
    }
}

impl UnarySparqlOp for DatatypeSparqlOp {
    type Arg<'data> = TermRef<'data>;
    type Result<'data> = NamedNode;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        match value {
            TermRef::Literal(literal) => Ok(literal.datatype().into_owned()),
            _ => EvalError::expected(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate_unary;
    use rdf_algebra_model::Literal;

    #[test]
    fn language_strings() {
        let result = evaluate_unary(
            &DatatypeSparqlOp::new(),
            &Literal::new_language_tagged_literal_unchecked("a", "en").into(),
        );
        insta::assert_snapshot!(result.unwrap(), @"<http://www.w3.org/1999/02/22-rdf-syntax-ns#langString>");
    }

    #[test]
    fn ill_typed_literals_keep_their_datatype() {
        let result = evaluate_unary(
            &DatatypeSparqlOp::new(),
            &Literal::new_typed_literal("abc", rdf_algebra_model::vocab::xsd::INTEGER).into(),
        );
        insta::assert_snapshot!(result.unwrap(), @"<http://www.w3.org/2001/XMLSchema#integer>");
    }
}
