use crate::{SparqlOp, UnarySparqlOp};
use rdf_algebra_model::{EvalError, EvalResult, SimpleLiteralRef, TermRef};

#[derive(Debug)]
pub struct StrSparqlOp;

impl Default for StrSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl StrSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for StrSparqlOp {
    fn name(&self) -> &str {
        "str"
    }
}

impl UnarySparqlOp for StrSparqlOp {
    type Arg<'data> = TermRef<'data>;
    type Result<'data> = SimpleLiteralRef<'data>;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        match value {
            TermRef::NamedNode(node) => Ok(SimpleLiteralRef(node.as_str())),
            TermRef::Literal(literal) => Ok(SimpleLiteralRef(literal.value())),
            TermRef::BlankNode(_) | TermRef::Triple(_) => EvalError::expected(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate_unary;
    use rdf_algebra_model::vocab::xsd;
    use rdf_algebra_model::{BlankNode, Literal, NamedNode};

    #[test]
    fn keeps_lexical_form() {
        let result = evaluate_unary(
            &StrSparqlOp::new(),
            &Literal::new_typed_literal("01", xsd::INTEGER).into(),
        );
        assert_eq!(result, Ok(Literal::new_simple_literal("01").into()));
    }

    #[test]
    fn iri_string() {
        let result = evaluate_unary(
            &StrSparqlOp::new(),
            &NamedNode::new_unchecked("http://example.com/a").into(),
        );
        insta::assert_snapshot!(result.unwrap(), @r#""http://example.com/a""#);
    }

    #[test]
    fn blank_nodes_are_errors() {
        let result = evaluate_unary(&StrSparqlOp::new(), &BlankNode::default().into());
        assert_eq!(result, Err(EvalError::TypeError));
    }
}
