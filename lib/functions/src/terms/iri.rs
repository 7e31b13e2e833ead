use crate::{SparqlOp, UnarySparqlOp};
use rdf_algebra_model::{EvalError, EvalResult, Iri, NamedNode, TypedValueRef};

/// Converts a string into an IRI. Relative IRIs are resolved against the base IRI, if there is
/// one.
#[derive(Debug)]
pub struct IriSparqlOp {
    base_iri: Option<Iri<String>>,
}

impl IriSparqlOp {
    pub fn new(base_iri: Option<Iri<String>>) -> Self {
        Self { base_iri }
    }
}

impl SparqlOp for IriSparqlOp {
    fn name(&self) -> &str {
        "iri"
    }
}

impl UnarySparqlOp for IriSparqlOp {
    type Arg<'data> = TypedValueRef<'data>;
    type Result<'data> = NamedNode;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        match value {
            TypedValueRef::NamedNode(named_node) => Ok(named_node.into_owned()),
            TypedValueRef::SimpleLiteral(value) => {
                let resolving_result = if let Some(base_iri) = &self.base_iri {
                    base_iri.resolve(value)?
                } else {
                    Iri::parse(value.to_owned())?
                };
                Ok(NamedNode::from(resolving_result))
            }
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
    fn resolves_against_base() {
        let op = IriSparqlOp::new(Some(Iri::parse("http://example.com/dir/".to_owned()).unwrap()));
        let result = evaluate_unary(&op, &Literal::new_simple_literal("a").into());
        insta::assert_snapshot!(result.unwrap(), @"<http://example.com/dir/a>");
    }

    #[test]
    fn relative_without_base_is_error() {
        let result = evaluate_unary(&IriSparqlOp::new(None), &Literal::new_simple_literal("a").into());
        assert_eq!(result, Err(EvalError::TypeError));
    }
}
