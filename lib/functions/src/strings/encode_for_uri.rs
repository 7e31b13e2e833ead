use crate::{SparqlOp, UnarySparqlOp};
use rdf_algebra_model::{EvalResult, OwnedStringLiteral, StringLiteralRef};

#[derive(Debug)]
pub struct EncodeForUriSparqlOp;

impl Default for EncodeForUriSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl EncodeForUriSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for EncodeForUriSparqlOp {
    fn name(&self) -> &str {
        "encode_for_uri"
    }
}

impl UnarySparqlOp for EncodeForUriSparqlOp {
    type Arg<'data> = StringLiteralRef<'data>;
    type Result<'data> = OwnedStringLiteral;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        let mut result = String::with_capacity(value.0.len());
        for c in value.0.bytes() {
            match c {
                b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                    result.push(char::from(c))
                }
                _ => {
                    result.push('%');
                    result.push(hex_digit(c / 16));
                    result.push(hex_digit(c % 16));
                }
            }
        }
        Ok(OwnedStringLiteral::new(result, None))
    }
}

fn hex_digit(value: u8) -> char {
    char::from(if value < 10 {
        b'0' + value
    } else {
        b'A' + (value - 10)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate_unary;
    use rdf_algebra_model::Literal;

    #[test]
    fn percent_encodes_reserved_characters() {
        let result = evaluate_unary(
            &EncodeForUriSparqlOp::new(),
            &Literal::new_language_tagged_literal_unchecked("Los Angeles/\u{e9}", "en").into(),
        );
        insta::assert_snapshot!(result.unwrap(), @r#""Los%20Angeles%2F%C3%A9""#);
    }
}
