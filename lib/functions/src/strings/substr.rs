use crate::{BinarySparqlOp, SparqlOp, TernarySparqlOp};
use rdf_algebra_model::{Double, EvalError, EvalResult, Numeric, StringLiteralRef};

#[derive(Debug)]
pub struct SubStrSparqlOp;

impl Default for SubStrSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl SubStrSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for SubStrSparqlOp {
    fn name(&self) -> &str {
        "substr"
    }
}

impl BinarySparqlOp for SubStrSparqlOp {
    type ArgLhs<'data> = StringLiteralRef<'data>;
    type ArgRhs<'data> = Numeric;
    type Result<'data> = StringLiteralRef<'data>;

    fn evaluate<'data>(
        &self,
        lhs: Self::ArgLhs<'data>,
        rhs: Self::ArgRhs<'data>,
    ) -> EvalResult<Self::Result<'data>> {
        evaluate_substr(lhs, rhs, None)
    }
}

impl TernarySparqlOp for SubStrSparqlOp {
    type Arg0<'data> = StringLiteralRef<'data>;
    type Arg1<'data> = Numeric;
    type Arg2<'data> = Numeric;
    type Result<'data> = StringLiteralRef<'data>;

    fn evaluate<'data>(
        &self,
        arg0: Self::Arg0<'data>,
        arg1: Self::Arg1<'data>,
        arg2: Self::Arg2<'data>,
    ) -> EvalResult<Self::Result<'data>> {
        evaluate_substr(arg0, arg1, Some(arg2))
    }
}

/// Positions are 1-based and count characters. Numeric positions are rounded like `fn:substring`.
fn evaluate_substr(
    source: StringLiteralRef<'_>,
    starting_loc: Numeric,
    length: Option<Numeric>,
) -> EvalResult<StringLiteralRef<'_>> {
    let start = round_position(starting_loc)?;
    let end = match length {
        Some(length) => Some(start + round_position(length)?),
        None => None,
    };

    let mut start_byte = None;
    let mut end_byte = None;
    for (position, (byte_index, _)) in (1_i64..).zip(source.0.char_indices()) {
        let after_start = position >= start;
        let before_end = end.map_or(true, |end| position < end);
        if start_byte.is_none() && after_start && before_end {
            start_byte = Some(byte_index);
        }
        if start_byte.is_some() && !before_end {
            end_byte = Some(byte_index);
            break;
        }
    }

    let result = match start_byte {
        Some(start_byte) => &source.0[start_byte..end_byte.unwrap_or(source.0.len())],
        None => "",
    };
    Ok(StringLiteralRef(result, source.1))
}

fn round_position(value: Numeric) -> EvalResult<i64> {
    let value = match value {
        Numeric::Integer(value) => return Ok(i64::from(value)),
        Numeric::Decimal(value) => {
            f64::from(Double::from(value.checked_round().ok_or(EvalError::Overflow)?))
        }
        Numeric::Float(value) => f64::from(f32::from(value.round())),
        Numeric::Double(value) => f64::from(value.round()),
    };
    if value.is_nan() {
        return EvalError::expected();
    }
    Ok(value as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{evaluate_binary, evaluate_ternary};
    use rdf_algebra_model::{Literal, Term};

    fn string(value: &str) -> Term {
        Literal::new_simple_literal(value).into()
    }

    #[test]
    fn substring_with_length() {
        let result = evaluate_ternary(
            &SubStrSparqlOp::new(),
            &string("motor car"),
            &Literal::from(3).into(),
            &Literal::from(3).into(),
        );
        assert_eq!(result, Ok(string("tor")));
    }

    #[test]
    fn substring_to_end() {
        let result = evaluate_binary(&SubStrSparqlOp::new(), &string("metadata"), &Literal::from(4).into());
        assert_eq!(result, Ok(string("adata")));
    }

    #[test]
    fn start_before_first_character() {
        let result = evaluate_ternary(
            &SubStrSparqlOp::new(),
            &string("12345"),
            &Literal::from(0).into(),
            &Literal::from(3).into(),
        );
        assert_eq!(result, Ok(string("12")));
    }

    #[test]
    fn works_on_characters() {
        let result = evaluate_ternary(
            &SubStrSparqlOp::new(),
            &string("\u{e9}t\u{e9}"),
            &Literal::from(2).into(),
            &Literal::from(2).into(),
        );
        assert_eq!(result, Ok(string("t\u{e9}")));
    }
}
