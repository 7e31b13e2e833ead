use crate::vocab::xsd;
use crate::{Decimal, Double, Float, Integer, Literal, NamedNodeRef};
use std::cmp::Ordering;

/// A value of one of the numeric XSD types that take part in operator promotion.
///
/// Literals of the types derived from `xsd:integer` (e.g., `xsd:int`) are represented as
/// [Numeric::Integer].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Numeric {
    Integer(Integer),
    Decimal(Decimal),
    Float(Float),
    Double(Double),
}

impl Numeric {
    pub fn datatype(&self) -> NamedNodeRef<'static> {
        match self {
            Numeric::Integer(_) => xsd::INTEGER,
            Numeric::Decimal(_) => xsd::DECIMAL,
            Numeric::Float(_) => xsd::FLOAT,
            Numeric::Double(_) => xsd::DOUBLE,
        }
    }

    /// Returns true if the value is `0` or `NaN`.
    pub fn is_zero_or_nan(&self) -> bool {
        match self {
            Numeric::Integer(value) => *value == Integer::from(0),
            Numeric::Decimal(value) => *value == Decimal::from(0),
            Numeric::Float(value) => {
                let value = f32::from(*value);
                value == 0.0 || value.is_nan()
            }
            Numeric::Double(value) => {
                let value = f64::from(*value);
                value == 0.0 || value.is_nan()
            }
        }
    }

    pub fn into_literal(self) -> Literal {
        match self {
            Numeric::Integer(value) => Literal::new_typed_literal(value.to_string(), xsd::INTEGER),
            Numeric::Decimal(value) => Literal::new_typed_literal(value.to_string(), xsd::DECIMAL),
            Numeric::Float(value) => Literal::new_typed_literal(value.to_string(), xsd::FLOAT),
            Numeric::Double(value) => Literal::new_typed_literal(value.to_string(), xsd::DOUBLE),
        }
    }
}

impl From<Integer> for Numeric {
    fn from(value: Integer) -> Self {
        Numeric::Integer(value)
    }
}

impl From<Decimal> for Numeric {
    fn from(value: Decimal) -> Self {
        Numeric::Decimal(value)
    }
}

impl From<Float> for Numeric {
    fn from(value: Float) -> Self {
        Numeric::Float(value)
    }
}

impl From<Double> for Numeric {
    fn from(value: Double) -> Self {
        Numeric::Double(value)
    }
}

impl PartialOrd for Numeric {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match NumericPair::with_casts_from(*self, *other) {
            NumericPair::Integer(lhs, rhs) => lhs.partial_cmp(&rhs),
            NumericPair::Decimal(lhs, rhs) => lhs.partial_cmp(&rhs),
            NumericPair::Float(lhs, rhs) => lhs.partial_cmp(&rhs),
            NumericPair::Double(lhs, rhs) => lhs.partial_cmp(&rhs),
        }
    }
}

/// Two numeric operands promoted to their least common type.
///
/// The promotion order is `xsd:integer` < `xsd:decimal` < `xsd:float` < `xsd:double`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NumericPair {
    Integer(Integer, Integer),
    Decimal(Decimal, Decimal),
    Float(Float, Float),
    Double(Double, Double),
}

impl NumericPair {
    pub fn with_casts_from(lhs: Numeric, rhs: Numeric) -> NumericPair {
        match (lhs, rhs) {
            (Numeric::Integer(lhs), Numeric::Integer(rhs)) => NumericPair::Integer(lhs, rhs),
            (Numeric::Integer(lhs), Numeric::Decimal(rhs)) => {
                NumericPair::Decimal(Decimal::from(lhs), rhs)
            }
            (Numeric::Integer(lhs), Numeric::Float(rhs)) => NumericPair::Float(Float::from(lhs), rhs),
            (Numeric::Integer(lhs), Numeric::Double(rhs)) => {
                NumericPair::Double(Double::from(lhs), rhs)
            }
            (Numeric::Decimal(lhs), Numeric::Integer(rhs)) => {
                NumericPair::Decimal(lhs, Decimal::from(rhs))
            }
            (Numeric::Decimal(lhs), Numeric::Decimal(rhs)) => NumericPair::Decimal(lhs, rhs),
            (Numeric::Decimal(lhs), Numeric::Float(rhs)) => NumericPair::Float(Float::from(lhs), rhs),
            (Numeric::Decimal(lhs), Numeric::Double(rhs)) => {
                NumericPair::Double(Double::from(lhs), rhs)
            }
            (Numeric::Float(lhs), Numeric::Integer(rhs)) => NumericPair::Float(lhs, Float::from(rhs)),
            (Numeric::Float(lhs), Numeric::Decimal(rhs)) => NumericPair::Float(lhs, Float::from(rhs)),
            (Numeric::Float(lhs), Numeric::Float(rhs)) => NumericPair::Float(lhs, rhs),
            (Numeric::Float(lhs), Numeric::Double(rhs)) => NumericPair::Double(Double::from(lhs), rhs),
            (Numeric::Double(lhs), Numeric::Integer(rhs)) => {
                NumericPair::Double(lhs, Double::from(rhs))
            }
            (Numeric::Double(lhs), Numeric::Decimal(rhs)) => {
                NumericPair::Double(lhs, Double::from(rhs))
            }
            (Numeric::Double(lhs), Numeric::Float(rhs)) => NumericPair::Double(lhs, Double::from(rhs)),
            (Numeric::Double(lhs), Numeric::Double(rhs)) => NumericPair::Double(lhs, rhs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_and_decimal_promote_to_decimal() {
        let pair = NumericPair::with_casts_from(
            Numeric::Integer(Integer::from(1)),
            Numeric::Decimal(Decimal::from(2)),
        );
        assert_eq!(
            pair,
            NumericPair::Decimal(Decimal::from(1), Decimal::from(2))
        );
    }

    #[test]
    fn mixed_types_compare_by_value() {
        let one = Numeric::Integer(Integer::from(1));
        let one_and_a_half = Numeric::Double(Double::from(1.5));
        assert_eq!(one.partial_cmp(&one_and_a_half), Some(Ordering::Less));
    }

    #[test]
    fn nan_is_incomparable() {
        let nan = Numeric::Double(Double::from(f64::NAN));
        assert_eq!(nan.partial_cmp(&nan), None);
        assert!(nan.is_zero_or_nan());
    }
}
