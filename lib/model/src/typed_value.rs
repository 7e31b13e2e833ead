use crate::vocab::{rdf, xsd};
use crate::xsd::is_integer_datatype;
use crate::{
    BlankNodeRef, Boolean, Date, DateTime, DayTimeDuration, Decimal, Double, Duration, Float,
    Integer, Literal, LiteralRef, NamedNodeRef, Numeric, StringLiteralRef, Term, Time, Triple,
    YearMonthDuration,
};
use std::cmp::Ordering;
use std::str::FromStr;

/// A borrowed view of a [Term] that exposes the value space of well-known literal data types.
///
/// Literals with an invalid lexical form for their data type (e.g., `"abc"^^xsd:integer`) are
/// kept as [TypedValueRef::OtherLiteral].
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum TypedValueRef<'value> {
    NamedNode(NamedNodeRef<'value>),
    BlankNode(BlankNodeRef<'value>),
    Triple(&'value Triple),
    BooleanLiteral(Boolean),
    NumericLiteral(Numeric),
    SimpleLiteral(&'value str),
    LanguageStringLiteral {
        value: &'value str,
        language: &'value str,
    },
    DateTimeLiteral(DateTime),
    TimeLiteral(Time),
    DateLiteral(Date),
    DurationLiteral(Duration),
    YearMonthDurationLiteral(YearMonthDuration),
    DayTimeDurationLiteral(DayTimeDuration),
    OtherLiteral(LiteralRef<'value>),
}

impl<'value> TypedValueRef<'value> {
    /// Interprets `term` according to its data type.
    pub fn from_term(term: &'value Term) -> Self {
        match term {
            Term::NamedNode(node) => TypedValueRef::NamedNode(node.as_ref()),
            Term::BlankNode(node) => TypedValueRef::BlankNode(node.as_ref()),
            Term::Literal(literal) => Self::from_literal(literal.as_ref()),
            Term::Triple(triple) => TypedValueRef::Triple(triple),
        }
    }

    /// Interprets `literal` according to its data type.
    pub fn from_literal(literal: LiteralRef<'value>) -> Self {
        if let Some(language) = literal.language() {
            return TypedValueRef::LanguageStringLiteral {
                value: literal.value(),
                language,
            };
        }

        let value = literal.value();
        let datatype = literal.datatype();
        let parsed = if datatype == xsd::STRING {
            Some(TypedValueRef::SimpleLiteral(value))
        } else if datatype == xsd::BOOLEAN {
            parse::<Boolean>(value).map(TypedValueRef::BooleanLiteral)
        } else if datatype == xsd::DECIMAL {
            parse::<Decimal>(value).map(|v| TypedValueRef::NumericLiteral(Numeric::Decimal(v)))
        } else if datatype == xsd::FLOAT {
            parse::<Float>(value).map(|v| TypedValueRef::NumericLiteral(Numeric::Float(v)))
        } else if datatype == xsd::DOUBLE {
            parse::<Double>(value).map(|v| TypedValueRef::NumericLiteral(Numeric::Double(v)))
        } else if is_integer_datatype(datatype) {
            parse::<Integer>(value).map(|v| TypedValueRef::NumericLiteral(Numeric::Integer(v)))
        } else if datatype == xsd::DATE_TIME {
            parse::<DateTime>(value).map(TypedValueRef::DateTimeLiteral)
        } else if datatype == xsd::TIME {
            parse::<Time>(value).map(TypedValueRef::TimeLiteral)
        } else if datatype == xsd::DATE {
            parse::<Date>(value).map(TypedValueRef::DateLiteral)
        } else if datatype == xsd::DURATION {
            parse::<Duration>(value).map(TypedValueRef::DurationLiteral)
        } else if datatype == xsd::YEAR_MONTH_DURATION {
            parse::<YearMonthDuration>(value).map(TypedValueRef::YearMonthDurationLiteral)
        } else if datatype == xsd::DAY_TIME_DURATION {
            parse::<DayTimeDuration>(value).map(TypedValueRef::DayTimeDurationLiteral)
        } else {
            None
        };
        parsed.unwrap_or(TypedValueRef::OtherLiteral(literal))
    }

    pub fn is_literal(&self) -> bool {
        !matches!(
            self,
            TypedValueRef::NamedNode(_) | TypedValueRef::BlankNode(_) | TypedValueRef::Triple(_)
        )
    }

    /// Returns the string view of simple and language-tagged literals.
    pub fn as_string_literal(&self) -> Option<StringLiteralRef<'value>> {
        match *self {
            TypedValueRef::SimpleLiteral(value) => Some(StringLiteralRef(value, None)),
            TypedValueRef::LanguageStringLiteral { value, language } => {
                Some(StringLiteralRef(value, Some(language)))
            }
            _ => None,
        }
    }

    /// The data type IRI of a literal. Returns [None] for IRIs, blank nodes and triples.
    pub fn datatype(&self) -> Option<NamedNodeRef<'value>> {
        Some(match self {
            TypedValueRef::NamedNode(_) | TypedValueRef::BlankNode(_) | TypedValueRef::Triple(_) => {
                return None
            }
            TypedValueRef::BooleanLiteral(_) => xsd::BOOLEAN,
            TypedValueRef::NumericLiteral(value) => value.datatype(),
            TypedValueRef::SimpleLiteral(_) => xsd::STRING,
            TypedValueRef::LanguageStringLiteral { .. } => rdf::LANG_STRING,
            TypedValueRef::DateTimeLiteral(_) => xsd::DATE_TIME,
            TypedValueRef::TimeLiteral(_) => xsd::TIME,
            TypedValueRef::DateLiteral(_) => xsd::DATE,
            TypedValueRef::DurationLiteral(_) => xsd::DURATION,
            TypedValueRef::YearMonthDurationLiteral(_) => xsd::YEAR_MONTH_DURATION,
            TypedValueRef::DayTimeDurationLiteral(_) => xsd::DAY_TIME_DURATION,
            TypedValueRef::OtherLiteral(literal) => literal.datatype(),
        })
    }

    /// Creates an owned term with the canonical lexical form of the value.
    pub fn into_term(self) -> Term {
        match self {
            TypedValueRef::NamedNode(value) => Term::NamedNode(value.into_owned()),
            TypedValueRef::BlankNode(value) => Term::BlankNode(value.into_owned()),
            TypedValueRef::Triple(value) => Term::Triple(Box::new(value.clone())),
            TypedValueRef::BooleanLiteral(value) => Literal::from(bool::from(value)).into(),
            TypedValueRef::NumericLiteral(value) => value.into_literal().into(),
            TypedValueRef::SimpleLiteral(value) => Literal::new_simple_literal(value).into(),
            TypedValueRef::LanguageStringLiteral { value, language } => {
                Literal::new_language_tagged_literal_unchecked(value, language).into()
            }
            TypedValueRef::DateTimeLiteral(value) => typed(value, xsd::DATE_TIME),
            TypedValueRef::TimeLiteral(value) => typed(value, xsd::TIME),
            TypedValueRef::DateLiteral(value) => typed(value, xsd::DATE),
            TypedValueRef::DurationLiteral(value) => typed(value, xsd::DURATION),
            TypedValueRef::YearMonthDurationLiteral(value) => {
                typed(value, xsd::YEAR_MONTH_DURATION)
            }
            TypedValueRef::DayTimeDurationLiteral(value) => typed(value, xsd::DAY_TIME_DURATION),
            TypedValueRef::OtherLiteral(value) => Term::Literal(value.into_owned()),
        }
    }

    /// Compares two literal values in their value space.
    ///
    /// Returns [None] if the values are not comparable, which includes every comparison that
    /// involves an IRI, a blank node or a quoted triple.
    pub fn partial_cmp_values(&self, other: &Self) -> Option<Ordering> {
        partial_cmp_literals(*self, *other)
    }
}

fn parse<T: FromStr>(value: &str) -> Option<T> {
    value.parse().ok()
}

fn typed(value: impl ToString, datatype: NamedNodeRef<'_>) -> Term {
    Literal::new_typed_literal(value.to_string(), datatype).into()
}

fn partial_cmp_literals(a: TypedValueRef<'_>, b: TypedValueRef<'_>) -> Option<Ordering> {
    match a {
        TypedValueRef::SimpleLiteral(a) => match b {
            TypedValueRef::SimpleLiteral(b) => Some(a.cmp(b)),
            _ => None,
        },
        TypedValueRef::LanguageStringLiteral {
            value: a,
            language: a_language,
        } => match b {
            TypedValueRef::LanguageStringLiteral {
                value: b,
                language: b_language,
            } if a_language.eq_ignore_ascii_case(b_language) => Some(a.cmp(b)),
            _ => None,
        },
        TypedValueRef::BooleanLiteral(a) => match b {
            TypedValueRef::BooleanLiteral(b) => a.partial_cmp(&b),
            _ => None,
        },
        TypedValueRef::NumericLiteral(a) => match b {
            TypedValueRef::NumericLiteral(b) => a.partial_cmp(&b),
            _ => None,
        },
        TypedValueRef::DateTimeLiteral(a) => match b {
            TypedValueRef::DateTimeLiteral(b) => a.partial_cmp(&b),
            _ => None,
        },
        TypedValueRef::TimeLiteral(a) => match b {
            TypedValueRef::TimeLiteral(b) => a.partial_cmp(&b),
            _ => None,
        },
        TypedValueRef::DateLiteral(a) => match b {
            TypedValueRef::DateLiteral(b) => a.partial_cmp(&b),
            _ => None,
        },
        TypedValueRef::DurationLiteral(a) => match b {
            TypedValueRef::DurationLiteral(b) => a.partial_cmp(&b),
            TypedValueRef::YearMonthDurationLiteral(b) => a.partial_cmp(&b),
            TypedValueRef::DayTimeDurationLiteral(b) => a.partial_cmp(&b),
            _ => None,
        },
        TypedValueRef::YearMonthDurationLiteral(a) => match b {
            TypedValueRef::DurationLiteral(b) => a.partial_cmp(&b),
            TypedValueRef::YearMonthDurationLiteral(b) => a.partial_cmp(&b),
            TypedValueRef::DayTimeDurationLiteral(b) => a.partial_cmp(&b),
            _ => None,
        },
        TypedValueRef::DayTimeDurationLiteral(a) => match b {
            TypedValueRef::DurationLiteral(b) => a.partial_cmp(&b),
            TypedValueRef::YearMonthDurationLiteral(b) => a.partial_cmp(&b),
            TypedValueRef::DayTimeDurationLiteral(b) => a.partial_cmp(&b),
            _ => None,
        },
        TypedValueRef::OtherLiteral(a) => match b {
            TypedValueRef::OtherLiteral(b) if a == b => Some(Ordering::Equal),
            _ => None,
        },
        TypedValueRef::NamedNode(_) | TypedValueRef::BlankNode(_) | TypedValueRef::Triple(_) => {
            None
        }
    }
}
