use crate::{EvalError, EvalResult, Subject, Term, Triple, TypedValueRef};
use std::cmp::Ordering;

/// Compares two (possibly unbound) terms.
///
/// The kinds of terms are ordered as: unbound < blank node < IRI < literal < quoted triple.
///
/// In strict mode, comparing two IRIs, two blank nodes, two triples, or a triple with another kind
/// raises an [EvalError], as does comparing two literals whose values are not comparable.
/// Kinds that take part in the fixed precedence are ordered by that precedence.
///
/// In relaxed mode, the comparison never fails and forms a total order. This is the comparator
/// used by `ORDER BY` and by the `MIN`/`MAX` aggregates.
pub fn compare_terms(a: Option<&Term>, b: Option<&Term>, relaxed: bool) -> EvalResult<Ordering> {
    if relaxed {
        Ok(cmp_optional_terms_total(a, b))
    } else {
        cmp_optional_terms_strict(a, b)
    }
}

/// The total order used by `ORDER BY`.
pub fn cmp_terms_total(a: &Term, b: &Term) -> Ordering {
    match kind_rank(Some(a)).cmp(&kind_rank(Some(b))) {
        Ordering::Equal => {}
        ordering => return ordering,
    }

    match (a, b) {
        (Term::BlankNode(a), Term::BlankNode(b)) => a.as_str().cmp(b.as_str()),
        (Term::NamedNode(a), Term::NamedNode(b)) => a.as_str().cmp(b.as_str()),
        (Term::Triple(a), Term::Triple(b)) => cmp_triples_total(a, b),
        _ => cmp_literals_total(a, b),
    }
}

fn cmp_optional_terms_total(a: Option<&Term>, b: Option<&Term>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp_terms_total(a, b),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn cmp_optional_terms_strict(a: Option<&Term>, b: Option<&Term>) -> EvalResult<Ordering> {
    let (rank_a, rank_b) = (kind_rank(a), kind_rank(b));
    if rank_a != rank_b {
        return if rank_a == TRIPLE_RANK || rank_b == TRIPLE_RANK {
            EvalError::expected()
        } else {
            Ok(rank_a.cmp(&rank_b))
        };
    }

    match (a, b) {
        (None, None) => Ok(Ordering::Equal),
        (Some(a @ Term::Literal(_)), Some(b @ Term::Literal(_))) => TypedValueRef::from_term(a)
            .partial_cmp_values(&TypedValueRef::from_term(b))
            .ok_or(EvalError::TypeError),
        _ => EvalError::expected(),
    }
}

const TRIPLE_RANK: u8 = 4;

fn kind_rank(term: Option<&Term>) -> u8 {
    match term {
        None => 0,
        Some(Term::BlankNode(_)) => 1,
        Some(Term::NamedNode(_)) => 2,
        Some(Term::Literal(_)) => 3,
        Some(Term::Triple(_)) => TRIPLE_RANK,
    }
}

fn cmp_triples_total(a: &Triple, b: &Triple) -> Ordering {
    cmp_terms_total(&subject_term(&a.subject), &subject_term(&b.subject))
        .then_with(|| a.predicate.as_str().cmp(b.predicate.as_str()))
        .then_with(|| cmp_terms_total(&a.object, &b.object))
}

fn subject_term(subject: &Subject) -> Term {
    match subject {
        Subject::NamedNode(node) => node.clone().into(),
        Subject::BlankNode(node) => node.clone().into(),
        Subject::Triple(triple) => Term::Triple(triple.clone()),
    }
}

/// Literals are first grouped into families that are comparable among each other. Inside a family
/// the values are compared and ties are broken by the lexical form, the data type and the
/// language tag.
fn cmp_literals_total(a: &Term, b: &Term) -> Ordering {
    let (Term::Literal(a_literal), Term::Literal(b_literal)) = (a, b) else {
        return Ordering::Equal;
    };
    let a_value = TypedValueRef::from_term(a);
    let b_value = TypedValueRef::from_term(b);

    let family_ordering = literal_family(&a_value).cmp(&literal_family(&b_value));
    if family_ordering != Ordering::Equal {
        return family_ordering;
    }

    let value_ordering = match (a_value, b_value) {
        (TypedValueRef::NumericLiteral(a), TypedValueRef::NumericLiteral(b)) => {
            match (is_nan(&a_value), is_nan(&b_value)) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            }
        }
        (TypedValueRef::SimpleLiteral(_), _) | (TypedValueRef::LanguageStringLiteral { .. }, _) => {
            Ordering::Equal
        }
        _ => a_value
            .partial_cmp_values(&b_value)
            .unwrap_or(Ordering::Equal),
    };

    value_ordering.then_with(|| {
        (
            a_literal.value(),
            a_literal.datatype().as_str(),
            a_literal.language(),
        )
            .cmp(&(
                b_literal.value(),
                b_literal.datatype().as_str(),
                b_literal.language(),
            ))
    })
}

fn is_nan(value: &TypedValueRef<'_>) -> bool {
    match value {
        TypedValueRef::NumericLiteral(crate::Numeric::Float(value)) => f32::from(*value).is_nan(),
        TypedValueRef::NumericLiteral(crate::Numeric::Double(value)) => f64::from(*value).is_nan(),
        _ => false,
    }
}

fn literal_family(value: &TypedValueRef<'_>) -> u8 {
    match value {
        TypedValueRef::NumericLiteral(_) => 0,
        TypedValueRef::SimpleLiteral(_) | TypedValueRef::LanguageStringLiteral { .. } => 1,
        TypedValueRef::BooleanLiteral(_) => 2,
        TypedValueRef::DateTimeLiteral(_) => 3,
        TypedValueRef::DateLiteral(_) => 4,
        TypedValueRef::TimeLiteral(_) => 5,
        TypedValueRef::DurationLiteral(_)
        | TypedValueRef::YearMonthDurationLiteral(_)
        | TypedValueRef::DayTimeDurationLiteral(_) => 6,
        TypedValueRef::OtherLiteral(_)
        | TypedValueRef::NamedNode(_)
        | TypedValueRef::BlankNode(_)
        | TypedValueRef::Triple(_) => 7,
    }
}
