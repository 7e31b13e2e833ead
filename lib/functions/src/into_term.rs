use rdf_algebra_model::vocab::xsd;
use rdf_algebra_model::{
    BlankNode, Boolean, DateTime, DayTimeDuration, Decimal, Double, Float, Integer, Literal, NamedNode,
    Numeric, OwnedStringLiteral, SimpleLiteralRef, StringLiteralRef, Term, Triple, TypedValueRef,
};

/// Converts the result of a function into a term.
pub trait IntoTerm {
    fn into_term(self) -> Term;
}

impl IntoTerm for Term {
    fn into_term(self) -> Term {
        self
    }
}

impl IntoTerm for TypedValueRef<'_> {
    fn into_term(self) -> Term {
        TypedValueRef::into_term(self)
    }
}

impl IntoTerm for NamedNode {
    fn into_term(self) -> Term {
        self.into()
    }
}

impl IntoTerm for BlankNode {
    fn into_term(self) -> Term {
        self.into()
    }
}

impl IntoTerm for Literal {
    fn into_term(self) -> Term {
        self.into()
    }
}

impl IntoTerm for Triple {
    fn into_term(self) -> Term {
        self.into()
    }
}

impl IntoTerm for bool {
    fn into_term(self) -> Term {
        Literal::from(self).into()
    }
}

impl IntoTerm for Boolean {
    fn into_term(self) -> Term {
        Literal::from(bool::from(self)).into()
    }
}

impl IntoTerm for Numeric {
    fn into_term(self) -> Term {
        self.into_literal().into()
    }
}

impl IntoTerm for Integer {
    fn into_term(self) -> Term {
        Numeric::Integer(self).into_term()
    }
}

impl IntoTerm for Decimal {
    fn into_term(self) -> Term {
        Numeric::Decimal(self).into_term()
    }
}

impl IntoTerm for Double {
    fn into_term(self) -> Term {
        Numeric::Double(self).into_term()
    }
}

impl IntoTerm for Float {
    fn into_term(self) -> Term {
        Numeric::Float(self).into_term()
    }
}

impl IntoTerm for DateTime {
    fn into_term(self) -> Term {
        Literal::new_typed_literal(self.to_string(), xsd::DATE_TIME).into()
    }
}

impl IntoTerm for DayTimeDuration {
    fn into_term(self) -> Term {
        Literal::new_typed_literal(self.to_string(), xsd::DAY_TIME_DURATION).into()
    }
}

impl IntoTerm for OwnedStringLiteral {
    fn into_term(self) -> Term {
        self.into_literal().into()
    }
}

impl IntoTerm for StringLiteralRef<'_> {
    fn into_term(self) -> Term {
        self.into_owned().into_term()
    }
}

impl IntoTerm for SimpleLiteralRef<'_> {
    fn into_term(self) -> Term {
        Literal::new_simple_literal(self.0).into()
    }
}
