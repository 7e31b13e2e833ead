use crate::{SparqlOp, TernarySparqlOp, UnarySparqlOp};
use rdf_algebra_model::{
    subject_to_term, term_to_subject, EvalError, EvalResult, NamedNode, NamedNodeRef, Term,
    TermRef, Triple,
};

#[derive(Debug)]
pub struct TripleSparqlOp;

impl Default for TripleSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl TripleSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for TripleSparqlOp {
    fn name(&self) -> &str {
        "triple"
    }
}

#[derive(Debug)]
pub struct SubjectSparqlOp;

impl Default for SubjectSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl SubjectSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for SubjectSparqlOp {
    fn name(&self) -> &str {
        "subject"
    }
}

#[derive(Debug)]
pub struct PredicateSparqlOp;

impl Default for PredicateSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl PredicateSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for PredicateSparqlOp {
    fn name(&self) -> &str {
        "predicate"
    }
}

#[derive(Debug)]
pub struct ObjectSparqlOp;

impl Default for ObjectSparqlOp {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectSparqlOp {
    pub fn new() -> Self {
        Self {}
    }
}

impl SparqlOp for ObjectSparqlOp {
    fn name(&self) -> &str {
        "object"
    }
}

impl TernarySparqlOp for TripleSparqlOp {
    type Arg0<'data> = TermRef<'data>;
    type Arg1<'data> = NamedNodeRef<'data>;
    type Arg2<'data> = TermRef<'data>;
    type Result<'data> = Triple;

    fn evaluate<'data>(
        &self,
        subject: Self::Arg0<'data>,
        predicate: Self::Arg1<'data>,
        object: Self::Arg2<'data>,
    ) -> EvalResult<Self::Result<'data>> {
        let subject = term_to_subject(subject.into_owned()).ok_or(EvalError::TypeError)?;
        Ok(Triple::new(subject, predicate, object.into_owned()))
    }
}

impl UnarySparqlOp for SubjectSparqlOp {
    type Arg<'data> = &'data Triple;
    type Result<'data> = Term;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        Ok(subject_to_term(&value.subject))
    }
}

impl UnarySparqlOp for PredicateSparqlOp {
    type Arg<'data> = &'data Triple;
    type Result<'data> = NamedNode;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        Ok(value.predicate.clone())
    }
}

impl UnarySparqlOp for ObjectSparqlOp {
    type Arg<'data> = &'data Triple;
    type Result<'data> = Term;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        Ok(value.object.clone())
    }
}
