use crate::{
    GraphName, NamedNode, Quad, Solution, Subject, Term, Triple, Variable,
};
use std::fmt::{Display, Formatter};

/// A term or a variable in the subject or object position of a [TriplePattern].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TermPattern {
    Term(Term),
    Variable(Variable),
    /// A quoted triple that may contain variables.
    Triple(Box<TriplePattern>),
}

impl TermPattern {
    /// Collects the variables of this pattern into `variables`.
    pub fn collect_variables<'a>(&'a self, variables: &mut Vec<&'a Variable>) {
        match self {
            TermPattern::Term(_) => {}
            TermPattern::Variable(variable) => {
                if !variables.contains(&variable) {
                    variables.push(variable);
                }
            }
            TermPattern::Triple(triple) => triple.collect_variables(variables),
        }
    }

    /// Substitutes every variable bound in `solution`.
    #[must_use]
    pub fn bind(&self, solution: &Solution) -> TermPattern {
        match self {
            TermPattern::Term(_) => self.clone(),
            TermPattern::Variable(variable) => solution
                .get(variable)
                .map_or_else(|| self.clone(), |term| TermPattern::Term(term.clone())),
            TermPattern::Triple(triple) => {
                let bound = triple.bind(solution);
                match bound.to_triple() {
                    Some(triple) => TermPattern::Term(Term::Triple(Box::new(triple))),
                    None => TermPattern::Triple(Box::new(bound)),
                }
            }
        }
    }

    /// Returns the term if this pattern contains no variable.
    pub fn to_term(&self) -> Option<Term> {
        match self {
            TermPattern::Term(term) => Some(term.clone()),
            TermPattern::Variable(_) => None,
            TermPattern::Triple(triple) => triple.to_triple().map(|t| Term::Triple(Box::new(t))),
        }
    }

    /// Matches `term` against this pattern, extending `solution` with new bindings.
    pub fn match_term(&self, term: &Term, solution: &mut Solution) -> bool {
        match self {
            TermPattern::Term(expected) => expected == term,
            TermPattern::Variable(variable) => match solution.get(variable) {
                Some(bound) => bound == term,
                None => {
                    solution.insert(variable.clone(), term.clone());
                    true
                }
            },
            TermPattern::Triple(pattern) => match term {
                Term::Triple(triple) => pattern.match_triple(triple, solution),
                _ => false,
            },
        }
    }
}

impl From<Term> for TermPattern {
    fn from(term: Term) -> Self {
        TermPattern::Term(term)
    }
}

impl From<NamedNode> for TermPattern {
    fn from(node: NamedNode) -> Self {
        TermPattern::Term(node.into())
    }
}

impl From<Variable> for TermPattern {
    fn from(variable: Variable) -> Self {
        TermPattern::Variable(variable)
    }
}

impl From<TriplePattern> for TermPattern {
    fn from(triple: TriplePattern) -> Self {
        TermPattern::Triple(Box::new(triple))
    }
}

impl Display for TermPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TermPattern::Term(term) => term.fmt(f),
            TermPattern::Variable(variable) => variable.fmt(f),
            TermPattern::Triple(triple) => write!(f, "<<{triple}>>"),
        }
    }
}

/// An IRI or a variable, e.g., in the predicate position of a [TriplePattern].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NamedNodePattern {
    NamedNode(NamedNode),
    Variable(Variable),
}

impl NamedNodePattern {
    pub fn variable(&self) -> Option<&Variable> {
        match self {
            NamedNodePattern::NamedNode(_) => None,
            NamedNodePattern::Variable(variable) => Some(variable),
        }
    }

    #[must_use]
    pub fn bind(&self, solution: &Solution) -> NamedNodePattern {
        match self {
            NamedNodePattern::Variable(variable) => match solution.get(variable) {
                Some(Term::NamedNode(node)) => NamedNodePattern::NamedNode(node.clone()),
                _ => self.clone(),
            },
            NamedNodePattern::NamedNode(_) => self.clone(),
        }
    }

    pub fn match_node(&self, node: &NamedNode, solution: &mut Solution) -> bool {
        match self {
            NamedNodePattern::NamedNode(expected) => expected == node,
            NamedNodePattern::Variable(variable) => {
                TermPattern::Variable(variable.clone()).match_term(&node.clone().into(), solution)
            }
        }
    }
}

impl From<NamedNode> for NamedNodePattern {
    fn from(node: NamedNode) -> Self {
        NamedNodePattern::NamedNode(node)
    }
}

impl From<Variable> for NamedNodePattern {
    fn from(variable: Variable) -> Self {
        NamedNodePattern::Variable(variable)
    }
}

impl Display for NamedNodePattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NamedNodePattern::NamedNode(node) => node.fmt(f),
            NamedNodePattern::Variable(variable) => variable.fmt(f),
        }
    }
}

/// A triple pattern: a triple where each position may be a variable.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TriplePattern {
    pub subject: TermPattern,
    pub predicate: NamedNodePattern,
    pub object: TermPattern,
}

impl TriplePattern {
    pub fn new(
        subject: impl Into<TermPattern>,
        predicate: impl Into<NamedNodePattern>,
        object: impl Into<TermPattern>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// The distinct variables of this pattern in order of appearance.
    pub fn variables(&self) -> Vec<&Variable> {
        let mut variables = Vec::new();
        self.collect_variables(&mut variables);
        variables
    }

    pub fn collect_variables<'a>(&'a self, variables: &mut Vec<&'a Variable>) {
        self.subject.collect_variables(variables);
        if let NamedNodePattern::Variable(variable) = &self.predicate {
            if !variables.contains(&variable) {
                variables.push(variable);
            }
        }
        self.object.collect_variables(variables);
    }

    #[must_use]
    pub fn bind(&self, solution: &Solution) -> TriplePattern {
        TriplePattern {
            subject: self.subject.bind(solution),
            predicate: self.predicate.bind(solution),
            object: self.object.bind(solution),
        }
    }

    /// Returns the triple if this pattern contains no variable and forms a valid triple.
    pub fn to_triple(&self) -> Option<Triple> {
        let NamedNodePattern::NamedNode(predicate) = &self.predicate else {
            return None;
        };
        Some(Triple::new(
            term_to_subject(self.subject.to_term()?)?,
            predicate.clone(),
            self.object.to_term()?,
        ))
    }

    /// Computes the bindings that make this pattern equal to `triple`.
    pub fn solution_for(&self, triple: &Triple) -> Option<Solution> {
        let mut solution = Solution::new();
        self.match_triple(triple, &mut solution).then_some(solution)
    }

    fn match_triple(&self, triple: &Triple, solution: &mut Solution) -> bool {
        self.subject
            .match_term(&subject_to_term(&triple.subject), solution)
            && self.predicate.match_node(&triple.predicate, solution)
            && self.object.match_term(&triple.object, solution)
    }

    /// Instantiates this pattern with `solution`. Returns [None] if a variable is unbound or the
    /// result is not a valid triple (e.g., a literal in the subject position).
    pub fn instantiate(&self, solution: &Solution) -> Option<Triple> {
        self.bind(solution).to_triple()
    }
}

impl Display for TriplePattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)
    }
}

/// A graph name or a variable in the graph position of a [QuadPattern].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GraphNamePattern {
    DefaultGraph,
    NamedNode(NamedNode),
    Variable(Variable),
}

impl Display for GraphNamePattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphNamePattern::DefaultGraph => f.write_str("DEFAULT"),
            GraphNamePattern::NamedNode(node) => node.fmt(f),
            GraphNamePattern::Variable(variable) => variable.fmt(f),
        }
    }
}

/// A triple pattern scoped to a graph. Used by the templates of update operations.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QuadPattern {
    pub pattern: TriplePattern,
    pub graph_name: GraphNamePattern,
}

impl QuadPattern {
    pub fn new(pattern: TriplePattern, graph_name: GraphNamePattern) -> Self {
        Self {
            pattern,
            graph_name,
        }
    }

    /// Instantiates this pattern with `solution`. Returns [None] if a variable is unbound or the
    /// result is not a valid quad.
    pub fn instantiate(&self, solution: &Solution) -> Option<Quad> {
        let triple = self.pattern.instantiate(solution)?;
        let graph_name = match &self.graph_name {
            GraphNamePattern::DefaultGraph => GraphName::DefaultGraph,
            GraphNamePattern::NamedNode(node) => GraphName::NamedNode(node.clone()),
            GraphNamePattern::Variable(variable) => match solution.get(variable)? {
                Term::NamedNode(node) => GraphName::NamedNode(node.clone()),
                _ => return None,
            },
        };
        Some(triple.in_graph(graph_name))
    }
}

/// Converts a term into a subject. Literals cannot be subjects.
pub fn term_to_subject(term: Term) -> Option<Subject> {
    match term {
        Term::NamedNode(node) => Some(Subject::NamedNode(node)),
        Term::BlankNode(node) => Some(Subject::BlankNode(node)),
        Term::Triple(triple) => Some(Subject::Triple(triple)),
        Term::Literal(_) => None,
    }
}

pub fn subject_to_term(subject: &Subject) -> Term {
    match subject {
        Subject::NamedNode(node) => Term::NamedNode(node.clone()),
        Subject::BlankNode(node) => Term::BlankNode(node.clone()),
        Subject::Triple(triple) => Term::Triple(triple.clone()),
    }
}
