use crate::sparql::error::QueryEvaluationError;
use crate::sparql::EvalContext;
use rdf_algebra_logical::PropertyPath;
use rdf_algebra_model::{
    ActiveGraph, NamedNodePattern, Solution, Solutions, Term, TermPattern, TriplePattern,
};
use rustc_hash::FxHashSet;

/// Evaluates property paths against the active graph.
///
/// Every combinator returns each distinct solution once, even if multiple derivations produce it.
/// The arbitrary-length combinators keep the set of reached terms while they traverse the graph,
/// such that cycles in the data do not lead to infinite recursion.
pub(crate) struct PathEvaluator<'eval, 'ctx> {
    ctx: &'eval EvalContext<'ctx>,
    graph: &'eval ActiveGraph,
}

impl<'eval, 'ctx> PathEvaluator<'eval, 'ctx> {
    pub(crate) fn new(ctx: &'eval EvalContext<'ctx>, graph: &'eval ActiveGraph) -> Self {
        Self { ctx, graph }
    }

    /// Returns the bindings of the variables in `subject` and `object` such that `path` connects
    /// the two endpoints.
    pub(crate) fn evaluate(
        &self,
        subject: &TermPattern,
        path: &PropertyPath,
        object: &TermPattern,
    ) -> Result<Solutions, QueryEvaluationError> {
        let _guard = self.ctx.enter()?;
        let solutions = match path {
            PropertyPath::Link(predicate) => self.ctx.store().query(
                &TriplePattern::new(subject.clone(), predicate.clone(), object.clone()),
                self.graph,
            )?,
            PropertyPath::Inverse(inner) => self.evaluate(object, inner, subject)?,
            PropertyPath::Sequence(lhs, rhs) => self.sequence(subject, lhs, rhs, object)?,
            PropertyPath::Alternative(lhs, rhs) => {
                let mut solutions = self.evaluate(subject, lhs, object)?;
                solutions.extend(self.evaluate(subject, rhs, object)?);
                solutions
            }
            PropertyPath::ZeroLength => self.zero_length(subject, object)?,
            PropertyPath::ZeroOrOne(inner) => {
                let mut solutions = self.zero_length(subject, object)?;
                solutions.extend(self.evaluate(subject, inner, object)?);
                solutions
            }
            PropertyPath::OneOrMore(inner) => self.one_or_more(subject, inner, object)?,
            PropertyPath::ZeroOrMore(inner) => {
                let mut solutions = self.zero_length(subject, object)?;
                solutions.extend(self.one_or_more(subject, inner, object)?);
                solutions
            }
            PropertyPath::NegatedPropertySet(excluded) => {
                let predicate = self.ctx.fresh_variable();
                let pattern = TriplePattern::new(
                    subject.clone(),
                    NamedNodePattern::Variable(predicate.clone()),
                    object.clone(),
                );
                self.ctx
                    .store()
                    .query(&pattern, self.graph)?
                    .into_iter()
                    .filter(|solution| match solution.get(&predicate) {
                        Some(Term::NamedNode(node)) => !excluded.contains(node),
                        _ => false,
                    })
                    .map(|mut solution| {
                        solution.remove(&predicate);
                        solution
                    })
                    .collect()
            }
        };
        Ok(solutions.distinct())
    }

    /// Joins `path(subject, lhs, v)` with `path(v, rhs, object)` for a fresh variable `v`.
    fn sequence(
        &self,
        subject: &TermPattern,
        lhs: &PropertyPath,
        rhs: &PropertyPath,
        object: &TermPattern,
    ) -> Result<Solutions, QueryEvaluationError> {
        let middle = self.ctx.fresh_variable();
        let mut solutions = Solutions::empty();
        for left in self.evaluate(subject, lhs, &TermPattern::Variable(middle.clone()))? {
            let Some(node) = left.get(&middle) else {
                continue;
            };
            let node = TermPattern::Term(node.clone());
            for right in self.evaluate(&node, rhs, &object.bind(&left))? {
                if let Some(mut merged) = left.merge(&right) {
                    merged.remove(&middle);
                    solutions.push(merged);
                }
            }
        }
        Ok(solutions)
    }

    /// Matches if both endpoints are the same term.
    fn zero_length(
        &self,
        subject: &TermPattern,
        object: &TermPattern,
    ) -> Result<Solutions, QueryEvaluationError> {
        if let Some(term) = subject.to_term() {
            return Ok(matching(object, &term).into_iter().collect());
        }
        if let Some(term) = object.to_term() {
            return Ok(matching(subject, &term).into_iter().collect());
        }

        Ok(self
            .ctx
            .store()
            .subjects_and_objects(self.graph)?
            .into_iter()
            .filter_map(|term| {
                let mut solution = Solution::new();
                (subject.match_term(&term, &mut solution) && object.match_term(&term, &mut solution))
                    .then_some(solution)
            })
            .collect())
    }

    fn one_or_more(
        &self,
        subject: &TermPattern,
        path: &PropertyPath,
        object: &TermPattern,
    ) -> Result<Solutions, QueryEvaluationError> {
        if let Some(start) = subject.to_term() {
            return Ok(self
                .reachable(&start, path)?
                .iter()
                .filter_map(|term| matching(object, term))
                .collect());
        }
        if let Some(end) = object.to_term() {
            let inverse = PropertyPath::inverse(path.clone());
            return Ok(self
                .reachable(&end, &inverse)?
                .iter()
                .filter_map(|term| matching(subject, term))
                .collect());
        }

        let mut solutions = Solutions::empty();
        for start in self.ctx.store().subjects_and_objects(self.graph)? {
            let Some(solution) = matching(subject, &start) else {
                continue;
            };
            for end in self.reachable(&start, path)? {
                let mut solution = solution.clone();
                if object.match_term(&end, &mut solution) {
                    solutions.push(solution);
                }
            }
        }
        Ok(solutions)
    }

    /// Returns every term that is reachable from `start` with at least one step of `path`, in the
    /// order in which they are reached. `start` is contained if it lies on a cycle.
    fn reachable(
        &self,
        start: &Term,
        path: &PropertyPath,
    ) -> Result<Vec<Term>, QueryEvaluationError> {
        let mut reached = FxHashSet::default();
        let mut result = Vec::new();
        let mut pending = vec![start.clone()];
        while let Some(node) = pending.pop() {
            for next in self.step(&node, path)? {
                if reached.insert(next.clone()) {
                    result.push(next.clone());
                    pending.push(next);
                }
            }
        }
        Ok(result)
    }

    /// Returns the terms that are reachable from `node` with exactly one step of `path`.
    fn step(&self, node: &Term, path: &PropertyPath) -> Result<Vec<Term>, QueryEvaluationError> {
        let target = self.ctx.fresh_variable();
        Ok(self
            .evaluate(
                &TermPattern::Term(node.clone()),
                path,
                &TermPattern::Variable(target.clone()),
            )?
            .into_iter()
            .filter_map(|mut solution| solution.remove(&target))
            .collect())
    }
}

fn matching(pattern: &TermPattern, term: &Term) -> Option<Solution> {
    let mut solution = Solution::new();
    pattern.match_term(term, &mut solution).then_some(solution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_store::TestStore;
    use crate::ExecutionOptions;
    use rdf_algebra_model::Variable;

    const DATA: &str = r#"
        @prefix ex: <http://example.com/> .
        ex:a ex:p ex:b .
        ex:b ex:p ex:a .
        ex:c ex:q ex:d .
        ex:d ex:q ex:e .
        ex:a ex:r "literal" .
    "#;

    fn evaluate(subject: &str, path: &str, object: &str) -> Solutions {
        let store = TestStore::from_turtle(DATA);
        let options = ExecutionOptions::default();
        let ctx = EvalContext::new(&store, &options);
        let path: PropertyPath = path.parse().unwrap();
        PathEvaluator::new(&ctx, &ActiveGraph::DefaultGraph)
            .evaluate(&endpoint(subject), &path, &endpoint(object))
            .unwrap()
    }

    fn endpoint(value: &str) -> TermPattern {
        match value.strip_prefix('?') {
            Some(name) => Variable::new_unchecked(name).into(),
            None => rdf_algebra_model::NamedNode::new_unchecked(format!("http://example.com/{value}"))
                .into(),
        }
    }

    #[test]
    fn one_or_more_terminates_on_cycles() {
        insta::assert_snapshot!(evaluate("a", "(path+ <http://example.com/p>)", "?x"), @r"
        {?x -> <http://example.com/b>}
        {?x -> <http://example.com/a>}
        ");
    }

    #[test]
    fn one_or_more_towards_bound_object() {
        insta::assert_snapshot!(evaluate("?x", "(path+ <http://example.com/q>)", "e"), @r"
        {?x -> <http://example.com/d>}
        {?x -> <http://example.com/c>}
        ");
    }

    #[test]
    fn zero_or_one_sequence() {
        let solutions = evaluate(
            "c",
            "(path? (seq <http://example.com/q> <http://example.com/q>))",
            "e",
        );
        assert_eq!(solutions, Solutions::unit());

        let solutions = evaluate(
            "c",
            "(path? (seq <http://example.com/q> <http://example.com/q>))",
            "c",
        );
        assert_eq!(solutions, Solutions::unit());
    }

    #[test]
    fn zero_or_more_includes_start() {
        insta::assert_snapshot!(evaluate("c", "(path* <http://example.com/q>)", "?x"), @r"
        {?x -> <http://example.com/c>}
        {?x -> <http://example.com/d>}
        {?x -> <http://example.com/e>}
        ");
    }

    #[test]
    fn inverse_and_alternative() {
        insta::assert_snapshot!(
            evaluate("?x", "(alt (reverse <http://example.com/q>) <http://example.com/p>)", "d"),
            @"{?x -> <http://example.com/e>}"
        );
    }

    #[test]
    fn negated_property_set() {
        insta::assert_snapshot!(
            evaluate("a", "(notoneof <http://example.com/p>)", "?o"),
            @r#"{?o -> "literal"}"#
        );
    }

    #[test]
    fn sequence_with_open_endpoints() {
        let solutions = evaluate(
            "?s",
            "(seq <http://example.com/p> <http://example.com/p>)",
            "?o",
        );
        insta::assert_snapshot!(solutions, @r"
        {?o -> <http://example.com/a>, ?s -> <http://example.com/a>}
        {?o -> <http://example.com/b>, ?s -> <http://example.com/b>}
        ");
    }
}
