use crate::{GraphPattern, Query, Update, UpdateOperation, ValidationError};

/// Applies algebraic simplifications that never change the solutions of a pattern.
///
/// - `(join unit A)` and `(join A unit)` become `A`
/// - nested `distinct` nodes collapse
/// - `(slice 0 _ A)`, `(project * A)` and `(filter true A)` become `A`
/// - joins of two basic graph patterns are merged into a single one
///
/// The result is validated.
pub fn optimize(pattern: GraphPattern) -> Result<GraphPattern, ValidationError> {
    let optimized = simplify(pattern);
    optimized.validate()?;
    Ok(optimized)
}

/// Optimizes the pattern of a query.
pub fn optimize_query(mut query: Query) -> Result<Query, ValidationError> {
    let pattern = std::mem::replace(query.pattern_mut(), GraphPattern::unit());
    *query.pattern_mut() = optimize(pattern)?;
    Ok(query)
}

/// Optimizes the patterns of the `modify` operations of an update.
pub fn optimize_update(update: Update) -> Result<Update, ValidationError> {
    let operations = update
        .operations
        .into_iter()
        .map(|operation| match operation {
            UpdateOperation::Modify {
                delete,
                insert,
                pattern,
                silent,
            } => Ok(UpdateOperation::Modify {
                delete,
                insert,
                pattern: Box::new(optimize(*pattern)?),
                silent,
            }),
            operation => Ok(operation),
        })
        .collect::<Result<Vec<_>, ValidationError>>()?;
    Ok(Update { operations })
}

fn simplify(pattern: GraphPattern) -> GraphPattern {
    match pattern {
        GraphPattern::Join { left, right } => {
            let left = simplify(*left);
            let right = simplify(*right);
            match (left, right) {
                (left, right) if left.is_unit() => right,
                (left, right) if right.is_unit() => left,
                (GraphPattern::Bgp { patterns: mut left }, GraphPattern::Bgp { patterns: right }) => {
                    left.extend(right);
                    GraphPattern::Bgp { patterns: left }
                }
                (left, right) => GraphPattern::Join {
                    left: Box::new(left),
                    right: Box::new(right),
                },
            }
        }
        GraphPattern::Distinct { inner } => match simplify(*inner) {
            inner @ GraphPattern::Distinct { .. } => inner,
            inner => GraphPattern::Distinct {
                inner: Box::new(inner),
            },
        },
        GraphPattern::Slice {
            inner,
            start: 0,
            length: None,
        } => simplify(*inner),
        GraphPattern::Project {
            inner,
            variables: None,
        } => simplify(*inner),
        GraphPattern::Filter { expression, inner } if expression.is_true_constant() => {
            simplify(*inner)
        }
        GraphPattern::LeftJoin {
            left,
            right,
            expression,
        } => GraphPattern::LeftJoin {
            left: Box::new(simplify(*left)),
            right: Box::new(simplify(*right)),
            expression,
        },
        GraphPattern::Union { left, right } => GraphPattern::Union {
            left: Box::new(simplify(*left)),
            right: Box::new(simplify(*right)),
        },
        GraphPattern::Minus { left, right } => GraphPattern::Minus {
            left: Box::new(simplify(*left)),
            right: Box::new(simplify(*right)),
        },
        GraphPattern::Filter { expression, inner } => GraphPattern::Filter {
            expression,
            inner: Box::new(simplify(*inner)),
        },
        GraphPattern::Graph { name, inner } => GraphPattern::Graph {
            name,
            inner: Box::new(simplify(*inner)),
        },
        GraphPattern::Extend {
            inner,
            variable,
            expression,
        } => GraphPattern::Extend {
            inner: Box::new(simplify(*inner)),
            variable,
            expression,
        },
        GraphPattern::OrderBy { inner, expression } => GraphPattern::OrderBy {
            inner: Box::new(simplify(*inner)),
            expression,
        },
        GraphPattern::Project { inner, variables } => GraphPattern::Project {
            inner: Box::new(simplify(*inner)),
            variables,
        },
        GraphPattern::Reduced { inner } => GraphPattern::Reduced {
            inner: Box::new(simplify(*inner)),
        },
        GraphPattern::Slice {
            inner,
            start,
            length,
        } => GraphPattern::Slice {
            inner: Box::new(simplify(*inner)),
            start,
            length,
        },
        GraphPattern::Group {
            inner,
            keys,
            aggregates,
        } => GraphPattern::Group {
            inner: Box::new(simplify(*inner)),
            keys,
            aggregates,
        },
        GraphPattern::Dataset { dataset, inner } => GraphPattern::Dataset {
            dataset,
            inner: Box::new(simplify(*inner)),
        },
        GraphPattern::Prefix { prefixes, inner } => GraphPattern::Prefix {
            prefixes,
            inner: Box::new(simplify(*inner)),
        },
        GraphPattern::Base { iri, inner } => GraphPattern::Base {
            iri,
            inner: Box::new(simplify(*inner)),
        },
        pattern @ (GraphPattern::Bgp { .. }
        | GraphPattern::Path { .. }
        | GraphPattern::Values { .. }) => pattern,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn optimized(input: &str) -> String {
        optimize(input.parse().unwrap()).unwrap().to_string()
    }

    #[test]
    fn join_with_unit() {
        insta::assert_snapshot!(
            optimized("(join (table unit) (bgp (triple ?s <http://p> ?o)))"),
            @"(bgp (triple ?s <http://p> ?o))"
        );
        insta::assert_snapshot!(
            optimized("(join (filter (= ?o 1) (bgp (triple ?s <http://p> ?o))) (bgp))"),
            @r"
        (filter (= ?o 1)
          (bgp (triple ?s <http://p> ?o)))
        "
        );
    }

    #[test]
    fn bgps_are_merged() {
        insta::assert_snapshot!(
            optimized("(join (bgp (triple ?s <http://p> ?o)) (bgp (triple ?o <http://q> ?x)))"),
            @r"
        (bgp
          (triple ?s <http://p> ?o)
          (triple ?o <http://q> ?x))
        "
        );
    }

    #[test]
    fn trivial_modifiers_are_removed() {
        insta::assert_snapshot!(
            optimized("(distinct (distinct (slice 0 _ (project * (filter true (bgp (triple ?s ?p ?o)))))))"),
            @r"
        (distinct
          (bgp (triple ?s ?p ?o)))
        "
        );
    }

    #[test]
    fn projection_is_kept() {
        insta::assert_snapshot!(
            optimized("(project (?s) (slice 1 _ (bgp (triple ?s ?p ?o))))"),
            @r"
        (project (?s)
          (slice 1 _
            (bgp (triple ?s ?p ?o))))
        "
        );
    }
}
