use crate::sparql::{Aggregatable, EvalContext, Evaluatable, Scope};
use itertools::Itertools;
use rdf_algebra_functions::aggregates::{
    Accumulator, AvgAccumulator, CountAccumulator, DistinctAccumulator, GroupConcatAccumulator,
    MaxAccumulator, MinAccumulator, SampleAccumulator, SumAccumulator,
};
use rdf_algebra_logical::{AggregateExpression, AggregateFunction, GroupKey};
use rdf_algebra_model::{EvalResult, Literal, Solution, Solutions, Term, Variable};
use rustc_hash::FxHashMap;
use tracing::debug;

impl Aggregatable for AggregateExpression {
    fn aggregate(
        &self,
        group: &[Solution],
        ctx: &EvalContext<'_>,
        scope: &Scope,
    ) -> EvalResult<Term> {
        let Some(expression) = &self.expression else {
            let count = if self.distinct {
                group.iter().unique().count()
            } else {
                group.len()
            };
            return Ok(Literal::from(i64::try_from(count)?).into());
        };

        let mut accumulator = accumulator(self);
        for solution in group {
            // Values that fail to evaluate do not take part in the aggregate.
            if let Ok(value) = expression.evaluate(solution, ctx, scope) {
                accumulator.add(value);
            }
        }
        accumulator.finish()
    }
}

fn accumulator(expression: &AggregateExpression) -> Box<dyn Accumulator> {
    let accumulator: Box<dyn Accumulator> = match expression.function {
        AggregateFunction::Count => Box::new(CountAccumulator::new()),
        AggregateFunction::Sum => Box::new(SumAccumulator::new()),
        AggregateFunction::Avg => Box::new(AvgAccumulator::new()),
        AggregateFunction::Min => Box::new(MinAccumulator::new()),
        AggregateFunction::Max => Box::new(MaxAccumulator::new()),
        AggregateFunction::Sample => Box::new(SampleAccumulator::new()),
        AggregateFunction::GroupConcat => {
            Box::new(GroupConcatAccumulator::new(expression.separator.clone()))
        }
    };
    if expression.distinct {
        Box::new(DistinctAccumulator::new(accumulator))
    } else {
        accumulator
    }
}

/// Partitions `solutions` by the values of `keys` and computes `aggregates` for every partition.
///
/// The groups are emitted in the order in which their first solution appears. Without keys, there
/// is exactly one group, even if `solutions` is empty.
pub(crate) fn group(
    solutions: &Solutions,
    keys: &[GroupKey],
    aggregates: &[(Variable, AggregateExpression)],
    ctx: &EvalContext<'_>,
    scope: &Scope,
) -> Solutions {
    let mut groups: Vec<(Vec<Option<Term>>, Vec<Solution>)> = Vec::new();
    let mut index: FxHashMap<Vec<Option<Term>>, usize> = FxHashMap::default();
    if keys.is_empty() {
        groups.push((Vec::new(), Vec::new()));
        index.insert(Vec::new(), 0);
    }

    for solution in solutions {
        // A key that fails to evaluate is unbound for this solution.
        let key = keys
            .iter()
            .map(|key| key.expression.evaluate(solution, ctx, scope).ok())
            .collect::<Vec<_>>();
        let position = *index.entry(key.clone()).or_insert_with(|| {
            groups.push((key, Vec::new()));
            groups.len() - 1
        });
        groups[position].1.push(solution.clone());
    }

    groups
        .into_iter()
        .map(|(key, members)| {
            let mut output = Solution::new();
            for (key, value) in keys.iter().zip(key) {
                if let (Some(variable), Some(value)) = (key.bound_variable(), value) {
                    output.insert(variable.clone(), value);
                }
            }
            for (variable, aggregate) in aggregates {
                match aggregate.aggregate(&members, ctx, scope) {
                    Ok(value) => {
                        output.insert(variable.clone(), value);
                    }
                    Err(error) => {
                        debug!(%variable, %error, "Aggregate left the variable unbound");
                    }
                }
            }
            output
        })
        .collect()
}
