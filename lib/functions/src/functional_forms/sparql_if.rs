use crate::effective_boolean_value;
use rdf_algebra_model::{EvalResult, Term};

/// Evaluates `IF(condition, then, else)`. Only the selected branch is evaluated.
pub fn sparql_if(
    condition: EvalResult<Term>,
    then_branch: impl FnOnce() -> EvalResult<Term>,
    else_branch: impl FnOnce() -> EvalResult<Term>,
) -> EvalResult<Term> {
    if effective_boolean_value(&condition?)? {
        then_branch()
    } else {
        else_branch()
    }
}
