use crate::{NullarySparqlOp, SparqlOp, UnarySparqlOp};
use rdf_algebra_model::{BlankNode, EvalResult, SimpleLiteralRef};
use rustc_hash::FxHashMap;
use std::cell::{Cell, RefCell};

/// The blank nodes that `BNODE(label)` created during one execution.
///
/// Blank nodes are keyed by the row that is evaluated and the label. Every input row of an
/// operator gets its own row id from [BNodeCache::next_row], so two rows never share a blank node,
/// even if they bind the same terms.
#[derive(Debug, Default)]
pub struct BNodeCache {
    next_row: Cell<u64>,
    nodes: RefCell<FxHashMap<(u64, String), BlankNode>>,
}

impl BNodeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a row id that has not been handed out before.
    pub fn next_row(&self) -> u64 {
        let row = self.next_row.get();
        self.next_row.set(row + 1);
        row
    }

    pub fn get_or_create(&self, row: u64, label: &str) -> BlankNode {
        self.nodes
            .borrow_mut()
            .entry((row, label.to_owned()))
            .or_default()
            .clone()
    }
}

/// `BNODE()` and `BNODE(label)` evaluated for a single row.
#[derive(Debug)]
pub struct BNodeSparqlOp<'ctx> {
    cache: &'ctx BNodeCache,
    row: u64,
}

impl<'ctx> BNodeSparqlOp<'ctx> {
    pub fn new(cache: &'ctx BNodeCache, row: u64) -> Self {
        Self { cache, row }
    }
}

impl SparqlOp for BNodeSparqlOp<'_> {
    fn name(&self) -> &str {
        "bnode"
    }
}

impl NullarySparqlOp for BNodeSparqlOp<'_> {
    type Result = BlankNode;

    fn evaluate(&self) -> EvalResult<Self::Result> {
        Ok(BlankNode::default())
    }
}

impl UnarySparqlOp for BNodeSparqlOp<'_> {
    type Arg<'data> = SimpleLiteralRef<'data>;
    type Result<'data> = BlankNode;

    fn evaluate<'data>(&self, value: Self::Arg<'data>) -> EvalResult<Self::Result<'data>> {
        Ok(self.cache.get_or_create(self.row, value.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{evaluate_nullary, evaluate_unary};
    use rdf_algebra_model::{Literal, Term};

    fn label(value: &str) -> Term {
        Literal::new_simple_literal(value).into()
    }

    #[test]
    fn same_label_same_row_is_same_node() {
        let cache = BNodeCache::new();
        let op = BNodeSparqlOp::new(&cache, cache.next_row());
        assert_eq!(evaluate_unary(&op, &label("a")), evaluate_unary(&op, &label("a")));
        assert_ne!(evaluate_unary(&op, &label("a")), evaluate_unary(&op, &label("b")));
    }

    #[test]
    fn different_rows_get_different_nodes() {
        let cache = BNodeCache::new();
        let a = evaluate_unary(&BNodeSparqlOp::new(&cache, cache.next_row()), &label("a"));
        let b = evaluate_unary(&BNodeSparqlOp::new(&cache, cache.next_row()), &label("a"));
        assert_ne!(a, b);
    }

    #[test]
    fn no_argument_is_always_fresh() {
        let cache = BNodeCache::new();
        let op = BNodeSparqlOp::new(&cache, cache.next_row());
        assert_ne!(evaluate_nullary(&op), evaluate_nullary(&op));
    }
}
