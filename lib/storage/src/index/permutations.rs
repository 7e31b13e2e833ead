use crate::index::{IndexComponent, IndexComponents, QuadIndex};
use crate::memory::{ObjectId, DEFAULT_GRAPH_ID};
use std::collections::BTreeSet;
use tracing::trace;

/// Represents a quad with encoded terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncodedQuad {
    /// The graph name.
    pub graph_name: ObjectId,
    /// The subject.
    pub subject: ObjectId,
    /// The predicate.
    pub predicate: ObjectId,
    /// The object.
    pub object: ObjectId,
}

impl EncodedQuad {
    /// Creates a new [IndexQuad] for an index with the given `components`.
    pub fn for_index(&self, components: IndexComponents) -> IndexQuad {
        IndexQuad((*components.inner()).map(|component| self.component(component)))
    }

    /// Restores the quad from an entry of an index with the given `components`.
    pub fn from_index(quad: &IndexQuad, components: IndexComponents) -> Self {
        let mut gspo = [DEFAULT_GRAPH_ID; 4];
        for (term, component) in quad.0.iter().zip(components.inner()) {
            gspo[component.gspo_index()] = *term;
        }
        let [graph_name, subject, predicate, object] = gspo;
        Self {
            graph_name,
            subject,
            predicate,
            object,
        }
    }

    fn component(&self, component: IndexComponent) -> ObjectId {
        match component {
            IndexComponent::GraphName => self.graph_name,
            IndexComponent::Subject => self.subject,
            IndexComponent::Predicate => self.predicate,
            IndexComponent::Object => self.object,
        }
    }
}

/// A quad that is sorted for some index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndexQuad(pub [ObjectId; 4]);

impl IndexQuad {
    /// Returns true if every bound component of `pattern` is equal to the component of the quad.
    pub fn matches(&self, pattern: &[Option<ObjectId>; 4]) -> bool {
        pattern
            .iter()
            .zip(&self.0)
            .all(|(expected, term)| expected.iter().all(|expected| expected == term))
    }
}

/// The components that a scan fixes, given in GSPO order. [None] matches any term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexScanInstructions(pub [Option<ObjectId>; 4]);

impl IndexScanInstructions {
    /// Reorders the instructions to the given `components`.
    pub fn reorder(&self, components: IndexComponents) -> [Option<ObjectId>; 4] {
        (*components.inner()).map(|component| self.0[component.gspo_index()])
    }
}

/// Represents a set of multiple indexes, each of which indexes a different ordering of the
/// quad components (e.g., GSPO, GPOS). This is necessary as different triple patterns require
/// different index structures.
///
/// For example, the pattern `<S> <P> ?o` can be best served by having an SPO index. The scan
/// looks up the range of `<S> <P>` and binds the remaining entries to `?o`. However, the pattern
/// `?s <P> <O>` cannot be efficiently evaluated with an SPO index. For this pattern, the store
/// uses the POS index.
#[derive(Debug)]
pub struct IndexPermutations {
    /// The named graphs. A named graph may exist without any associated quads.
    named_graphs: BTreeSet<ObjectId>,
    /// The index variations. The first index is the GSPO index.
    indexes: [QuadIndex; 3],
}

impl Default for IndexPermutations {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexPermutations {
    /// Creates a new empty [IndexPermutations].
    pub fn new() -> Self {
        Self {
            named_graphs: BTreeSet::new(),
            indexes: [
                QuadIndex::new(IndexComponents::GSPO),
                QuadIndex::new(IndexComponents::GPOS),
                QuadIndex::new(IndexComponents::GOSP),
            ],
        }
    }

    /// Chooses the index with the highest scan score for `instructions`. On equal scores, the
    /// GSPO index is preferred.
    pub fn choose_index(&self, instructions: &IndexScanInstructions) -> &QuadIndex {
        let [gspo, others @ ..] = &self.indexes;
        others.iter().fold(gspo, |best, index| {
            if compute_scan_score(index.components(), instructions)
                > compute_scan_score(best.components(), instructions)
            {
                index
            } else {
                best
            }
        })
    }

    /// Returns all quads that match `instructions`.
    pub fn scan(
        &self,
        instructions: IndexScanInstructions,
    ) -> impl Iterator<Item = EncodedQuad> + '_ {
        let index = self.choose_index(&instructions);
        trace!(index = %index.components(), "Scanning index");
        index.scan(instructions)
    }

    pub fn len(&self) -> usize {
        self.indexes[0].len()
    }

    pub fn contains(&self, quad: &EncodedQuad) -> bool {
        self.indexes[0].contains(quad)
    }

    /// Inserts `quad` into all indexes and registers its graph. Returns true if the quad was not
    /// yet contained.
    pub fn insert(&mut self, quad: &EncodedQuad) -> bool {
        if quad.graph_name != DEFAULT_GRAPH_ID {
            self.named_graphs.insert(quad.graph_name);
        }
        let mut inserted = false;
        for index in &mut self.indexes {
            inserted = index.insert(quad);
        }
        inserted
    }

    /// Removes `quad` from all indexes. Its graph stays registered.
    pub fn remove(&mut self, quad: &EncodedQuad) -> bool {
        let mut removed = false;
        for index in &mut self.indexes {
            removed = index.remove(quad);
        }
        removed
    }

    pub fn insert_named_graph(&mut self, graph_name: ObjectId) -> bool {
        self.named_graphs.insert(graph_name)
    }

    pub fn named_graphs(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.named_graphs.iter().copied()
    }

    pub fn contains_named_graph(&self, graph_name: ObjectId) -> bool {
        self.named_graphs.contains(&graph_name)
    }

    pub fn clear(&mut self) {
        self.named_graphs.clear();
        for index in &mut self.indexes {
            index.clear();
        }
    }
}

/// Computes the "scan score" for the given `components` and `instructions`.
///
/// The higher the scan score, the better is the index suited for scanning a particular pattern.
/// This boils down to how many leading levels of the index are fixed by the instructions:
///
/// - 1000: The index hits on the first level
/// - 100: The index hits on the second level
/// - 10: The index hits on the third level
/// - 1: The index hits on the fourth level
fn compute_scan_score(components: IndexComponents, instructions: &IndexScanInstructions) -> usize {
    instructions
        .reorder(components)
        .into_iter()
        .zip([1000, 100, 10, 1])
        .map_while(|(term, reward)| term.map(|_| reward))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad(graph_name: u32, subject: u32, predicate: u32, object: u32) -> EncodedQuad {
        EncodedQuad {
            graph_name: ObjectId::from(graph_name),
            subject: ObjectId::from(subject),
            predicate: ObjectId::from(predicate),
            object: ObjectId::from(object),
        }
    }

    fn instructions(pattern: [Option<u32>; 4]) -> IndexScanInstructions {
        IndexScanInstructions(pattern.map(|term| term.map(ObjectId::from)))
    }

    #[test]
    fn index_quad_round_trips_through_components() {
        let quad = quad(0, 1, 2, 3);
        let index_quad = quad.for_index(IndexComponents::GOSP);
        assert_eq!(
            index_quad.0.map(|id| id.as_u32()),
            [0, 3, 1, 2]
        );
        assert_eq!(
            EncodedQuad::from_index(&index_quad, IndexComponents::GOSP),
            quad
        );
    }

    #[test]
    fn choose_index_by_bound_prefix() {
        let permutations = IndexPermutations::new();
        let choose = |pattern| {
            permutations
                .choose_index(&instructions(pattern))
                .components()
        };
        assert_eq!(choose([Some(0), Some(1), None, None]), IndexComponents::GSPO);
        assert_eq!(choose([Some(0), None, Some(2), Some(3)]), IndexComponents::GPOS);
        assert_eq!(choose([Some(0), None, None, Some(3)]), IndexComponents::GOSP);
        assert_eq!(choose([Some(0), None, None, None]), IndexComponents::GSPO);
    }

    #[test]
    fn insert_registers_named_graphs() {
        let mut permutations = IndexPermutations::new();
        assert!(permutations.insert(&quad(5, 1, 2, 3)));
        assert!(!permutations.insert(&quad(5, 1, 2, 3)));
        assert!(permutations.insert(&quad(0, 1, 2, 3)));
        assert_eq!(permutations.len(), 2);
        assert_eq!(
            permutations.named_graphs().collect::<Vec<_>>(),
            vec![ObjectId::from(5)]
        );

        assert!(permutations.remove(&quad(5, 1, 2, 3)));
        assert!(permutations.contains_named_graph(ObjectId::from(5)));
        assert_eq!(permutations.len(), 1);
    }

    #[test]
    fn scan_filters_unbound_gaps() {
        let mut permutations = IndexPermutations::new();
        permutations.insert(&quad(0, 1, 2, 3));
        permutations.insert(&quad(0, 1, 4, 3));
        permutations.insert(&quad(0, 1, 2, 5));
        permutations.insert(&quad(6, 1, 2, 3));

        let result = permutations
            .scan(instructions([Some(0), Some(1), None, Some(3)]))
            .collect::<Vec<_>>();
        assert_eq!(result, vec![quad(0, 1, 2, 3), quad(0, 1, 4, 3)]);
    }
}
