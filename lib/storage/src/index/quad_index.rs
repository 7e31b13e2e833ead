use crate::index::{EncodedQuad, IndexComponents, IndexQuad, IndexScanInstructions};
use crate::memory::ObjectId;
use std::collections::BTreeSet;

/// Represents a single sorted quad index with a given ordering of its components.
///
/// A scan looks up the range of entries that share the longest prefix of bound components and
/// filters the remaining bound components of each entry.
#[derive(Debug)]
pub struct QuadIndex {
    components: IndexComponents,
    quads: BTreeSet<IndexQuad>,
}

impl QuadIndex {
    pub fn new(components: IndexComponents) -> Self {
        Self {
            components,
            quads: BTreeSet::new(),
        }
    }

    /// Returns the components of the index.
    pub fn components(&self) -> IndexComponents {
        self.components
    }

    /// Returns the total number of quads.
    pub fn len(&self) -> usize {
        self.quads.len()
    }

    pub fn contains(&self, quad: &EncodedQuad) -> bool {
        self.quads.contains(&quad.for_index(self.components))
    }

    /// Inserts a quad. Returns false if the quad already exists in the index.
    pub fn insert(&mut self, quad: &EncodedQuad) -> bool {
        self.quads.insert(quad.for_index(self.components))
    }

    /// Removes a quad. Returns false if the quad does not exist in the index.
    pub fn remove(&mut self, quad: &EncodedQuad) -> bool {
        self.quads.remove(&quad.for_index(self.components))
    }

    pub fn clear(&mut self) {
        self.quads.clear();
    }

    /// Returns the quads that match `instructions`, sorted by the order of this index.
    pub fn scan(
        &self,
        instructions: IndexScanInstructions,
    ) -> impl Iterator<Item = EncodedQuad> + '_ {
        let pattern = instructions.reorder(self.components);
        let mut lower = [ObjectId::MIN; 4];
        let mut upper = [ObjectId::MAX; 4];
        for (position, term) in pattern.iter().map_while(|term| *term).enumerate() {
            lower[position] = term;
            upper[position] = term;
        }

        let components = self.components;
        self.quads
            .range(IndexQuad(lower)..=IndexQuad(upper))
            .filter(move |quad| quad.matches(&pattern))
            .map(move |quad| EncodedQuad::from_index(quad, components))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad(subject: u32, predicate: u32, object: u32) -> EncodedQuad {
        EncodedQuad {
            graph_name: ObjectId::from(0),
            subject: ObjectId::from(subject),
            predicate: ObjectId::from(predicate),
            object: ObjectId::from(object),
        }
    }

    #[test]
    fn scan_prefix_range() {
        let mut index = QuadIndex::new(IndexComponents::GPOS);
        for (subject, predicate, object) in [(1, 2, 3), (4, 2, 3), (1, 5, 3), (1, 2, 6)] {
            index.insert(&quad(subject, predicate, object));
        }

        let instructions = IndexScanInstructions([
            Some(ObjectId::from(0)),
            None,
            Some(ObjectId::from(2)),
            Some(ObjectId::from(3)),
        ]);
        let result = index.scan(instructions).collect::<Vec<_>>();
        assert_eq!(result, vec![quad(1, 2, 3), quad(4, 2, 3)]);
    }

    #[test]
    fn insert_and_remove() {
        let mut index = QuadIndex::new(IndexComponents::GSPO);
        assert!(index.insert(&quad(1, 2, 3)));
        assert!(!index.insert(&quad(1, 2, 3)));
        assert!(index.contains(&quad(1, 2, 3)));
        assert!(index.remove(&quad(1, 2, 3)));
        assert!(!index.remove(&quad(1, 2, 3)));
        assert_eq!(index.len(), 0);
    }
}
