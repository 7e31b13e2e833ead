use std::fmt::{Display, Formatter};

/// The order in which the positions of a quad are stored in one permutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexComponents([IndexComponent; 4]);

impl IndexComponents {
    pub const GSPO: IndexComponents = IndexComponents::graph_first([
        IndexComponent::Subject,
        IndexComponent::Predicate,
        IndexComponent::Object,
    ]);
    pub const GPOS: IndexComponents = IndexComponents::graph_first([
        IndexComponent::Predicate,
        IndexComponent::Object,
        IndexComponent::Subject,
    ]);
    pub const GOSP: IndexComponents = IndexComponents::graph_first([
        IndexComponent::Object,
        IndexComponent::Subject,
        IndexComponent::Predicate,
    ]);

    /// Every permutation starts with the graph name, as every scan is restricted to one graph.
    const fn graph_first([first, second, third]: [IndexComponent; 3]) -> Self {
        Self([IndexComponent::GraphName, first, second, third])
    }

    pub fn inner(&self) -> &[IndexComponent; 4] {
        &self.0
    }
}

impl Display for IndexComponents {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.iter().try_for_each(|component| component.fmt(f))
    }
}

/// A position of a quad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IndexComponent {
    GraphName,
    Subject,
    Predicate,
    Object,
}

impl IndexComponent {
    /// Returns the offset of this position in a GSPO quad.
    pub fn gspo_index(self) -> usize {
        match self {
            IndexComponent::GraphName => 0,
            IndexComponent::Subject => 1,
            IndexComponent::Predicate => 2,
            IndexComponent::Object => 3,
        }
    }

    fn symbol(self) -> char {
        match self {
            IndexComponent::GraphName => 'G',
            IndexComponent::Subject => 'S',
            IndexComponent::Predicate => 'P',
            IndexComponent::Object => 'O',
        }
    }
}

impl Display for IndexComponent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_components() {
        assert_eq!(IndexComponents::GSPO.to_string(), "GSPO");
        assert_eq!(IndexComponents::GPOS.to_string(), "GPOS");
        assert_eq!(IndexComponents::GOSP.to_string(), "GOSP");
    }

    #[test]
    fn gspo_index_follows_gspo_order() {
        let offsets = IndexComponents::GSPO
            .inner()
            .map(IndexComponent::gspo_index);
        assert_eq!(offsets, [0, 1, 2, 3]);
    }
}
