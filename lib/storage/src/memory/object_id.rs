use std::fmt::{Debug, Display, Formatter};

/// The object id represents an interned RDF term in the in-memory store.
///
/// # Default Graph
///
/// The default graph is represented by the [DEFAULT_GRAPH_ID]. Terms are never assigned this id.
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
pub struct ObjectId(u32);

impl ObjectId {
    pub const MIN: ObjectId = ObjectId(0);
    pub const MAX: ObjectId = ObjectId(u32::MAX);

    pub fn as_u32(self) -> u32 {
        self.0
    }

    pub fn next(self) -> Option<ObjectId> {
        self.0.checked_add(1).map(ObjectId)
    }
}

impl From<u32> for ObjectId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl Display for ObjectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The id of the default graph.
pub const DEFAULT_GRAPH_ID: ObjectId = ObjectId::MIN;
