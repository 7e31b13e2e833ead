use crate::index::EncodedQuad;
use crate::memory::object_id::{ObjectId, DEFAULT_GRAPH_ID};
use rdf_algebra_engine::StorageError;
use rdf_algebra_model::{
    subject_to_term, term_to_subject, GraphName, NamedNode, Quad, Term, Triple,
};
use rustc_hash::FxHashMap;
use thiserror::Error;

/// An error of the [ObjectIdMapping].
#[derive(Debug, Error)]
pub enum ObjectIdMappingError {
    #[error("The object id {0} is unknown")]
    UnknownObjectId(ObjectId),
    #[error("The object id {0} does not refer to a term of this position")]
    UnexpectedTerm(ObjectId),
    #[error("All object ids are in use")]
    Exhausted,
}

impl From<ObjectIdMappingError> for StorageError {
    fn from(error: ObjectIdMappingError) -> Self {
        StorageError::Other(Box::new(error))
    }
}

/// Maintains a mapping between RDF terms and object IDs in memory.
///
/// # Object IDs
///
/// The object ID is a 32-bit unsigned integer used to uniquely identify RDF terms. We simply use
/// a counter to allocate new object IDs. Terms stay interned until the mapping is cleared.
#[derive(Debug)]
pub struct ObjectIdMapping {
    /// Contains the next free object id.
    next_id: ObjectId,
    id2term: FxHashMap<ObjectId, Term>,
    term2id: FxHashMap<Term, ObjectId>,
}

impl Default for ObjectIdMapping {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectIdMapping {
    /// Creates a new empty [ObjectIdMapping].
    pub fn new() -> Self {
        Self {
            next_id: first_id(),
            id2term: FxHashMap::default(),
            term2id: FxHashMap::default(),
        }
    }

    /// Returns the object id of `term`, allocating a new one if the term is not yet known.
    pub fn encode_term(&mut self, term: &Term) -> Result<ObjectId, ObjectIdMappingError> {
        if let Some(id) = self.term2id.get(term) {
            return Ok(*id);
        }

        let id = self.next_id;
        self.next_id = id.next().ok_or(ObjectIdMappingError::Exhausted)?;
        self.term2id.insert(term.clone(), id);
        self.id2term.insert(id, term.clone());
        Ok(id)
    }

    /// Returns the object id of `term` without allocating one.
    pub fn try_encode_term(&self, term: &Term) -> Option<ObjectId> {
        self.term2id.get(term).copied()
    }

    pub fn encode_graph_name(
        &mut self,
        graph_name: &GraphName,
    ) -> Result<ObjectId, ObjectIdMappingError> {
        match graph_name {
            GraphName::NamedNode(node) => self.encode_term(&node.clone().into()),
            GraphName::BlankNode(node) => self.encode_term(&node.clone().into()),
            GraphName::DefaultGraph => Ok(DEFAULT_GRAPH_ID),
        }
    }

    pub fn try_encode_graph_name(&self, graph_name: &GraphName) -> Option<ObjectId> {
        match graph_name {
            GraphName::NamedNode(node) => self.try_encode_term(&node.clone().into()),
            GraphName::BlankNode(node) => self.try_encode_term(&node.clone().into()),
            GraphName::DefaultGraph => Some(DEFAULT_GRAPH_ID),
        }
    }

    /// Encodes the entire `quad`.
    pub fn encode_quad(&mut self, quad: &Quad) -> Result<EncodedQuad, ObjectIdMappingError> {
        Ok(EncodedQuad {
            graph_name: self.encode_graph_name(&quad.graph_name)?,
            subject: self.encode_term(&subject_to_term(&quad.subject))?,
            predicate: self.encode_term(&quad.predicate.clone().into())?,
            object: self.encode_term(&quad.object)?,
        })
    }

    /// Encodes `quad` if all of its terms are known.
    pub fn try_encode_quad(&self, quad: &Quad) -> Option<EncodedQuad> {
        Some(EncodedQuad {
            graph_name: self.try_encode_graph_name(&quad.graph_name)?,
            subject: self.try_encode_term(&subject_to_term(&quad.subject))?,
            predicate: self.try_encode_term(&quad.predicate.clone().into())?,
            object: self.try_encode_term(&quad.object)?,
        })
    }

    /// Decodes the given `object_id`.
    ///
    /// # Error
    ///
    /// Returns an error if the object id is unknown.
    pub fn decode_term(&self, object_id: ObjectId) -> Result<&Term, ObjectIdMappingError> {
        self.id2term
            .get(&object_id)
            .ok_or(ObjectIdMappingError::UnknownObjectId(object_id))
    }

    pub fn decode_named_node(&self, object_id: ObjectId) -> Result<NamedNode, ObjectIdMappingError> {
        match self.decode_term(object_id)? {
            Term::NamedNode(node) => Ok(node.clone()),
            _ => Err(ObjectIdMappingError::UnexpectedTerm(object_id)),
        }
    }

    /// Decodes the triple of `quad`, ignoring its graph name.
    pub fn decode_triple(&self, quad: &EncodedQuad) -> Result<Triple, ObjectIdMappingError> {
        let subject = term_to_subject(self.decode_term(quad.subject)?.clone())
            .ok_or(ObjectIdMappingError::UnexpectedTerm(quad.subject))?;
        Ok(Triple::new(
            subject,
            self.decode_named_node(quad.predicate)?,
            self.decode_term(quad.object)?.clone(),
        ))
    }

    pub fn decode_graph_name(&self, object_id: ObjectId) -> Result<GraphName, ObjectIdMappingError> {
        if object_id == DEFAULT_GRAPH_ID {
            return Ok(GraphName::DefaultGraph);
        }
        match self.decode_term(object_id)? {
            Term::NamedNode(node) => Ok(GraphName::NamedNode(node.clone())),
            Term::BlankNode(node) => Ok(GraphName::BlankNode(node.clone())),
            _ => Err(ObjectIdMappingError::UnexpectedTerm(object_id)),
        }
    }

    pub fn clear(&mut self) {
        self.next_id = first_id();
        self.id2term.clear();
        self.term2id.clear();
    }
}

/// Ids start after the [DEFAULT_GRAPH_ID].
fn first_id() -> ObjectId {
    ObjectId::from(DEFAULT_GRAPH_ID.as_u32() + 1)
}
