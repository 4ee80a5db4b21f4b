//! Relationship (edge) types

use crate::person::PersonId;
use crate::tree::TreeId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique identifier for a relationship
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationshipId(pub Ulid);

impl RelationshipId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for RelationshipId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RelationshipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of edge between two persons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipType {
    /// Directed: `person1_id` is the parent, `person2_id` the child
    Parent,
    /// Unordered; by convention `person1_id` is the husband
    Spouse,
}

/// A relationship between two persons of the same tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    /// Unique identifier
    pub id: RelationshipId,

    /// Tree this relationship belongs to
    pub tree_id: TreeId,

    pub person1_id: PersonId,

    pub person2_id: PersonId,

    pub relationship_type: RelationshipType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marriage_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marriage_date_hijri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marriage_place: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub divorce_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub divorce_date_hijri: Option<String>,
}

impl Relationship {
    fn new(
        tree_id: TreeId,
        person1_id: PersonId,
        person2_id: PersonId,
        relationship_type: RelationshipType,
    ) -> Self {
        Self {
            id: RelationshipId::new(),
            tree_id,
            person1_id,
            person2_id,
            relationship_type,
            marriage_date: None,
            marriage_date_hijri: None,
            marriage_place: None,
            divorce_date: None,
            divorce_date_hijri: None,
        }
    }

    /// Create a parent → child relationship
    pub fn parent(tree_id: TreeId, parent: PersonId, child: PersonId) -> Self {
        Self::new(tree_id, parent, child, RelationshipType::Parent)
    }

    /// Create a spouse relationship
    pub fn spouse(tree_id: TreeId, husband: PersonId, wife: PersonId) -> Self {
        Self::new(tree_id, husband, wife, RelationshipType::Spouse)
    }

    pub fn with_marriage_date(mut self, date: NaiveDate) -> Self {
        self.marriage_date = Some(date);
        self
    }

    pub fn is_parent(&self) -> bool {
        self.relationship_type == RelationshipType::Parent
    }

    pub fn is_spouse(&self) -> bool {
        self.relationship_type == RelationshipType::Spouse
    }

    /// Whether `id` is either endpoint of this relationship
    pub fn involves(&self, id: &PersonId) -> bool {
        self.person1_id == *id || self.person2_id == *id
    }
}
