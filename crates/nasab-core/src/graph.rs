//! Family graph snapshot

use crate::error::{Error, Result};
use crate::person::{Person, PersonId};
use crate::relationship::Relationship;
use crate::tree::FamilyTree;
use serde::{Deserialize, Serialize};

/// A tree together with its persons and relationships
///
/// This is the JSON document the CLI exchanges with the persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyGraph {
    pub tree: FamilyTree,
    #[serde(default)]
    pub persons: Vec<Person>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl FamilyGraph {
    pub fn new(tree: FamilyTree) -> Self {
        Self {
            tree,
            persons: Vec::new(),
            relationships: Vec::new(),
        }
    }

    pub fn with_persons(mut self, persons: Vec<Person>) -> Self {
        self.persons = persons;
        self
    }

    pub fn with_relationships(mut self, relationships: Vec<Relationship>) -> Self {
        self.relationships = relationships;
        self
    }

    pub fn person(&self, id: &PersonId) -> Result<&Person> {
        self.persons
            .iter()
            .find(|p| p.id == *id)
            .ok_or_else(|| Error::PersonNotFound(id.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let graph: Self = serde_json::from_str(json)?;
        tracing::debug!(
            "Loaded tree '{}': {} persons, {} relationships",
            graph.tree.name,
            graph.persons.len(),
            graph.relationships.len()
        );
        Ok(graph)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
