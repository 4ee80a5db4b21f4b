//! Family tree (namespace) types

use serde::{Deserialize, Serialize};
use crate::error::Result;
use ulid::Ulid;

/// Unique identifier for a family tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TreeId(pub Ulid);

impl TreeId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Parse a ULID string; bad input is `Error::InvalidId`
    pub fn from_string(s: &str) -> Result<Self> {
        Ok(Self(Ulid::from_string(s)?))
    }
}

impl Default for TreeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TreeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A family tree: the namespace every person and relationship belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyTree {
    /// Unique identifier
    pub id: TreeId,

    /// Human-readable tree name (used for export file names)
    pub name: String,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FamilyTree {
    /// Create a new tree
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TreeId::new(),
            name: name.into(),
            description: None,
        }
    }

    /// Create tree with description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
