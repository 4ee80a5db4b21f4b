//! Nasab Core - Family tree model
//!
//! This crate provides the person/relationship graph that the GEDCOM
//! engine imports into and exports from, along with the Hijri calendar
//! seam and the 0/1 flag codec used by the persistence layer.

pub mod error;
pub mod flag;
pub mod graph;
pub mod hijri;
pub mod person;
pub mod relationship;
pub mod tree;

pub use error::{Error, Result};
pub use graph::FamilyGraph;
pub use hijri::{HijriConverter, HijriDate, TabularHijri};
pub use person::{Gender, Person, PersonId};
pub use relationship::{Relationship, RelationshipId, RelationshipType};
pub use tree::{FamilyTree, TreeId};
