//! Import diagnostics
//!
//! Neither kind aborts a parse: syntax errors drop the offending line,
//! warnings drop the link that could not be resolved.

use serde::Serialize;
use thiserror::Error;

/// A line that does not match `LEVEL [@POINTER@] TAG [VALUE]`
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("Line {line}: invalid GEDCOM line: {content}")]
pub struct SyntaxError {
    /// 1-based line number in the source file
    pub line: usize,
    pub content: String,
}

/// Which spouse slot of a FAM record a pointer came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpouseRole {
    Husband,
    Wife,
}

impl std::fmt::Display for SpouseRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Husband => write!(f, "HUSB"),
            Self::Wife => write!(f, "WIFE"),
        }
    }
}

/// Which family link of an INDI record a pointer came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilyLink {
    Child,
    Spouse,
}

impl std::fmt::Display for FamilyLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Child => write!(f, "FAMC"),
            Self::Spouse => write!(f, "FAMS"),
        }
    }
}

/// A cross-reference that never resolved
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImportWarning {
    #[error("Family @{family}@ {role} references unknown individual @{individual}@")]
    UnknownSpouse {
        family: String,
        individual: String,
        role: SpouseRole,
    },

    #[error("Family @{family}@ CHIL references unknown individual @{individual}@")]
    UnknownChild { family: String, individual: String },

    #[error("Individual @{individual}@ {link} references unknown family @{family}@")]
    UnknownFamily {
        individual: String,
        family: String,
        link: FamilyLink,
    },

    #[error("Duplicate individual @{gedcom_id}@, the later record wins")]
    DuplicateIndividual { gedcom_id: String },
}
