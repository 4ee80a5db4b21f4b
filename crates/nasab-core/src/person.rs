//! Person (node) types

use crate::tree::TreeId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::error::Result;
use ulid::Ulid;

/// Unique identifier for a person
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonId(pub Ulid);

impl PersonId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Parse a ULID string; bad input is `Error::InvalidId`
    pub fn from_string(s: &str) -> Result<Self> {
        Ok(Self(Ulid::from_string(s)?))
    }
}

impl Default for PersonId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Also the fallback when a record carries no usable SEX value
    #[default]
    Male,
    Female,
}

impl Gender {
    /// Interpret a GEDCOM `SEX` value: `F` is female, anything else male
    pub fn from_gedcom_sex(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("F") {
            Self::Female
        } else {
            Self::Male
        }
    }

    pub fn gedcom_sex(&self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }
}

/// A person in a family tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    /// Unique identifier
    pub id: PersonId,

    /// Tree this person belongs to
    pub tree_id: TreeId,

    pub given_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    /// Full name in Arabic script, when the source name contains any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name_ar: Option<String>,

    #[serde(default)]
    pub gender: Gender,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date_hijri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_date_hijri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_place: Option<String>,

    #[serde(with = "crate::flag", default = "default_true")]
    pub is_living: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,

    /// "Father/mother of ..." honorific, e.g. أبو محمد
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kunya: Option<String>,

    /// Epithet or title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub laqab: Option<String>,

    /// Origin or affiliation, e.g. الهاشمي
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nisba: Option<String>,

    /// بن/بنت chain as written in the name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patronymic_chain: Option<String>,

    /// Transliterated lineage; written on export, never read back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nasab_chain_en: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tribe: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tribal_branch: Option<String>,

    #[serde(with = "crate::flag", default)]
    pub is_sayyid: bool,

    #[serde(with = "crate::flag", default)]
    pub sayyid_verified: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sayyid_lineage: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Person {
    /// Create a living person with only a given name and gender
    pub fn new(tree_id: TreeId, given_name: impl Into<String>, gender: Gender) -> Self {
        Self {
            id: PersonId::new(),
            tree_id,
            given_name: given_name.into(),
            family_name: None,
            full_name: None,
            full_name_ar: None,
            gender,
            birth_date: None,
            birth_date_hijri: None,
            birth_place: None,
            death_date: None,
            death_date_hijri: None,
            death_place: None,
            is_living: true,
            notes: None,
            photo_url: None,
            kunya: None,
            laqab: None,
            nisba: None,
            patronymic_chain: None,
            nasab_chain_en: None,
            tribe: None,
            tribal_branch: None,
            is_sayyid: false,
            sayyid_verified: false,
            sayyid_lineage: None,
        }
    }

    pub fn with_family_name(mut self, family_name: impl Into<String>) -> Self {
        self.family_name = Some(family_name.into());
        self
    }

    pub fn with_birth_date(mut self, date: NaiveDate) -> Self {
        self.birth_date = Some(date);
        self
    }

    /// Best available name for display
    pub fn display_name(&self) -> String {
        if let Some(full) = self.full_name.as_deref().filter(|s| !s.is_empty()) {
            return full.to_string();
        }
        match self.family_name.as_deref().filter(|s| !s.is_empty()) {
            Some(family) => format!("{} {}", self.given_name, family),
            None => self.given_name.clone(),
        }
    }
}
