//! GEDCOM export
//!
//! Serializes a tree's persons and relationships as GEDCOM 5.5 text with
//! the Arabic extension tags. Export is total: missing optional data is
//! left out, nothing here returns an error.

use crate::date;
use crate::grouping::{group_families, FamilyGroup};
use crate::names::is_arabic_char;
use crate::writer::GedcomWriter;
use chrono::{NaiveDate, Utc};
use nasab_core::{FamilyTree, Person, PersonId, Relationship};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const SOURCE_ID: &str = "NASAB";
const SOURCE_NAME: &str = "Nasab";
const SUBMITTER_ID: &str = "SUBM1";

/// Export switches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportOptions {
    #[serde(default = "default_true")]
    pub include_notes: bool,

    #[serde(default = "default_true")]
    pub include_photos: bool,

    /// Write `_HIJRI` under BIRT, DEAT and MARR when a Hijri date is stored
    #[serde(default = "default_true")]
    pub include_hijri_dates: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitter_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitter_email: Option<String>,

    /// Date stamped into the header and file name (today, UTC, if unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_date: Option<NaiveDate>,
}

fn default_true() -> bool {
    true
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_notes: true,
            include_photos: true,
            include_hijri_dates: true,
            submitter_name: None,
            submitter_email: None,
            export_date: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportStats {
    pub persons_exported: usize,
    pub families_exported: usize,
    /// Relationships whose two endpoints were both exported
    pub relationships_exported: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportResult {
    pub content: String,
    pub filename: String,
    pub stats: ExportStats,
}

/// `{tree name}_{YYYY-MM-DD}.ged`, keeping only ASCII alphanumerics,
/// Arabic letters and underscores in the name
pub fn export_filename(tree_name: &str, date: NaiveDate) -> String {
    let name: String = tree_name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || is_arabic_char(c) {
                c
            } else {
                '_'
            }
        })
        .collect();
    let name = if name.is_empty() {
        "family_tree".to_string()
    } else {
        name
    };
    format!("{}_{}.ged", name, date.format("%Y-%m-%d"))
}

/// Export a tree as GEDCOM text
pub fn export_to_gedcom(
    tree: &FamilyTree,
    persons: &[Person],
    relationships: &[Relationship],
    options: &ExportOptions,
) -> ExportResult {
    let export_date = options
        .export_date
        .unwrap_or_else(|| Utc::now().date_naive());
    let filename = export_filename(&tree.name, export_date);

    let groups = group_families(persons, relationships);
    let pointers: HashMap<&PersonId, String> = persons
        .iter()
        .enumerate()
        .map(|(i, p)| (&p.id, format!("I{}", i + 1)))
        .collect();

    let mut exporter = Exporter {
        w: GedcomWriter::new(),
        options,
        pointers: &pointers,
        groups: &groups,
    };
    exporter.header(tree, export_date, &filename);
    for person in persons {
        exporter.individual(person);
    }
    for (index, group) in groups.iter().enumerate() {
        exporter.family(index, group);
    }
    exporter.w.tag(0, "TRLR");

    let stats = ExportStats {
        persons_exported: persons.len(),
        families_exported: groups.len(),
        relationships_exported: relationships
            .iter()
            .filter(|r| pointers.contains_key(&r.person1_id) && pointers.contains_key(&r.person2_id))
            .count(),
    };
    tracing::info!(
        "Exported tree '{}': {} persons, {} families, {} lines",
        tree.name,
        stats.persons_exported,
        stats.families_exported,
        exporter.w.line_count()
    );

    ExportResult {
        content: exporter.w.finish(),
        filename,
        stats,
    }
}

fn family_pointer(index: usize) -> String {
    format!("F{}", index + 1)
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Y"
    } else {
        "N"
    }
}

struct Exporter<'a> {
    w: GedcomWriter,
    options: &'a ExportOptions,
    pointers: &'a HashMap<&'a PersonId, String>,
    groups: &'a [FamilyGroup],
}

impl Exporter<'_> {
    fn header(&mut self, tree: &FamilyTree, export_date: NaiveDate, filename: &str) {
        let w = &mut self.w;
        w.tag(0, "HEAD");
        w.value(1, "SOUR", SOURCE_ID);
        w.value(2, "NAME", SOURCE_NAME);
        w.value(2, "VERS", env!("CARGO_PKG_VERSION"));
        w.value(1, "DATE", &date::encode(export_date));
        w.value(1, "FILE", filename);
        w.tag(1, "GEDC");
        w.value(2, "VERS", "5.5");
        w.value(2, "FORM", "LINEAGE-LINKED");
        w.value(1, "CHAR", "UTF-8");
        w.value(1, "LANG", "Arabic");
        w.pointer(1, "SUBM", SUBMITTER_ID);

        let submitter = self
            .options
            .submitter_name
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(tree.name.as_str());
        w.record(SUBMITTER_ID, "SUBM");
        w.value(1, "NAME", submitter);
        w.optional(1, "EMAIL", self.options.submitter_email.as_deref());
    }

    /// An event block (`BIRT`, `DEAT`, `MARR`, `DIV`) with its details
    fn event(
        &mut self,
        tag: &str,
        date: Option<NaiveDate>,
        place: Option<&str>,
        hijri: Option<&str>,
        force: bool,
    ) {
        let hijri = hijri.filter(|_| self.options.include_hijri_dates);
        let place = place.filter(|p| !p.trim().is_empty());
        if date.is_none() && place.is_none() && hijri.is_none() {
            if force {
                // GEDCOM's way of asserting an event without details
                self.w.value(1, tag, "Y");
            }
            return;
        }
        self.w.tag(1, tag);
        if let Some(date) = date {
            self.w.value(2, "DATE", &date::encode(date));
        }
        self.w.optional(2, "PLAC", place);
        self.w.optional(2, "_HIJRI", hijri);
    }

    fn name(&mut self, person: &Person) {
        let given = person.given_name.trim();
        let family = person.family_name.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let name = match family {
            Some(family) => format!("{} /{}/", given, family).trim().to_string(),
            None => person
                .full_name
                .as_deref()
                .or(person.full_name_ar.as_deref())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(given)
                .to_string(),
        };

        let w = &mut self.w;
        w.value(1, "NAME", &name);
        w.optional(2, "GIVN", Some(given));
        w.optional(2, "SURN", family);
        w.optional(2, "_KUNYA", person.kunya.as_deref());
        w.optional(2, "_LAQAB", person.laqab.as_deref());
        w.optional(2, "_NISBA", person.nisba.as_deref());
        w.optional(2, "_NASAB", person.patronymic_chain.as_deref());
        w.optional(2, "_NASAB_FULL", person.nasab_chain_en.as_deref());
    }

    fn individual(&mut self, person: &Person) {
        let Some(pointer) = self.pointers.get(&person.id) else {
            return;
        };
        self.w.record(pointer, "INDI");
        self.name(person);
        self.w.value(1, "SEX", person.gender.gedcom_sex());

        self.event(
            "BIRT",
            person.birth_date,
            person.birth_place.as_deref(),
            person.birth_date_hijri.as_deref(),
            false,
        );
        self.event(
            "DEAT",
            person.death_date,
            person.death_place.as_deref(),
            person.death_date_hijri.as_deref(),
            !person.is_living,
        );

        self.w.optional(1, "_TRIBE", person.tribe.as_deref());
        self.w.optional(1, "_TRIBAL_BRANCH", person.tribal_branch.as_deref());
        if person.is_sayyid {
            self.w.value(1, "_SAYYID", "Y");
            self.w.value(2, "_VERIFIED", yes_no(person.sayyid_verified));
            self.w.optional(2, "_LINEAGE", person.sayyid_lineage.as_deref());
        }

        if self.options.include_notes {
            if let Some(notes) = person.notes.as_deref().filter(|n| !n.trim().is_empty()) {
                self.w.text(1, "NOTE", notes);
            }
        }

        if self.options.include_photos {
            if let Some(url) = person.photo_url.as_deref().filter(|u| !u.trim().is_empty()) {
                self.w.tag(1, "OBJE");
                self.w.value(2, "FORM", "URL");
                self.w.value(2, "FILE", url);
            }
        }

        for (index, group) in self.groups.iter().enumerate() {
            if group.is_spouse(&person.id) {
                self.w.pointer(1, "FAMS", &family_pointer(index));
            }
        }
        for (index, group) in self.groups.iter().enumerate() {
            if group.has_child(&person.id) {
                self.w.pointer(1, "FAMC", &family_pointer(index));
            }
        }
    }

    fn family(&mut self, index: usize, group: &FamilyGroup) {
        let pointers = self.pointers;
        self.w.record(&family_pointer(index), "FAM");
        if let Some(husband) = group.husband_id.as_ref().and_then(|id| pointers.get(id)) {
            self.w.pointer(1, "HUSB", husband);
        }
        if let Some(wife) = group.wife_id.as_ref().and_then(|id| pointers.get(id)) {
            self.w.pointer(1, "WIFE", wife);
        }
        self.event(
            "MARR",
            group.marriage_date,
            group.marriage_place.as_deref(),
            group.marriage_date_hijri.as_deref(),
            false,
        );
        self.event(
            "DIV",
            group.divorce_date,
            None,
            group.divorce_date_hijri.as_deref(),
            false,
        );
        for child in group.child_ids.iter().filter_map(|id| pointers.get(id)) {
            self.w.pointer(1, "CHIL", child);
        }
    }
}
