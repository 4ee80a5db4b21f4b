//! GEDCOM import
//!
//! `parse_gedcom` runs the whole pipeline: tokenize → assemble records →
//! parse INDI/FAM → map to persons and relationships. It never fails;
//! problems are reported in `errors` (syntax) and `warnings` (links).

use crate::error::{FamilyLink, ImportWarning, SpouseRole, SyntaxError};
use crate::family::{parse_family, GedcomFamily};
use crate::individual::{non_empty, parse_individual, GedcomIndividual};
use crate::line::tokenize;
use crate::names::{contains_arabic, extract_arabic_name_parts};
use crate::record::{assemble, RecordKind};
use chrono::NaiveDate;
use nasab_core::{HijriConverter, Person, PersonId, Relationship, TabularHijri, TreeId};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Counters reported alongside an import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    pub total_lines: usize,
    pub individuals_found: usize,
    pub families_found: usize,
    pub persons_created: usize,
    pub relationships_created: usize,
}

/// Everything an import produces
#[derive(Debug, Clone, Serialize)]
pub struct ParseResult {
    pub individuals: Vec<GedcomIndividual>,
    pub families: Vec<GedcomFamily>,
    pub persons: Vec<Person>,
    pub relationships: Vec<Relationship>,
    pub errors: Vec<SyntaxError>,
    pub warnings: Vec<ImportWarning>,
    pub stats: ParseStats,
}

impl ParseResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parse a GEDCOM file into persons and relationships of `tree_id`,
/// mirroring dates with the tabular Hijri calendar
pub fn parse_gedcom(content: &str, tree_id: &TreeId) -> ParseResult {
    parse_gedcom_with(content, tree_id, &TabularHijri)
}

/// Same as [`parse_gedcom`] with a caller-supplied Hijri converter
pub fn parse_gedcom_with(
    content: &str,
    tree_id: &TreeId,
    hijri: &dyn HijriConverter,
) -> ParseResult {
    let tokenized = tokenize(content);
    let records = assemble(tokenized.lines);

    let mut individuals = Vec::new();
    let mut families = Vec::new();
    for record in &records {
        match record.kind {
            RecordKind::Individual => individuals.push(parse_individual(record)),
            RecordKind::Family => families.push(parse_family(record)),
            RecordKind::Other(_) => {}
        }
    }
    tracing::debug!(
        "Assembled {} records: {} individuals, {} families",
        records.len(),
        individuals.len(),
        families.len()
    );

    let mut mapper = ImportMapper::new(tree_id.clone(), hijri);
    let mapped = mapper.map(&individuals, &families);

    for warning in &mapped.warnings {
        tracing::warn!("{}", warning);
    }

    let stats = ParseStats {
        total_lines: tokenized.total_lines,
        individuals_found: individuals.len(),
        families_found: families.len(),
        persons_created: mapped.persons.len(),
        relationships_created: mapped.relationships.len(),
    };
    tracing::info!(
        "Imported {} persons and {} relationships ({} errors, {} warnings)",
        stats.persons_created,
        stats.relationships_created,
        tokenized.errors.len(),
        mapped.warnings.len()
    );

    ParseResult {
        individuals,
        families,
        persons: mapped.persons,
        relationships: mapped.relationships,
        errors: tokenized.errors,
        warnings: mapped.warnings,
        stats,
    }
}

/// Output of [`ImportMapper::map`]
#[derive(Debug, Default)]
pub struct MappedTree {
    pub persons: Vec<Person>,
    pub relationships: Vec<Relationship>,
    pub warnings: Vec<ImportWarning>,
}

/// Resolves GEDCOM cross-references into person ids and builds the
/// person/relationship graph
pub struct ImportMapper<'a> {
    tree_id: TreeId,
    hijri: &'a dyn HijriConverter,
    /// GEDCOM pointer → person id, filled before any relationship is built
    index: HashMap<String, PersonId>,
    warnings: Vec<ImportWarning>,
}

impl<'a> ImportMapper<'a> {
    pub fn new(tree_id: TreeId, hijri: &'a dyn HijriConverter) -> Self {
        Self {
            tree_id,
            hijri,
            index: HashMap::new(),
            warnings: Vec::new(),
        }
    }

    pub fn map(&mut self, individuals: &[GedcomIndividual], families: &[GedcomFamily]) -> MappedTree {
        self.index.clear();
        self.warnings.clear();

        for individual in individuals {
            if individual.gedcom_id.is_empty() {
                continue;
            }
            let previous = self
                .index
                .insert(individual.gedcom_id.clone(), individual.id.clone());
            if previous.is_some() {
                self.warnings.push(ImportWarning::DuplicateIndividual {
                    gedcom_id: individual.gedcom_id.clone(),
                });
            }
        }

        let persons: Vec<Person> = individuals.iter().map(|i| self.map_person(i)).collect();

        self.check_family_links(individuals, families);

        let mut relationships = Vec::new();
        for family in families {
            self.map_family(family, &mut relationships);
        }

        MappedTree {
            persons,
            relationships,
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    fn hijri_of(&self, date: Option<NaiveDate>, stored: &Option<String>) -> Option<String> {
        date.and_then(|d| self.hijri.to_hijri(d))
            .map(|h| h.to_string())
            .or_else(|| stored.clone())
    }

    fn map_person(&self, individual: &GedcomIndividual) -> Person {
        let given_name = non_empty(&individual.given_name)
            .or_else(|| non_empty(&individual.full_name))
            .unwrap_or_else(|| "Unknown".to_string());

        let mut person = Person::new(self.tree_id.clone(), given_name, individual.gender);
        person.id = individual.id.clone();
        person.family_name = non_empty(&individual.surname);
        person.full_name = non_empty(&individual.full_name);

        person.birth_date = individual.birth_date;
        person.birth_date_hijri = self.hijri_of(individual.birth_date, &individual.birth_date_hijri);
        person.birth_place = individual.birth_place.clone();
        person.death_date = individual.death_date;
        person.death_date_hijri = self.hijri_of(individual.death_date, &individual.death_date_hijri);
        person.death_place = individual.death_place.clone();
        person.is_living = individual.is_living;

        person.notes = individual.notes.clone();
        person.photo_url = individual.photo_url.clone();

        // Explicit tags win over what the heuristics find in the name
        let parts = extract_arabic_name_parts(&individual.full_name);
        if contains_arabic(&individual.full_name) {
            person.full_name_ar = person.full_name.clone();
        }
        person.kunya = individual.kunya.clone().or(parts.kunya);
        person.nisba = individual.nisba.clone().or(parts.nisba);
        person.patronymic_chain = individual.patronymic_chain.clone().or(parts.patronymic_chain);
        person.laqab = individual.laqab.clone();

        person.tribe = individual.tribe.clone();
        person.tribal_branch = individual.tribal_branch.clone();
        person.is_sayyid = individual.is_sayyid;
        person.sayyid_verified = individual.sayyid_verified;
        person.sayyid_lineage = individual.sayyid_lineage.clone();

        person
    }

    fn check_family_links(&mut self, individuals: &[GedcomIndividual], families: &[GedcomFamily]) {
        let known: HashSet<&str> = families.iter().map(|f| f.gedcom_id.as_str()).collect();

        for individual in individuals {
            let links = individual
                .family_as_child
                .iter()
                .map(|f| (f, FamilyLink::Child))
                .chain(individual.families_as_spouse.iter().map(|f| (f, FamilyLink::Spouse)));

            for (family, link) in links {
                if !known.contains(family.as_str()) {
                    self.warnings.push(ImportWarning::UnknownFamily {
                        individual: individual.gedcom_id.clone(),
                        family: family.clone(),
                        link,
                    });
                }
            }
        }
    }

    fn resolve_spouse(&mut self, family: &GedcomFamily, role: SpouseRole) -> Option<PersonId> {
        let gedcom_id = match role {
            SpouseRole::Husband => family.husband_id.as_ref(),
            SpouseRole::Wife => family.wife_id.as_ref(),
        }?;
        let resolved = self.index.get(gedcom_id).cloned();
        if resolved.is_none() {
            self.warnings.push(ImportWarning::UnknownSpouse {
                family: family.gedcom_id.clone(),
                individual: gedcom_id.clone(),
                role,
            });
        }
        resolved
    }

    fn map_family(&mut self, family: &GedcomFamily, out: &mut Vec<Relationship>) {
        let husband = self.resolve_spouse(family, SpouseRole::Husband);
        let wife = self.resolve_spouse(family, SpouseRole::Wife);

        if let (Some(h), Some(w)) = (&husband, &wife) {
            let mut spouse = Relationship::spouse(self.tree_id.clone(), h.clone(), w.clone());
            spouse.marriage_date = family.marriage_date;
            spouse.marriage_date_hijri =
                self.hijri_of(family.marriage_date, &family.marriage_date_hijri);
            spouse.marriage_place = family.marriage_place.clone();
            spouse.divorce_date = family.divorce_date;
            spouse.divorce_date_hijri =
                self.hijri_of(family.divorce_date, &family.divorce_date_hijri);
            out.push(spouse);
        }

        for child_gedcom_id in &family.child_ids {
            let Some(child) = self.index.get(child_gedcom_id).cloned() else {
                self.warnings.push(ImportWarning::UnknownChild {
                    family: family.gedcom_id.clone(),
                    individual: child_gedcom_id.clone(),
                });
                continue;
            };
            for parent in husband.iter().chain(wife.iter()) {
                out.push(Relationship::parent(
                    self.tree_id.clone(),
                    parent.clone(),
                    child.clone(),
                ));
            }
        }
    }
}
