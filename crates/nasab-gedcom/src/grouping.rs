//! Family grouping for export
//!
//! GEDCOM wants nuclear families (FAM records); the tree stores flat
//! parent and spouse edges. Grouping runs three passes:
//!
//! 1. every spouse edge becomes a group keyed `{husband}-{wife}`;
//! 2. each child joins exactly one spousal group: the one whose husband
//!    and wife are both its parents, else the first group in which any of
//!    its parents is a spouse;
//! 3. children still unattached get a `single-{parent}` group per parent.
//!
//! Two parents of one child who are never linked as spouses therefore
//! produce two single-parent groups, each listing the child.

use chrono::NaiveDate;
use nasab_core::{Gender, Person, PersonId, Relationship};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// One or two parents and their children, exported as a FAM record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FamilyGroup {
    pub key: String,
    pub husband_id: Option<PersonId>,
    pub wife_id: Option<PersonId>,
    pub child_ids: Vec<PersonId>,
    pub marriage_date: Option<NaiveDate>,
    pub marriage_date_hijri: Option<String>,
    pub marriage_place: Option<String>,
    pub divorce_date: Option<NaiveDate>,
    pub divorce_date_hijri: Option<String>,
}

impl FamilyGroup {
    fn empty(key: String) -> Self {
        Self {
            key,
            husband_id: None,
            wife_id: None,
            child_ids: Vec::new(),
            marriage_date: None,
            marriage_date_hijri: None,
            marriage_place: None,
            divorce_date: None,
            divorce_date_hijri: None,
        }
    }

    fn spousal(husband: &Person, wife: &Person, rel: &Relationship) -> Self {
        Self {
            husband_id: Some(husband.id.clone()),
            wife_id: Some(wife.id.clone()),
            marriage_date: rel.marriage_date,
            marriage_date_hijri: rel.marriage_date_hijri.clone(),
            marriage_place: rel.marriage_place.clone(),
            divorce_date: rel.divorce_date,
            divorce_date_hijri: rel.divorce_date_hijri.clone(),
            ..Self::empty(format!("{}-{}", husband.id, wife.id))
        }
    }

    fn single_parent(parent: &Person) -> Self {
        let mut group = Self::empty(format!("single-{}", parent.id));
        match parent.gender {
            Gender::Male => group.husband_id = Some(parent.id.clone()),
            Gender::Female => group.wife_id = Some(parent.id.clone()),
        }
        group
    }

    pub fn is_spouse(&self, id: &PersonId) -> bool {
        self.husband_id.as_ref() == Some(id) || self.wife_id.as_ref() == Some(id)
    }

    pub fn has_child(&self, id: &PersonId) -> bool {
        self.child_ids.contains(id)
    }

    fn add_child(&mut self, id: &PersonId) {
        if !self.has_child(id) {
            self.child_ids.push(id.clone());
        }
    }
}

/// Cluster relationships into family groups. Relationships whose endpoints
/// are not among `persons` are ignored.
pub fn group_families(persons: &[Person], relationships: &[Relationship]) -> Vec<FamilyGroup> {
    let by_id: HashMap<&PersonId, &Person> = persons.iter().map(|p| (&p.id, p)).collect();
    let mut groups: Vec<FamilyGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    // Pass 1: spousal groups
    for rel in relationships.iter().filter(|r| r.is_spouse()) {
        let (Some(first), Some(second)) = (by_id.get(&rel.person1_id), by_id.get(&rel.person2_id))
        else {
            continue;
        };
        let (husband, wife) = if first.gender == Gender::Male {
            (*first, *second)
        } else {
            (*second, *first)
        };
        let group = FamilyGroup::spousal(husband, wife, rel);
        if !index.contains_key(&group.key) {
            index.insert(group.key.clone(), groups.len());
            groups.push(group);
        }
    }

    let parent_links: Vec<(&Person, &PersonId)> = relationships
        .iter()
        .filter(|r| r.is_parent())
        .filter_map(|r| {
            let parent: &Person = by_id.get(&r.person1_id)?;
            let child: &Person = by_id.get(&r.person2_id)?;
            Some((parent, &child.id))
        })
        .collect();

    let mut children: Vec<&PersonId> = Vec::new();
    let mut parents_of: HashMap<&PersonId, Vec<&PersonId>> = HashMap::new();
    for (parent, child) in &parent_links {
        let parents = parents_of.entry(*child).or_insert_with(|| {
            children.push(*child);
            Vec::new()
        });
        if !parents.contains(&&parent.id) {
            parents.push(&parent.id);
        }
    }

    // Pass 2: children of existing families, one group per child
    let mut attached: HashSet<&PersonId> = HashSet::new();
    for child in children {
        let parents = &parents_of[child];
        let is_parent = |id: &Option<PersonId>| id.as_ref().is_some_and(|id| parents.contains(&id));
        let slot = groups
            .iter()
            .position(|g| is_parent(&g.husband_id) && is_parent(&g.wife_id))
            .or_else(|| {
                parents
                    .iter()
                    .find_map(|p| groups.iter().position(|g| g.is_spouse(p)))
            });
        if let Some(slot) = slot {
            groups[slot].add_child(child);
            attached.insert(child);
        }
    }

    // Pass 3: single-parent fallback
    for (parent, child) in &parent_links {
        if attached.contains(*child) {
            continue;
        }
        let group = FamilyGroup::single_parent(parent);
        let slot = match index.get(&group.key) {
            Some(slot) => *slot,
            None => {
                index.insert(group.key.clone(), groups.len());
                groups.push(group);
                groups.len() - 1
            }
        };
        groups[slot].add_child(child);
    }

    tracing::debug!(
        "Grouped {} relationships into {} families",
        relationships.len(),
        groups.len()
    );
    groups
}
