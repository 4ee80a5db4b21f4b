//! End-to-end import and export behaviour

use chrono::NaiveDate;
use nasab_core::{FamilyTree, Gender, Person, Relationship, RelationshipType, TreeId};
use nasab_gedcom::{
    export_to_gedcom, parse_gedcom, ExportOptions, FamilyLink, ImportWarning, ParseResult,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn options() -> ExportOptions {
    ExportOptions {
        export_date: Some(ymd(2026, 10, 18)),
        ..ExportOptions::default()
    }
}

fn reimport(tree: &FamilyTree, persons: &[Person], relationships: &[Relationship]) -> ParseResult {
    let exported = export_to_gedcom(tree, persons, relationships, &options());
    let result = parse_gedcom(&exported.content, &TreeId::new());
    assert!(result.errors.is_empty(), "errors: {:?}", result.errors);
    assert!(result.warnings.is_empty(), "warnings: {:?}", result.warnings);
    result
}

#[test]
fn test_individual_with_name_sex_and_birth() {
    let result = parse_gedcom(
        "0 @I1@ INDI\n1 NAME Ahmad /AlFulani/\n1 SEX M\n1 BIRT\n2 DATE 15 JAN 1980\n",
        &TreeId::new(),
    );

    assert_eq!(result.persons.len(), 1);
    let person = &result.persons[0];
    assert_eq!(person.given_name, "Ahmad");
    assert_eq!(person.family_name.as_deref(), Some("AlFulani"));
    assert_eq!(person.gender, Gender::Male);
    assert_eq!(person.birth_date, Some(ymd(1980, 1, 15)));
    assert_eq!(person.birth_date_hijri.as_deref(), Some("1400-02-26"));
    assert!(person.is_living);
}

#[test]
fn test_family_becomes_spouse_and_parent_links() {
    let result = parse_gedcom(
        concat!(
            "0 @I1@ INDI\n1 NAME Ali\n1 SEX M\n1 FAMS @F1@\n",
            "0 @I2@ INDI\n1 NAME Fatima\n1 SEX F\n1 FAMS @F1@\n",
            "0 @I3@ INDI\n1 NAME Hasan\n1 SEX M\n1 FAMC @F1@\n",
            "0 @F1@ FAM\n1 HUSB @I1@\n1 WIFE @I2@\n1 CHIL @I3@\n",
            "1 MARR\n2 DATE 1 JUN 1975\n",
        ),
        &TreeId::new(),
    );
    let ids: Vec<_> = result.persons.iter().map(|p| p.id.clone()).collect();

    let spouses: Vec<_> = result.relationships.iter().filter(|r| r.is_spouse()).collect();
    assert_eq!(spouses.len(), 1);
    assert_eq!(spouses[0].person1_id, ids[0]);
    assert_eq!(spouses[0].person2_id, ids[1]);
    assert_eq!(spouses[0].marriage_date, Some(ymd(1975, 6, 1)));

    let parents: Vec<_> = result
        .relationships
        .iter()
        .filter(|r| r.relationship_type == RelationshipType::Parent)
        .map(|r| (r.person1_id.clone(), r.person2_id.clone()))
        .collect();
    assert_eq!(
        parents,
        vec![(ids[0].clone(), ids[2].clone()), (ids[1].clone(), ids[2].clone())]
    );
    assert!(result.warnings.is_empty());
}

#[test]
fn test_kunya_exported_under_name_and_read_back() {
    let tree = FamilyTree::new("آل فلان");
    let mut person = Person::new(tree.id.clone(), "محمد", Gender::Male);
    person.kunya = Some("أبو محمد".to_string());

    let exported = export_to_gedcom(&tree, &[person], &[], &options());
    let lines: Vec<&str> = exported.content.lines().collect();
    let name = lines.iter().position(|l| l.starts_with("1 NAME")).unwrap();
    let kunya = lines.iter().position(|l| *l == "2 _KUNYA أبو محمد").unwrap();
    assert!(kunya > name);
    assert!(lines[name + 1..kunya].iter().all(|l| l.starts_with("2 ")));

    let result = parse_gedcom(&exported.content, &TreeId::new());
    assert_eq!(result.persons[0].kunya.as_deref(), Some("أبو محمد"));
}

#[test]
fn test_dangling_famc_is_warned() {
    let result = parse_gedcom(
        "0 @I1@ INDI\n1 NAME Orphan\n1 FAMC @F9@\n",
        &TreeId::new(),
    );

    assert_eq!(result.persons.len(), 1);
    assert!(result.relationships.is_empty());
    assert!(result.errors.is_empty());
    assert_eq!(
        result.warnings,
        vec![ImportWarning::UnknownFamily {
            individual: "I1".to_string(),
            family: "F9".to_string(),
            link: FamilyLink::Child,
        }]
    );

    let json = serde_json::to_value(&result.warnings[0]).unwrap();
    assert_eq!(json["kind"], "unknown_family");
    assert_eq!(json["family"], "F9");
}

#[test]
fn test_malformed_line_does_not_stop_import() {
    let result = parse_gedcom(
        concat!(
            "0 HEAD\n",
            "0 @I1@ INDI\n1 NAME One\n",
            "0 @I2@ INDI\n1 NAME Two\n",
            "this line is not gedcom\n",
            "0 @I3@ INDI\n1 NAME Three\n",
            "0 TRLR\n",
        ),
        &TreeId::new(),
    );

    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].line, 6);
    assert_eq!(result.individuals.len(), 3);
    let names: Vec<_> = result.persons.iter().map(|p| p.given_name.as_str()).collect();
    assert_eq!(names, vec!["One", "Two", "Three"]);
    assert!(result.has_errors());
}

#[test]
fn test_core_fields_survive_round_trip() {
    let tree = FamilyTree::new("Round Trip");
    let people = vec![
        Person::new(tree.id.clone(), "Ahmad", Gender::Male)
            .with_family_name("AlFulani")
            .with_birth_date(ymd(1980, 1, 15)),
        Person::new(tree.id.clone(), "Maryam", Gender::Female).with_birth_date(ymd(1001, 12, 31)),
        Person::new(tree.id.clone(), "زينب", Gender::Female).with_birth_date(ymd(2024, 2, 29)),
    ];

    for original in people {
        let result = reimport(&tree, std::slice::from_ref(&original), &[]);
        assert_eq!(result.persons.len(), 1);
        let back = &result.persons[0];
        assert_eq!(back.given_name, original.given_name);
        assert_eq!(back.gender, original.gender);
        assert_eq!(back.birth_date, original.birth_date);
        assert_eq!(back.family_name, original.family_name);
    }
}

#[test]
fn test_arabic_extensions_survive_round_trip() {
    let tree = FamilyTree::new("T");
    let mut person = Person::new(tree.id.clone(), "علي", Gender::Male);
    person.kunya = Some("أبو الحسن".to_string());
    person.laqab = Some("المرتضى".to_string());
    person.nisba = Some("الهاشمي".to_string());
    person.patronymic_chain = Some("بن أبي طالب".to_string());
    person.nasab_chain_en = Some("Ali ibn Abi Talib".to_string());
    person.tribe = Some("قريش".to_string());
    person.tribal_branch = Some("بنو هاشم".to_string());
    person.is_sayyid = true;
    person.sayyid_verified = true;
    person.sayyid_lineage = Some("هاشمي".to_string());
    person.birth_date_hijri = Some("0023-07-13".to_string());
    person.death_place = Some("الكوفة".to_string());
    person.is_living = false;
    person.notes = Some("first line\nsecond line".to_string());
    person.photo_url = Some("https://example.org/ali.png".to_string());

    let result = reimport(&tree, &[person], &[]);
    let back = &result.persons[0];

    assert_eq!(back.kunya.as_deref(), Some("أبو الحسن"));
    assert_eq!(back.laqab.as_deref(), Some("المرتضى"));
    assert_eq!(back.nisba.as_deref(), Some("الهاشمي"));
    assert_eq!(back.patronymic_chain.as_deref(), Some("بن أبي طالب"));
    assert_eq!(back.tribe.as_deref(), Some("قريش"));
    assert_eq!(back.tribal_branch.as_deref(), Some("بنو هاشم"));
    assert!(back.is_sayyid);
    assert!(back.sayyid_verified);
    assert_eq!(back.sayyid_lineage.as_deref(), Some("هاشمي"));
    assert_eq!(back.birth_date_hijri.as_deref(), Some("0023-07-13"));
    assert_eq!(back.death_place.as_deref(), Some("الكوفة"));
    assert!(!back.is_living);
    assert_eq!(back.notes.as_deref(), Some("first line\nsecond line"));
    assert_eq!(back.photo_url.as_deref(), Some("https://example.org/ali.png"));
    // transliteration is written for other programs, not read back
    assert!(back.nasab_chain_en.is_none());
}

#[test]
fn test_family_structure_survives_round_trip() {
    let tree = FamilyTree::new("T");
    let father = Person::new(tree.id.clone(), "Ali", Gender::Male);
    let mother = Person::new(tree.id.clone(), "Fatima", Gender::Female);
    let son = Person::new(tree.id.clone(), "Hasan", Gender::Male);
    let daughter = Person::new(tree.id.clone(), "Zaynab", Gender::Female);
    let relationships = vec![
        Relationship::spouse(tree.id.clone(), father.id.clone(), mother.id.clone())
            .with_marriage_date(ymd(1975, 6, 1)),
        Relationship::parent(tree.id.clone(), father.id.clone(), son.id.clone()),
        Relationship::parent(tree.id.clone(), mother.id.clone(), son.id.clone()),
        Relationship::parent(tree.id.clone(), father.id.clone(), daughter.id.clone()),
        Relationship::parent(tree.id.clone(), mother.id.clone(), daughter.id.clone()),
    ];

    let result = reimport(&tree, &[father, mother, son, daughter], &relationships);

    assert_eq!(result.stats.individuals_found, 4);
    assert_eq!(result.stats.families_found, 1);
    assert_eq!(result.relationships.len(), 5);
    let marriage = result.relationships.iter().find(|r| r.is_spouse()).unwrap();
    assert_eq!(marriage.marriage_date, Some(ymd(1975, 6, 1)));
    assert_eq!(marriage.marriage_date_hijri.as_deref(), Some("1395-05-21"));
    assert_eq!(
        result.relationships.iter().filter(|r| r.is_parent()).count(),
        4
    );
}

#[test]
fn test_child_of_second_marriage_keeps_two_parents() {
    let tree = FamilyTree::new("T");
    let father = Person::new(tree.id.clone(), "Umar", Gender::Male);
    let first_wife = Person::new(tree.id.clone(), "Zaynab", Gender::Female);
    let second_wife = Person::new(tree.id.clone(), "Atika", Gender::Female);
    let child = Person::new(tree.id.clone(), "Abdullah", Gender::Male);
    let relationships = vec![
        Relationship::spouse(tree.id.clone(), father.id.clone(), first_wife.id.clone()),
        Relationship::spouse(tree.id.clone(), father.id.clone(), second_wife.id.clone()),
        Relationship::parent(tree.id.clone(), father.id.clone(), child.id.clone()),
        Relationship::parent(tree.id.clone(), second_wife.id.clone(), child.id.clone()),
    ];

    let exported = export_to_gedcom(
        &tree,
        &[father.clone(), first_wife.clone(), second_wife.clone(), child.clone()],
        &relationships,
        &options(),
    );
    assert_eq!(exported.content.matches("1 CHIL ").count(), 1);
    assert_eq!(exported.content.matches("1 FAMC ").count(), 1);

    let result = reimport(&tree, &[father, first_wife, second_wife, child], &relationships);
    let names: std::collections::HashMap<_, _> = result
        .persons
        .iter()
        .map(|p| (p.id.clone(), p.given_name.as_str()))
        .collect();
    let mut parents: Vec<(&str, &str)> = result
        .relationships
        .iter()
        .filter(|r| r.is_parent())
        .map(|r| (names[&r.person1_id], names[&r.person2_id]))
        .collect();
    parents.sort();

    assert_eq!(parents, vec![("Atika", "Abdullah"), ("Umar", "Abdullah")]);
    assert_eq!(result.relationships.iter().filter(|r| r.is_spouse()).count(), 2);
}
