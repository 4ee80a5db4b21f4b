//! INDI record parser
//!
//! Only one level of context is tracked: the most recent level-1 tag
//! decides how the following level-2 lines are read. Anything nested
//! deeper than level 2 is ignored.

use crate::date;
use crate::line::GedcomLine;
use crate::record::GedcomRecord;
use chrono::NaiveDate;
use nasab_core::{Gender, PersonId};
use serde::Serialize;

/// Level-1 tags whose level-2 children are understood
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    None,
    Name,
    Birth,
    Death,
    Note,
    Sayyid,
    Object,
    /// A level-1 tag whose children are skipped
    Other,
}

/// An individual as read from the file, before mapping to a `Person`
#[derive(Debug, Clone, Serialize)]
pub struct GedcomIndividual {
    /// Fresh id the mapped `Person` will carry
    pub id: PersonId,
    /// Source pointer, e.g. `I1`
    pub gedcom_id: String,
    pub given_name: String,
    pub surname: String,
    pub full_name: String,
    pub gender: Gender,
    pub birth_date: Option<NaiveDate>,
    pub birth_place: Option<String>,
    pub birth_date_hijri: Option<String>,
    pub death_date: Option<NaiveDate>,
    pub death_place: Option<String>,
    pub death_date_hijri: Option<String>,
    pub is_living: bool,
    pub notes: Option<String>,
    pub photo_url: Option<String>,
    pub kunya: Option<String>,
    pub laqab: Option<String>,
    pub nisba: Option<String>,
    pub patronymic_chain: Option<String>,
    pub tribe: Option<String>,
    pub tribal_branch: Option<String>,
    pub is_sayyid: bool,
    pub sayyid_verified: bool,
    pub sayyid_lineage: Option<String>,
    /// FAMC pointer; only the first one is kept
    pub family_as_child: Option<String>,
    /// FAMS pointers, one per marriage
    pub families_as_spouse: Vec<String>,
}

impl GedcomIndividual {
    fn new(gedcom_id: impl Into<String>) -> Self {
        Self {
            id: PersonId::new(),
            gedcom_id: gedcom_id.into(),
            given_name: String::new(),
            surname: String::new(),
            full_name: String::new(),
            gender: Gender::Male,
            birth_date: None,
            birth_place: None,
            birth_date_hijri: None,
            death_date: None,
            death_place: None,
            death_date_hijri: None,
            is_living: true,
            notes: None,
            photo_url: None,
            kunya: None,
            laqab: None,
            nisba: None,
            patronymic_chain: None,
            tribe: None,
            tribal_branch: None,
            is_sayyid: false,
            sayyid_verified: false,
            sayyid_lineage: None,
            family_as_child: None,
            families_as_spouse: Vec::new(),
        }
    }

    fn append_note(&mut self, separator: &str, text: &str) {
        match self.notes.as_mut() {
            Some(notes) => {
                notes.push_str(separator);
                notes.push_str(text);
            }
            None => self.notes = Some(text.to_string()),
        }
    }

    fn apply_fact(&mut self, line: &GedcomLine, has_name: &mut bool) -> Context {
        match line.tag.as_str() {
            "NAME" if !*has_name => {
                *has_name = true;
                let (given, surname, full) = split_name(&line.value);
                self.given_name = given;
                self.surname = surname;
                self.full_name = full;
                Context::Name
            }
            "SEX" => {
                self.gender = Gender::from_gedcom_sex(&line.value);
                Context::Other
            }
            "BIRT" => Context::Birth,
            "DEAT" => {
                self.is_living = false;
                Context::Death
            }
            "FAMC" => {
                if self.family_as_child.is_none() {
                    self.family_as_child = line.xref();
                }
                Context::Other
            }
            "FAMS" => {
                self.families_as_spouse.extend(line.xref());
                Context::Other
            }
            "NOTE" => {
                self.append_note("\n", &line.value);
                Context::Note
            }
            "OBJE" => Context::Object,
            "_TRIBE" => {
                self.tribe = non_empty(&line.value);
                Context::Other
            }
            "_TRIBAL_BRANCH" => {
                self.tribal_branch = non_empty(&line.value);
                Context::Other
            }
            "_SAYYID" => {
                self.is_sayyid = !line.value.trim().eq_ignore_ascii_case("N");
                Context::Sayyid
            }
            _ => Context::Other,
        }
    }

    fn apply_detail(&mut self, context: Context, line: &GedcomLine) {
        let value = &line.value;
        match (context, line.tag.as_str()) {
            (Context::Name, "GIVN") => self.given_name = value.clone(),
            (Context::Name, "SURN") => self.surname = value.clone(),
            (Context::Name, "_KUNYA") => self.kunya = non_empty(value),
            (Context::Name, "_LAQAB") => self.laqab = non_empty(value),
            (Context::Name, "_NISBA") => self.nisba = non_empty(value),
            (Context::Name, "_NASAB") => self.patronymic_chain = non_empty(value),

            (Context::Birth, "DATE") => self.birth_date = date::decode(value),
            (Context::Birth, "PLAC") => self.birth_place = non_empty(value),
            (Context::Birth, "_HIJRI") => self.birth_date_hijri = non_empty(value),

            (Context::Death, "DATE") => self.death_date = date::decode(value),
            (Context::Death, "PLAC") => self.death_place = non_empty(value),
            (Context::Death, "_HIJRI") => self.death_date_hijri = non_empty(value),

            (Context::Note, "CONT") => self.append_note("\n", value),
            (Context::Note, "CONC") => self.append_note("", value),

            (Context::Sayyid, "_VERIFIED") => {
                self.sayyid_verified = value.trim().eq_ignore_ascii_case("Y")
            }
            (Context::Sayyid, "_LINEAGE") => self.sayyid_lineage = non_empty(value),

            (Context::Object, "FILE") if self.photo_url.is_none() => {
                self.photo_url = non_empty(value)
            }

            _ => {}
        }
    }
}

pub(crate) fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Split a GEDCOM name (`Given /Surname/ Suffix`) into given name, surname
/// and display name. Without slashes the whole value is the given name.
pub fn split_name(value: &str) -> (String, String, String) {
    let value = value.trim();
    let mut pieces = value.splitn(3, '/');
    let given = pieces.next().unwrap_or_default().trim();

    match pieces.next() {
        Some(surname) => {
            let surname = surname.trim();
            let suffix = pieces.next().unwrap_or_default().trim();
            let full = [given, surname, suffix]
                .iter()
                .filter(|s| !s.is_empty())
                .copied()
                .collect::<Vec<_>>()
                .join(" ");
            (given.to_string(), surname.to_string(), full)
        }
        None => (value.to_string(), String::new(), value.to_string()),
    }
}

/// Parse one INDI record
pub fn parse_individual(record: &GedcomRecord) -> GedcomIndividual {
    let mut individual = GedcomIndividual::new(record.xref().unwrap_or_default());
    let mut context = Context::None;
    let mut has_name = false;

    for line in &record.lines {
        match line.level {
            1 => context = individual.apply_fact(line, &mut has_name),
            2 => individual.apply_detail(context, line),
            _ => {}
        }
    }

    individual
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::tokenize;
    use crate::record::assemble;

    fn parse(content: &str) -> GedcomIndividual {
        let records = assemble(tokenize(content).lines);
        parse_individual(&records[0])
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn name_parts(given: &str, surname: &str, full: &str) -> (String, String, String) {
        (given.to_string(), surname.to_string(), full.to_string())
    }

    #[test]
    fn test_split_name() {
        assert_eq!(
            split_name("Ahmad /AlFulani/"),
            name_parts("Ahmad", "AlFulani", "Ahmad AlFulani")
        );
        assert_eq!(
            split_name("John /Smith/ Jr."),
            name_parts("John", "Smith", "John Smith Jr.")
        );
        assert_eq!(split_name("/Smith/"), name_parts("", "Smith", "Smith"));
        assert_eq!(
            split_name("محمد بن علي"),
            name_parts("محمد بن علي", "", "محمد بن علي")
        );
    }

    #[test]
    fn test_basic_individual() {
        let indi = parse(
            "0 @I1@ INDI\n1 NAME Ahmad /AlFulani/\n1 SEX M\n1 BIRT\n2 DATE 15 JAN 1980\n2 PLAC Makkah\n",
        );

        assert_eq!(indi.gedcom_id, "I1");
        assert_eq!(indi.given_name, "Ahmad");
        assert_eq!(indi.surname, "AlFulani");
        assert_eq!(indi.full_name, "Ahmad AlFulani");
        assert_eq!(indi.gender, Gender::Male);
        assert_eq!(indi.birth_date, Some(ymd(1980, 1, 15)));
        assert_eq!(indi.birth_place.as_deref(), Some("Makkah"));
        assert!(indi.is_living);
    }

    #[test]
    fn test_missing_sex_defaults_to_male() {
        let indi = parse("0 @I1@ INDI\n1 NAME Sam\n");
        assert_eq!(indi.gender, Gender::Male);
        let indi = parse("0 @I1@ INDI\n1 SEX F\n");
        assert_eq!(indi.gender, Gender::Female);
    }

    #[test]
    fn test_givn_surn_override_slashes() {
        let indi = parse("0 @I1@ INDI\n1 NAME Abu /Bakr/\n2 GIVN Abdullah\n2 SURN Quhafa\n");
        assert_eq!(indi.given_name, "Abdullah");
        assert_eq!(indi.surname, "Quhafa");
        assert_eq!(indi.full_name, "Abu Bakr");
    }

    #[test]
    fn test_only_first_name_is_used() {
        let indi = parse("0 @I1@ INDI\n1 NAME Ali /Hasan/\n1 NAME Other /Alias/\n2 GIVN Nope\n");
        assert_eq!(indi.given_name, "Ali");
        assert_eq!(indi.surname, "Hasan");
    }

    #[test]
    fn test_death_tag_alone_marks_deceased() {
        let indi = parse("0 @I1@ INDI\n1 NAME Umar\n1 DEAT Y\n");
        assert!(!indi.is_living);
        assert!(indi.death_date.is_none());

        let indi = parse("0 @I1@ INDI\n1 DEAT\n2 DATE ABT 1920\n2 PLAC Baghdad\n");
        assert_eq!(indi.death_date, Some(ymd(1920, 1, 1)));
        assert_eq!(indi.death_place.as_deref(), Some("Baghdad"));
    }

    #[test]
    fn test_family_links() {
        let indi = parse("0 @I3@ INDI\n1 FAMC @F1@\n1 FAMC @F9@\n1 FAMS @F2@\n1 FAMS @F3@\n");
        assert_eq!(indi.family_as_child.as_deref(), Some("F1"));
        assert_eq!(indi.families_as_spouse, vec!["F2", "F3"]);
    }

    #[test]
    fn test_notes_concatenate() {
        let indi = parse(
            "0 @I1@ INDI\n1 NOTE First line\n2 CONT second line\n2 CONC  continued\n1 NOTE Another note\n",
        );
        assert_eq!(
            indi.notes.as_deref(),
            Some("First line\nsecond linecontinued\nAnother note")
        );
    }

    #[test]
    fn test_date_context_does_not_leak() {
        // DATE under SEX is not a birth date
        let indi = parse("0 @I1@ INDI\n1 BIRT\n1 SEX M\n2 DATE 1 JAN 1900\n");
        assert!(indi.birth_date.is_none());
    }

    #[test]
    fn test_deeper_levels_ignored() {
        let indi = parse("0 @I1@ INDI\n1 BIRT\n2 PLAC Cairo\n3 MAP\n4 LATI N30.0\n2 DATE 1900\n");
        assert_eq!(indi.birth_place.as_deref(), Some("Cairo"));
        assert_eq!(indi.birth_date, Some(ymd(1900, 1, 1)));
    }

    #[test]
    fn test_arabic_extension_tags() {
        let indi = parse(concat!(
            "0 @I1@ INDI\n",
            "1 NAME محمد /الهاشمي/\n",
            "2 GIVN محمد\n",
            "2 _KUNYA أبو القاسم\n",
            "2 _LAQAB الأمين\n",
            "2 _NISBA الهاشمي\n",
            "2 _NASAB بن عبدالله بن عبدالمطلب\n",
            "2 _NASAB_FULL Muhammad ibn Abdullah\n",
            "1 _TRIBE قريش\n",
            "1 _TRIBAL_BRANCH بنو هاشم\n",
            "1 _SAYYID Y\n",
            "2 _VERIFIED Y\n",
            "2 _LINEAGE الحسن\n",
            "1 OBJE\n",
            "2 FORM URL\n",
            "2 FILE https://example.org/p.jpg\n",
        ));

        assert_eq!(indi.kunya.as_deref(), Some("أبو القاسم"));
        assert_eq!(indi.laqab.as_deref(), Some("الأمين"));
        assert_eq!(indi.nisba.as_deref(), Some("الهاشمي"));
        assert_eq!(indi.patronymic_chain.as_deref(), Some("بن عبدالله بن عبدالمطلب"));
        assert_eq!(indi.tribe.as_deref(), Some("قريش"));
        assert_eq!(indi.tribal_branch.as_deref(), Some("بنو هاشم"));
        assert!(indi.is_sayyid);
        assert!(indi.sayyid_verified);
        assert_eq!(indi.sayyid_lineage.as_deref(), Some("الحسن"));
        assert_eq!(indi.photo_url.as_deref(), Some("https://example.org/p.jpg"));
    }
}
