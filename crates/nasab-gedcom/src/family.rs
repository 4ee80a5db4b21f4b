//! FAM record parser
//!
//! Same single-context scheme as the INDI parser: `MARR` and `DIV` open a
//! context for the `DATE`/`PLAC` lines nested below them.

use crate::date;
use crate::individual::non_empty;
use crate::record::GedcomRecord;
use chrono::NaiveDate;
use serde::Serialize;
use ulid::Ulid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    None,
    Marriage,
    Divorce,
    Other,
}

/// A family as read from the file
#[derive(Debug, Clone, Serialize)]
pub struct GedcomFamily {
    pub id: Ulid,
    /// Source pointer, e.g. `F1`
    pub gedcom_id: String,
    pub husband_id: Option<String>,
    pub wife_id: Option<String>,
    /// CHIL pointers in file order
    pub child_ids: Vec<String>,
    pub marriage_date: Option<NaiveDate>,
    pub marriage_place: Option<String>,
    pub marriage_date_hijri: Option<String>,
    pub divorce_date: Option<NaiveDate>,
    pub divorce_date_hijri: Option<String>,
}

impl GedcomFamily {
    fn new(gedcom_id: impl Into<String>) -> Self {
        Self {
            id: Ulid::new(),
            gedcom_id: gedcom_id.into(),
            husband_id: None,
            wife_id: None,
            child_ids: Vec::new(),
            marriage_date: None,
            marriage_place: None,
            marriage_date_hijri: None,
            divorce_date: None,
            divorce_date_hijri: None,
        }
    }
}

/// Parse one FAM record
pub fn parse_family(record: &GedcomRecord) -> GedcomFamily {
    let mut family = GedcomFamily::new(record.xref().unwrap_or_default());
    let mut context = Context::None;

    for line in &record.lines {
        match line.level {
            1 => {
                context = match line.tag.as_str() {
                    "HUSB" => {
                        family.husband_id = line.xref();
                        Context::Other
                    }
                    "WIFE" => {
                        family.wife_id = line.xref();
                        Context::Other
                    }
                    "CHIL" => {
                        family.child_ids.extend(line.xref());
                        Context::Other
                    }
                    "MARR" => Context::Marriage,
                    "DIV" => Context::Divorce,
                    _ => Context::Other,
                }
            }
            2 => match (context, line.tag.as_str()) {
                (Context::Marriage, "DATE") => family.marriage_date = date::decode(&line.value),
                (Context::Marriage, "PLAC") => family.marriage_place = non_empty(&line.value),
                (Context::Marriage, "_HIJRI") => {
                    family.marriage_date_hijri = non_empty(&line.value)
                }
                (Context::Divorce, "DATE") => family.divorce_date = date::decode(&line.value),
                (Context::Divorce, "_HIJRI") => family.divorce_date_hijri = non_empty(&line.value),
                _ => {}
            },
            _ => {}
        }
    }

    family
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::tokenize;
    use crate::record::assemble;

    fn parse(content: &str) -> GedcomFamily {
        let records = assemble(tokenize(content).lines);
        parse_family(&records[0])
    }

    #[test]
    fn test_full_family() {
        let fam = parse(concat!(
            "0 @F1@ FAM\n",
            "1 HUSB @I1@\n",
            "1 WIFE @I2@\n",
            "1 CHIL @I3@\n",
            "1 CHIL @I4@\n",
            "1 MARR\n",
            "2 DATE 1 JUN 1975\n",
            "2 PLAC Damascus\n",
            "1 DIV\n",
            "2 DATE 1990\n",
        ));

        assert_eq!(fam.gedcom_id, "F1");
        assert_eq!(fam.husband_id.as_deref(), Some("I1"));
        assert_eq!(fam.wife_id.as_deref(), Some("I2"));
        assert_eq!(fam.child_ids, vec!["I3", "I4"]);
        assert_eq!(fam.marriage_date, NaiveDate::from_ymd_opt(1975, 6, 1));
        assert_eq!(fam.marriage_place.as_deref(), Some("Damascus"));
        assert_eq!(fam.divorce_date, NaiveDate::from_ymd_opt(1990, 1, 1));
    }

    #[test]
    fn test_single_parent_family() {
        let fam = parse("0 @F2@ FAM\n1 WIFE @I7@\n1 CHIL @I8@\n");
        assert!(fam.husband_id.is_none());
        assert_eq!(fam.wife_id.as_deref(), Some("I7"));
        assert!(fam.marriage_date.is_none());
    }

    #[test]
    fn test_date_outside_event_ignored() {
        let fam = parse("0 @F1@ FAM\n1 MARR\n1 HUSB @I1@\n2 DATE 1 JUN 1975\n");
        assert!(fam.marriage_date.is_none());
    }
}
