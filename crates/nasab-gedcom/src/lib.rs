//! Nasab GEDCOM - Interchange engine
//!
//! Reads GEDCOM 5.5 text into persons and relationships, and writes a
//! tree back out as GEDCOM. Arabic naming (kunya, nasab, nisba, laqab),
//! tribal affiliation, sayyid lineage and Hijri dates travel in
//! underscore-prefixed custom tags.
//!
//! Import pipeline: [`line`] tokenizes, [`record`] groups lines under
//! their level-0 record, [`individual`] and [`family`] extract typed
//! records, and [`import`] maps those onto the tree model.

pub mod date;
pub mod error;
pub mod export;
pub mod family;
pub mod grouping;
pub mod import;
pub mod individual;
pub mod line;
pub mod names;
pub mod record;
pub mod writer;

pub use error::{FamilyLink, ImportWarning, SpouseRole, SyntaxError};
pub use export::{export_filename, export_to_gedcom, ExportOptions, ExportResult, ExportStats};
pub use family::GedcomFamily;
pub use grouping::{group_families, FamilyGroup};
pub use import::{parse_gedcom, parse_gedcom_with, ImportMapper, MappedTree, ParseResult, ParseStats};
pub use individual::GedcomIndividual;
pub use names::{extract_arabic_name_parts, ArabicNameParts};
