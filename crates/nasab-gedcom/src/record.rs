//! Record assembler
//!
//! Groups the flat token stream into top-level records. A record starts
//! at every level-0 line and owns all following lines until the next one.

use crate::line::GedcomLine;

/// Top-level record classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordKind {
    Individual,
    Family,
    /// HEAD, SUBM, TRLR, SOUR, ... carry nothing the tree model represents
    Other(String),
}

impl RecordKind {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_uppercase().as_str() {
            "INDI" => Some(Self::Individual),
            "FAM" => Some(Self::Family),
            _ => None,
        }
    }

    /// Classify by tag, falling back to the value for `0 <id> INDI` shapes
    /// where the record type ended up in the value column
    fn classify(head: &GedcomLine) -> Self {
        Self::from_tag(&head.tag)
            .or_else(|| Self::from_tag(head.value.trim()))
            .unwrap_or_else(|| Self::Other(head.tag.clone()))
    }
}

/// One top-level record: its level-0 line plus subordinate lines
#[derive(Debug, Clone)]
pub struct GedcomRecord {
    pub kind: RecordKind,
    pub head: GedcomLine,
    pub lines: Vec<GedcomLine>,
}

impl GedcomRecord {
    /// Cross-reference id of the record (`I1` for `0 @I1@ INDI`, and for
    /// the undelimited `0 I1 INDI`)
    pub fn xref(&self) -> Option<&str> {
        if let Some(pointer) = self.head.pointer.as_deref() {
            return Some(pointer);
        }
        let by_value = RecordKind::from_tag(&self.head.tag).is_none() && !self.head.value.is_empty();
        by_value.then_some(self.head.tag.as_str())
    }
}

/// Split tokens into records. Lines before the first level-0 line have no
/// owner and are dropped.
pub fn assemble(lines: Vec<GedcomLine>) -> Vec<GedcomRecord> {
    let mut records: Vec<GedcomRecord> = Vec::new();
    let mut orphans = 0usize;

    for line in lines {
        if line.level == 0 {
            records.push(GedcomRecord {
                kind: RecordKind::classify(&line),
                head: line,
                lines: Vec::new(),
            });
        } else if let Some(current) = records.last_mut() {
            current.lines.push(line);
        } else {
            orphans += 1;
        }
    }

    if orphans > 0 {
        tracing::debug!("Dropped {} lines preceding the first record", orphans);
    }

    records
}
