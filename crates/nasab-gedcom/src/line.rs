//! Line tokenizer
//!
//! Every GEDCOM line has the shape `LEVEL [@POINTER@] TAG [VALUE]`.
//! Lines are tokenized independently so one malformed line costs only
//! itself; the caller collects the errors and keeps going.

use crate::error::SyntaxError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static LINE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+)\s+(?:@([^@\s]+)@\s+)?([A-Za-z0-9_]+)(?:\s+(.*))?$").unwrap()
});

/// One tokenized GEDCOM line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GedcomLine {
    pub level: u32,
    pub tag: String,
    /// Remainder of the line, trimmed; empty when absent
    pub value: String,
    /// Cross-reference id without the surrounding `@`
    pub pointer: Option<String>,
}

impl GedcomLine {
    /// The value read as a cross-reference (`@I1@` → `I1`)
    pub fn xref(&self) -> Option<String> {
        xref(&self.value)
    }
}

/// Strip the `@` delimiters from a pointer value
pub fn xref(value: &str) -> Option<String> {
    let id = value.trim().trim_matches('@').trim();
    (!id.is_empty()).then(|| id.to_string())
}

/// Tokenize a single raw line
pub fn tokenize_line(raw: &str, line_number: usize) -> Result<GedcomLine, SyntaxError> {
    let trimmed = raw.trim();
    let invalid = || SyntaxError {
        line: line_number,
        content: trimmed.to_string(),
    };

    let caps = LINE_PATTERN.captures(trimmed).ok_or_else(invalid)?;
    let level = caps[1].parse::<u32>().map_err(|_| invalid())?;

    Ok(GedcomLine {
        level,
        tag: caps[3].to_ascii_uppercase(),
        value: caps
            .get(4)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default(),
        pointer: caps.get(2).map(|m| m.as_str().to_string()),
    })
}

/// Result of tokenizing a whole file
#[derive(Debug, Default)]
pub struct Tokenized {
    pub lines: Vec<GedcomLine>,
    pub errors: Vec<SyntaxError>,
    /// Non-blank lines seen, valid or not
    pub total_lines: usize,
}

/// Tokenize a whole file, skipping blank lines and collecting errors
pub fn tokenize(content: &str) -> Tokenized {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut out = Tokenized::default();

    for (index, raw) in content.lines().enumerate() {
        if raw.trim().is_empty() {
            continue;
        }
        out.total_lines += 1;
        match tokenize_line(raw, index + 1) {
            Ok(line) => out.lines.push(line),
            Err(e) => {
                tracing::debug!("{}", e);
                out.errors.push(e);
            }
        }
    }

    out
}
