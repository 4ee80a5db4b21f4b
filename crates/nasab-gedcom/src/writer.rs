//! GEDCOM line writer

/// Longest value written on one line before wrapping into `CONT`
pub const MAX_LINE_VALUE: usize = 248;

/// Accumulates `LEVEL [@POINTER@] TAG [VALUE]` lines
#[derive(Debug, Default)]
pub struct GedcomWriter {
    out: String,
    lines: usize,
}

impl GedcomWriter {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, level: u32, pointer: Option<&str>, tag: &str, value: &str) {
        self.out.push_str(&level.to_string());
        if let Some(pointer) = pointer {
            self.out.push_str(" @");
            self.out.push_str(pointer);
            self.out.push('@');
        }
        self.out.push(' ');
        self.out.push_str(tag);
        if !value.is_empty() {
            self.out.push(' ');
            // A stray newline would start a bogus line
            self.out.push_str(&value.replace(['\r', '\n'], " "));
        }
        self.out.push('\n');
        self.lines += 1;
    }

    /// `0 @POINTER@ TAG`
    pub fn record(&mut self, pointer: &str, tag: &str) {
        self.push(0, Some(pointer), tag, "");
    }

    /// A tag with no value
    pub fn tag(&mut self, level: u32, tag: &str) {
        self.push(level, None, tag, "");
    }

    pub fn value(&mut self, level: u32, tag: &str, value: &str) {
        self.push(level, None, tag, value.trim());
    }

    /// Write the line only when there is a non-blank value
    pub fn optional(&mut self, level: u32, tag: &str, value: Option<&str>) {
        if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
            self.push(level, None, tag, value);
        }
    }

    /// `@POINTER@` as a value, e.g. `1 HUSB @I1@`
    pub fn pointer(&mut self, level: u32, tag: &str, pointer: &str) {
        self.push(level, None, tag, &format!("@{}@", pointer));
    }

    /// Multi-line text: the first line goes on `tag`, the rest on
    /// `CONT` lines one level deeper
    pub fn text(&mut self, level: u32, tag: &str, text: &str) {
        let mut lines = wrap_text(text, MAX_LINE_VALUE).into_iter();
        let first = lines.next().unwrap_or_default();
        self.push(level, None, tag, &first);
        for line in lines {
            self.push(level + 1, None, "CONT", &line);
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// Split text on newlines, then break every line longer than `width`
/// characters at the last space within the limit (or hard, if none)
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();

    for line in text.lines() {
        let mut rest: Vec<char> = line.chars().collect();
        while rest.len() > width {
            let window = &rest[..width];
            let (cut, skip) = match window.iter().rposition(|c| *c == ' ') {
                Some(space) if space > 0 => (space, 1),
                _ => (width, 0),
            };
            out.push(rest[..cut].iter().collect());
            rest.drain(..cut + skip);
        }
        out.push(rest.into_iter().collect());
    }

    if out.is_empty() {
        out.push(String::new());
    }
    out
}
