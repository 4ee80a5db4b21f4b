//! Output formatting utilities

use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Table,
        }
    }
}

/// Something that can be shown as `label: value` rows
pub trait Tabular {
    fn rows(&self) -> Vec<(String, String)>;

    /// Free-form lines printed after the rows
    fn details(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Format output based on format type
pub fn format_output<T: Serialize + Tabular>(data: &T, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
        }
        OutputFormat::Table => {
            let rows = data.rows();
            let width = rows.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
            let mut out: Vec<String> = rows
                .into_iter()
                .map(|(k, v)| format!("{:<width$}  {}", k, v, width = width))
                .collect();
            out.extend(data.details());
            out.join("\n")
        }
    }
}
