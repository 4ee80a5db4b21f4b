//! Import/Export commands

use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use crate::output::{format_output, OutputFormat, Tabular};
use crate::{AppContext, Cli};
use nasab_core::{FamilyGraph, FamilyTree, TreeId};
use nasab_gedcom::{export_to_gedcom, parse_gedcom, ExportStats, ParseResult, ParseStats};

#[derive(Args)]
pub struct ImportArgs {
    /// Input GEDCOM file
    pub file: PathBuf,

    /// Name of the new tree (default: file name without extension)
    #[arg(short = 't', long)]
    pub tree_name: Option<String>,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the full parse result instead of the tree snapshot
    #[arg(long)]
    pub report: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Tree snapshot (JSON) to export
    pub snapshot: PathBuf,

    /// Output file, `-` for stdout (default: generated name in the current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Leave out NOTE records
    #[arg(long)]
    pub no_notes: bool,

    /// Leave out photo links
    #[arg(long)]
    pub no_photos: bool,

    /// Leave out _HIJRI dates
    #[arg(long)]
    pub no_hijri: bool,

    /// Submitter name for the SUBM record
    #[arg(long)]
    pub submitter_name: Option<String>,

    /// Submitter email for the SUBM record
    #[arg(long)]
    pub submitter_email: Option<String>,
}

#[derive(Args)]
pub struct CheckArgs {
    /// GEDCOM file to check
    pub file: PathBuf,
}

/// What an import or check found
#[derive(Debug, Serialize)]
pub struct ParseSummary {
    pub file: String,
    pub stats: ParseStats,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ParseSummary {
    fn new(file: &Path, result: &ParseResult) -> Self {
        Self {
            file: file.display().to_string(),
            stats: result.stats.clone(),
            errors: result.errors.iter().map(|e| e.to_string()).collect(),
            warnings: result.warnings.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl Tabular for ParseSummary {
    fn rows(&self) -> Vec<(String, String)> {
        let s = &self.stats;
        vec![
            ("File".to_string(), self.file.clone()),
            ("Lines".to_string(), s.total_lines.to_string()),
            ("Individuals".to_string(), s.individuals_found.to_string()),
            ("Families".to_string(), s.families_found.to_string()),
            ("Persons created".to_string(), s.persons_created.to_string()),
            ("Relationships created".to_string(), s.relationships_created.to_string()),
            ("Errors".to_string(), self.errors.len().to_string()),
            ("Warnings".to_string(), self.warnings.len().to_string()),
        ]
    }

    fn details(&self) -> Vec<String> {
        let errors = self.errors.iter().map(|e| format!("error: {}", e));
        let warnings = self.warnings.iter().map(|w| format!("warning: {}", w));
        errors.chain(warnings).collect()
    }
}

/// What an export wrote
#[derive(Debug, Serialize)]
pub struct ExportSummary {
    pub tree: String,
    pub output: String,
    pub stats: ExportStats,
}

impl Tabular for ExportSummary {
    fn rows(&self) -> Vec<(String, String)> {
        vec![
            ("Tree".to_string(), self.tree.clone()),
            ("Output".to_string(), self.output.clone()),
            ("Persons".to_string(), self.stats.persons_exported.to_string()),
            ("Families".to_string(), self.stats.families_exported.to_string()),
            (
                "Relationships".to_string(),
                self.stats.relationships_exported.to_string(),
            ),
        ]
    }
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Write with secure permissions (0o600 = owner read/write only)
fn write_file(path: &Path, content: &str) -> anyhow::Result<()> {
    #[cfg(unix)]
    {
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        file.write_all(content.as_bytes())?;
    }
    #[cfg(not(unix))]
    {
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(())
}

fn write_stdout(content: &str) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    if !content.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    Ok(())
}

fn tree_name_for(args: &ImportArgs) -> String {
    args.tree_name
        .clone()
        .filter(|n| !n.trim().is_empty())
        .or_else(|| {
            args.file
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "Imported tree".to_string())
}

pub fn run_import(args: &ImportArgs, cli: &Cli) -> anyhow::Result<()> {
    tracing::info!("Importing from {:?}", args.file);

    let content = read_file(&args.file)?;
    let tree = FamilyTree::new(tree_name_for(args))
        .with_description(format!("Imported from {}", args.file.display()));
    let result = parse_gedcom(&content, &tree.id);

    if !cli.quiet {
        let summary = ParseSummary::new(&args.file, &result);
        eprintln!("{}", format_output(&summary, OutputFormat::from(cli.format.as_str())));
    }

    let document = if args.report {
        serde_json::to_string_pretty(&result)?
    } else {
        FamilyGraph::new(tree)
            .with_persons(result.persons)
            .with_relationships(result.relationships)
            .to_json()?
    };

    match &args.output {
        Some(path) => {
            write_file(path, &document)?;
            if !cli.quiet {
                eprintln!("Wrote {}", path.display());
            }
        }
        None => write_stdout(&document)?,
    }

    Ok(())
}

pub fn run_export(args: &ExportArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    tracing::info!("Exporting {:?}", args.snapshot);

    let graph = FamilyGraph::from_json(&read_file(&args.snapshot)?)
        .with_context(|| format!("{} is not a tree snapshot", args.snapshot.display()))?;

    // Flags override the config file
    let mut options = ctx.config.export_options();
    options.include_notes &= !args.no_notes;
    options.include_photos &= !args.no_photos;
    options.include_hijri_dates &= !args.no_hijri;
    if let Some(name) = &args.submitter_name {
        options.submitter_name = Some(name.clone());
    }
    if let Some(email) = &args.submitter_email {
        options.submitter_email = Some(email.clone());
    }

    let result = export_to_gedcom(&graph.tree, &graph.persons, &graph.relationships, &options);

    let destination = match &args.output {
        Some(path) if path.as_os_str() == "-" => None,
        Some(path) => Some(path.clone()),
        None => Some(PathBuf::from(&result.filename)),
    };

    let output = match &destination {
        Some(path) => {
            write_file(path, &result.content)?;
            path.display().to_string()
        }
        None => {
            write_stdout(&result.content)?;
            "-".to_string()
        }
    };

    if !cli.quiet {
        let summary = ExportSummary {
            tree: graph.tree.name.clone(),
            output,
            stats: result.stats,
        };
        eprintln!("{}", format_output(&summary, OutputFormat::from(cli.format.as_str())));
    }

    Ok(())
}

pub fn run_check(args: &CheckArgs, cli: &Cli) -> anyhow::Result<()> {
    let content = read_file(&args.file)?;
    let result = parse_gedcom(&content, &TreeId::new());

    let summary = ParseSummary::new(&args.file, &result);
    if !cli.quiet || result.has_errors() {
        println!("{}", format_output(&summary, OutputFormat::from(cli.format.as_str())));
    }

    if result.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}
