//! CLI binary for checking and normalizing DOT attribute values.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use dotattr_dot::{DotGraph, EdgeDef, Id, NodeDef, SubgraphDef};
use dotattr_types::ElementKind;
use dotattr_values::{
    descriptor, descriptors, descriptors_for, get_parsed, scheme, scheme_names, serialize, set,
    validate_with_config, AttributeHolder, Diagnostic, Severity, ValidationConfig,
};

#[derive(Parser)]
#[command(name = "dotattr", version, about = "Typed attribute checker for Graphviz DOT files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check every attribute value of a .dot file
    Check {
        /// Path to the .dot file
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Exit non-zero on warnings too
        #[arg(long)]
        deny_warnings: bool,

        /// Warn about attributes the registry does not know
        #[arg(long)]
        unknown_attributes: bool,

        /// JSON file with validation settings
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the canonical form of an attribute value
    Normalize {
        /// Element kind: graph, cluster, subgraph, node or edge
        #[arg(long)]
        kind: ElementKind,

        /// Attribute name
        #[arg(long)]
        attr: String,

        /// Raw attribute value
        value: String,
    },

    /// List registered attributes
    Attrs {
        /// Only attributes applying to this element kind
        #[arg(long)]
        kind: Option<ElementKind>,
    },

    /// List color schemes, or the colors of one scheme
    Schemes {
        /// Scheme name
        name: Option<String>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            file,
            format,
            deny_warnings,
            unknown_attributes,
            config,
        } => {
            let mut settings = match config {
                Some(path) => load_config(&path)?,
                None => ValidationConfig::default(),
            };
            settings.deny_warnings |= deny_warnings;
            settings.report_unknown_attributes |= unknown_attributes;
            cmd_check(&file, format, &settings)?;
        }
        Commands::Normalize { kind, attr, value } => {
            cmd_normalize(kind, &attr, &value)?;
        }
        Commands::Attrs { kind } => {
            cmd_attrs(kind);
        }
        Commands::Schemes { name } => {
            cmd_schemes(name.as_deref())?;
        }
    }

    Ok(())
}

fn load_config(path: &Path) -> anyhow::Result<ValidationConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    Ok(ValidationConfig::from_json(&json)?)
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

struct Report {
    source: String,
    diagnostics: Vec<Diagnostic>,
}

fn check_file(path: &Path, config: &ValidationConfig) -> anyhow::Result<Report> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = source.len(), "Checking DOT file");
    let graph = dotattr_dot::parse(&source)?;
    let diagnostics = validate_with_config(&graph, config);
    Ok(Report { source, diagnostics })
}

fn render_text(report: &Report) -> Vec<String> {
    report
        .diagnostics
        .iter()
        .map(|diag| {
            let severity = match diag.severity {
                Severity::Error => "ERROR",
                Severity::Warning => "WARN",
            };
            let location = match diag.span {
                Some(span) => {
                    let (line, col) = span.line_col(&report.source);
                    format!("{line}:{col} ")
                }
                None => String::new(),
            };
            format!("[{severity}] {location}{}: {}", diag.attribute, diag.message)
        })
        .collect()
}

fn cmd_check(path: &Path, format: Format, config: &ValidationConfig) -> anyhow::Result<()> {
    let report = check_file(path, config)?;

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&report.diagnostics)?),
        Format::Text if report.diagnostics.is_empty() => println!("All attribute values are valid"),
        Format::Text => {
            for line in render_text(&report) {
                println!("{line}");
            }
        }
    }

    if config.has_failures(&report.diagnostics) {
        std::process::exit(1);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// normalize
// ---------------------------------------------------------------------------

/// A detached element of the given kind to run the setters on.
fn blank_element(kind: ElementKind) -> Box<dyn AttributeHolder> {
    match kind {
        ElementKind::Graph => Box::new(DotGraph::new(true)),
        ElementKind::Cluster => Box::new(SubgraphDef::new(Some(Id::bare("cluster")))),
        ElementKind::Subgraph => Box::new(SubgraphDef::new(None)),
        ElementKind::Node => Box::new(NodeDef::new("node")),
        ElementKind::Edge => Box::new(EdgeDef::new("tail", "head")),
    }
}

fn normalize(kind: ElementKind, attr: &str, value: &str) -> anyhow::Result<(String, Vec<Diagnostic>)> {
    if descriptor(kind, attr).is_none() {
        bail!("Unknown {kind} attribute '{attr}'");
    }
    let mut element = blank_element(kind);
    let warnings = set(element.as_mut(), attr, value)?;
    let parsed = get_parsed(element.as_ref(), attr)
        .with_context(|| format!("stored value of '{attr}' does not parse"))?;
    Ok((serialize(&parsed), warnings))
}

fn cmd_normalize(kind: ElementKind, attr: &str, value: &str) -> anyhow::Result<()> {
    let (canonical, warnings) = normalize(kind, attr, value)?;
    for warning in &warnings {
        eprintln!("[WARN] {}: {}", warning.attribute, warning.message);
    }
    println!("{canonical}");
    Ok(())
}

// ---------------------------------------------------------------------------
// attrs / schemes
// ---------------------------------------------------------------------------

fn cmd_attrs(kind: Option<ElementKind>) {
    let list: Vec<_> = match kind {
        Some(kind) => descriptors_for(kind).collect(),
        None => descriptors().iter().collect(),
    };
    for desc in list {
        let kinds: Vec<_> = desc.kinds.iter().map(ElementKind::as_str).collect();
        println!(
            "{:<16} {:<12} {:<34} {}",
            desc.name,
            desc.grammar.name(),
            kinds.join(","),
            desc.description
        );
    }
}

fn cmd_schemes(name: Option<&str>) -> anyhow::Result<()> {
    match name {
        Some(name) => {
            let Some(found) = scheme(name) else {
                bail!("Unknown color scheme '{name}'");
            };
            for entry in found.entries() {
                println!("{entry}");
            }
        }
        None => {
            for name in scheme_names() {
                println!("{name}");
            }
        }
    }
    Ok(())
}
