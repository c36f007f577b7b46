//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use docfill_core::{PlaceholderMap, ReplaceMode, Rgb, StyleOverride};
use docfill_ooxml::{fill_document, scan_document, DocxArchive, Substitutor};

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for tool consumption
    Json,
}

#[derive(Parser)]
#[command(name = "docfill")]
#[command(author, version, about = "Fill DOCX placeholder templates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace placeholders in a DOCX file and save the result
    Fill {
        /// Input DOCX file
        input: PathBuf,

        /// Output DOCX file
        #[arg(short, long)]
        output: PathBuf,

        /// TOML file with a table of placeholder = "value" pairs
        #[arg(long)]
        values: Option<PathBuf>,

        /// Single placeholder value; repeatable, wins over --values
        #[arg(long = "set", value_name = "TOKEN=VALUE")]
        set: Vec<String>,

        /// Font family for replaced text (ascii, hAnsi and eastAsia)
        #[arg(long)]
        font: Option<String>,

        /// Font size in points for replaced text
        #[arg(long)]
        size: Option<f32>,

        /// Font color for replaced text, RRGGBB hex
        #[arg(long)]
        color: Option<String>,

        /// Replace every occurrence instead of the first match only
        #[arg(long)]
        all: bool,

        /// Report format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Exit with an error code if any placeholder was not found
        #[arg(long)]
        strict: bool,
    },

    /// List the placeholder tokens a DOCX file contains
    Scan {
        /// Input DOCX file
        input: PathBuf,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    // RUST_LOG controls verbosity; stdout stays clean for reports
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fill {
            input,
            output,
            values,
            set,
            font,
            size,
            color,
            all,
            format,
            strict,
        } => fill_command(
            &input, &output, values.as_deref(), &set, font, size, color, all, format, strict,
        ),
        Commands::Scan { input, format } => scan_command(&input, format),
    }
}

#[allow(clippy::too_many_arguments)]
fn fill_command(
    input: &Path,
    output: &Path,
    values_file: Option<&Path>,
    set: &[String],
    font: Option<String>,
    size: Option<f32>,
    color: Option<String>,
    all: bool,
    format: OutputFormat,
    strict: bool,
) -> Result<()> {
    let mut values = match values_file {
        Some(path) => load_values(path)?,
        None => PlaceholderMap::new(),
    };
    for pair in set {
        let (token, value) = parse_set_pair(pair)?;
        values.insert(token, value);
    }
    if values.is_empty() {
        bail!("no placeholder values given; use --values <file.toml> or --set TOKEN=VALUE");
    }

    let mut substitutor = Substitutor::new(values);
    if let Some(style) = build_style(font, size, color)? {
        substitutor = substitutor.with_style(style);
    }
    if all {
        substitutor = substitutor.with_mode(ReplaceMode::EveryOccurrence);
    }

    let report = fill_document(input, output, &substitutor)
        .with_context(|| format!("Failed to fill '{}'", input.display()))?;

    match format {
        OutputFormat::Text => println!("{report}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if strict && !report.is_complete() {
        bail!("{} placeholder(s) not found in the document", report.missing);
    }
    Ok(())
}

fn scan_command(input: &Path, format: OutputFormat) -> Result<()> {
    let archive = DocxArchive::open(input)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;
    let found = scan_document(&archive)?;

    match format {
        OutputFormat::Text => {
            if found.is_empty() {
                println!("no placeholders found");
            } else {
                for placeholder in &found {
                    println!("{}: {}", placeholder.token, placeholder.location);
                }
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&found)?),
    }
    Ok(())
}

/// Load a placeholder map from a TOML table of string pairs.
///
/// File order is preserved, which keeps first-match-wins reproducible
/// from the operator's point of view.
pub fn load_values(path: &Path) -> Result<PlaceholderMap> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read values file '{}'", path.display()))?;
    let table: toml::Table = text
        .parse()
        .with_context(|| format!("Invalid TOML in '{}'", path.display()))?;

    let mut values = PlaceholderMap::new();
    for (token, value) in table {
        match value {
            toml::Value::String(s) => values.insert(token, s),
            other => bail!(
                "value for '{token}' must be a string, got {}",
                other.type_str()
            ),
        }
    }
    Ok(values)
}

/// Parse a `--set TOKEN=VALUE` argument
pub fn parse_set_pair(pair: &str) -> Result<(String, String)> {
    match pair.split_once('=') {
        Some((token, value)) if !token.is_empty() => Ok((token.to_string(), value.to_string())),
        _ => bail!("expected TOKEN=VALUE, got '{pair}'"),
    }
}

fn build_style(
    font: Option<String>,
    size: Option<f32>,
    color: Option<String>,
) -> Result<Option<StyleOverride>> {
    if font.is_none() && size.is_none() && color.is_none() {
        return Ok(None);
    }
    let mut style = StyleOverride::new();
    style.font_name = font;
    style.size_pt = size;
    if let Some(hex) = color {
        let rgb: Rgb = hex.parse().context("invalid --color value")?;
        style.color = Some(rgb);
    }
    Ok(Some(style))
}
