//! ydiff - Semantic YAML/JSON diff CLI tool
//!
//! Compares two configuration documents by content and prints one line per
//! point of divergence.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use semantic_yaml_diff::value::{self, Value};
use semantic_yaml_diff::{DiffOptions, Differ, MismatchPath, Side};

/// Compare two YAML/JSON documents semantically.
#[derive(Debug, Parser)]
#[command(name = "ydiff", version, about)]
struct Cli {
    /// Left-hand document
    left: PathBuf,

    /// Right-hand document
    right: PathBuf,

    /// Input format of both documents
    #[arg(short, long, value_enum, default_value_t = Format::Auto)]
    format: Format,

    /// Fail instead of descending deeper than this many nested containers
    #[arg(long)]
    max_depth: Option<usize>,

    /// YAML file with diff options (flags take precedence)
    #[arg(long)]
    options: Option<PathBuf>,

    /// Print the value each side holds at every mismatch
    #[arg(long)]
    show_values: bool,

    /// Output location. Use '-' for stdout
    #[arg(short, long, default_value = "-")]
    output: String,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Pick by file extension; anything but .json is read as YAML
    Auto,
    Yaml,
    Json,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "ydiff=debug,semantic_yaml_diff=debug" } else { "ydiff=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false),
        )
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

/// Returns whether the documents are identical.
fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let options = load_options(&cli)?;
    debug!(?options, "resolved diff options");

    let left = load_document(&cli.left, cli.format)?;
    let right = load_document(&cli.right, cli.format)?;

    let paths = Differ::new(options).diff(&left, &right)?;

    let mut output: Box<dyn Write> = if cli.output == "-" {
        Box::new(io::stdout())
    } else {
        Box::new(
            fs::File::create(&cli.output)
                .map_err(|e| format!("Failed to create output file {:?}: {}", cli.output, e))?,
        )
    };

    for path in &paths {
        writeln!(output, "{}", path)?;
        if cli.show_values {
            write_values(&mut output, path, &left, &right)?;
        }
    }
    output.flush()?;

    Ok(paths.is_empty())
}

fn load_options(cli: &Cli) -> Result<DiffOptions, Box<dyn std::error::Error>> {
    let mut options = match &cli.options {
        Some(file) => {
            let content = fs::read_to_string(file)
                .map_err(|e| format!("Failed to read options file {:?}: {}", file, e))?;
            DiffOptions::from_yaml(&content)
                .map_err(|e| format!("Failed to parse options file {:?}: {}", file, e))?
        }
        None => DiffOptions::default(),
    };
    if let Some(max_depth) = cli.max_depth {
        options.max_depth = Some(max_depth);
    }
    Ok(options)
}

fn load_document(file: &Path, format: Format) -> Result<Value, Box<dyn std::error::Error>> {
    let content =
        fs::read_to_string(file).map_err(|e| format!("Failed to read file {:?}: {}", file, e))?;

    let is_json = match format {
        Format::Json => true,
        Format::Yaml => false,
        Format::Auto => file.extension().is_some_and(|ext| ext == "json"),
    };
    debug!(file = %file.display(), json = is_json, "parsing document");

    let parsed = if is_json {
        value::from_json(&content).map_err(|e| e.to_string())
    } else {
        value::from_yaml(&content).map_err(|e| e.to_string())
    };
    parsed.map_err(|e| format!("Failed to parse {:?}: {}", file, e).into())
}

fn write_values(
    output: &mut dyn Write,
    path: &MismatchPath,
    left: &Value,
    right: &Value,
) -> io::Result<()> {
    for (label, side, root) in [("left", Side::Left, left), ("right", Side::Right, right)] {
        match path.resolve(root, side) {
            Some(v) => writeln!(output, "  {}: {}", label, v)?,
            None => writeln!(output, "  {}: <absent>", label)?,
        }
    }
    Ok(())
}
