use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use jpath::config::Config;
use jpath::document::tree::Lookup;
use jpath::file::loader::{build_document, read_source_file, read_source_from_stdin, LoadedDocument};

/// jpath - Look up values in JSON documents by path
#[derive(Parser)]
#[command(name = "jpath")]
#[command(version)]
#[command(about = "Look up values in JSON documents by path", long_about = None)]
struct Cli {
    /// Paths to look up, e.g. labels.level_1.tag_name or items[0]
    #[arg(required = true)]
    paths: Vec<String>,

    /// JSON file to read, .gz files are decompressed (omit to read stdin)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Path separator (overrides the config file)
    #[arg(short, long)]
    separator: Option<String>,

    /// Expand every JSON-encoded string before looking anything up
    #[arg(long)]
    eager: bool,

    /// How to print each value
    #[arg(short = 't', long = "as", value_enum, default_value_t = OutputKind::Json)]
    output: OutputKind,

    /// Config file (default: ~/.config/jpath/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputKind {
    /// The value as compact JSON; failed lookups are reported
    Json,
    /// The string value, or an empty line
    String,
    /// The integral value, or 0
    Int,
    /// The numeric value, or 0
    Float,
}

fn init_logging(config: &Config, verbose: bool) {
    let fallback = if verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

/// Prints one line per path and returns how many lookups failed.
///
/// Only the JSON output reports failures; the typed outputs print zero values.
fn run_lookups<L: Lookup>(
    document: &L,
    paths: &[String],
    output: OutputKind,
    render: impl Fn(&L::Node) -> String,
) -> Result<usize> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failures = 0;

    for path in paths {
        match output {
            OutputKind::Json => match document.find(path) {
                Ok(node) => writeln!(out, "{}", render(node))?,
                Err(err) => {
                    failures += 1;
                    tracing::debug!(path = path.as_str(), kind = ?err.kind(), "lookup failed");
                    eprintln!("{}: {}", path, err);
                }
            },
            OutputKind::String => writeln!(out, "{}", document.find_string(path))?,
            OutputKind::Int => writeln!(out, "{}", document.find_i64(path))?,
            OutputKind::Float => writeln!(out, "{}", document.find_f64(path))?,
        }
    }

    out.flush().context("Failed to write output")?;
    Ok(failures)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config problems are reported once logging is up.
    let (mut config, config_error) = match cli.config.clone().or_else(Config::config_path) {
        Some(path) => match Config::try_load_from(&path) {
            Ok(config) => (config, None),
            Err(err) => (Config::default(), Some(err)),
        },
        None => (Config::default(), None),
    };
    if let Some(separator) = &cli.separator {
        config.separator = separator.clone();
    }
    if cli.eager {
        config.eager = true;
    }

    init_logging(&config, cli.verbose);
    if let Some(err) = config_error {
        tracing::warn!("{:#}, using defaults", err);
    }

    let source = match &cli.file {
        Some(path) => read_source_file(path)?,
        None => {
            if io::stdin().is_terminal() {
                anyhow::bail!("No input: pass --file or pipe a JSON document to stdin");
            }
            read_source_from_stdin()?
        }
    };

    let document = build_document(&source, &config)?;
    let failures = match &document {
        LoadedDocument::Lazy(jpath) => {
            run_lookups(jpath, &cli.paths, cli.output, |node| node.to_node().to_string())?
        }
        LoadedDocument::Shared(jpath) => {
            run_lookups(jpath, &cli.paths, cli.output, |node| node.to_string())?
        }
    };

    if failures > 0 {
        anyhow::bail!("{} of {} lookups failed", failures, cli.paths.len());
    }
    Ok(())
}
