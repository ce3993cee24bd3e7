//! DsDoc CLI - documentation generator for DsDoc annotated sources

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use dsdoc_core::doc::Format;
use dsdoc_core::{DocParser, Extractor};

mod collect;
mod config;

use collect::collect_source_files;
use config::Config;

#[derive(Parser)]
#[command(name = "dsdoc")]
#[command(version = dsdoc_core::VERSION)]
#[command(about = "Generate DsLink documentation from DsDoc comments", long_about = None)]
struct Cli {
    /// Directory (or single file) to scan
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Output format: md, text or json
    #[arg(short = 't', long)]
    format: Option<Format>,

    /// Output file, `-` for stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file (defaults to dsdoc.toml in PATH)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Comment prefix that marks documentation lines
    #[arg(long)]
    prefix: Option<String>,

    /// Stop at the first rejected batch
    #[arg(long)]
    strict: bool,

    /// More log output (repeatable)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// File configuration with command-line overrides applied
    fn config(&self) -> Result<Config> {
        let mut config = Config::discover(self.config.as_deref(), &self.path)
            .context("Failed to load configuration")?;
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(output) = &self.output {
            config.output.clone_from(output);
        }
        if let Some(prefix) = &self.prefix {
            config.prefix.clone_from(prefix);
        }
        config.strict |= self.strict;
        config.validate()?;
        Ok(config)
    }
}

/// Counts reported after a run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Summary {
    files: usize,
    batches: usize,
    rejected: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config = cli.config()?;
    let (content, summary) = generate_documentation(&cli.path, &config)?;
    write_output(&config.output, &content)?;

    info!(
        files = summary.files,
        batches = summary.batches,
        rejected = summary.rejected,
        "documentation generated"
    );
    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let default = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Scan `path`, parse every batch and render the linked tree
///
/// Rejected batches are logged and skipped unless the configuration is strict.
/// Linking errors are always fatal.
fn generate_documentation(path: &Path, config: &Config) -> Result<(String, Summary)> {
    let files = collect_source_files(path, config)?;
    let extractor = Extractor::new(config.prefix.as_str());
    let mut parser = DocParser::new();
    let mut summary = Summary::default();

    for file in &files {
        let text = match std::fs::read_to_string(file) {
            Ok(text) => text,
            Err(err) => {
                warn!(file = %file.display(), error = %err, "skipping unreadable file");
                continue;
            }
        };
        summary.files += 1;

        let source = file.display().to_string();
        let batches = extractor.extract(&source, &text);
        debug!(file = %source, batches = batches.len(), "scanned");

        for batch in &batches {
            summary.batches += 1;
            if let Err(err) = parser.parse_batch(batch) {
                if config.strict {
                    return Err(err).context("Batch rejected in strict mode");
                }
                summary.rejected += 1;
                warn!("{err}");
            }
        }
    }

    let tree = parser.finalize().context("Failed to link documentation tree")?;
    Ok((config.format.render(&tree), summary))
}

fn write_output(output: &Path, content: &str) -> Result<()> {
    if output == Path::new("-") {
        print!("{content}");
        return Ok(());
    }
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create '{}'", parent.display()))?;
    }
    std::fs::write(output, content)
        .with_context(|| format!("Failed to write '{}'", output.display()))?;
    info!(output = %output.display(), "wrote documentation");
    Ok(())
}
