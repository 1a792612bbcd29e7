//! treeshape - snapshot a directory tree as JSON.
//!
//! Usage:
//!   treeshape [PATH]              Write <project>-structure.json for PATH
//!   treeshape -s [PATH]           Tree shape only, files map to null
//!   treeshape --stdout [PATH]     Print the JSON instead of writing a file
//!   treeshape --help              Show help

mod project;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::{Context, Result, bail};
use tracing::Level;

use treeshape_core::{MetadataMode, ScanConfig, ScanError, StructureTree};
use treeshape_scan::TreeScanner;

#[derive(Parser, Debug)]
#[command(
    name = "treeshape",
    version,
    about = "Snapshot a directory tree as JSON",
    long_about = "treeshape walks a directory and writes its structure to \
                  <project>-structure.json in the current directory.\n\n\
                  Hidden entries and anything matched by the root .gitignore \
                  are left out. Files carry size, type, lastModified and lines \
                  unless --simple is given."
)]
struct Cli {
    /// Path to scan (defaults to current directory)
    path: Option<PathBuf>,

    /// Omit file metadata; files are recorded as null (also accepts -simple)
    #[arg(short, long)]
    simple: bool,

    /// Write the snapshot here instead of <project>-structure.json
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the snapshot to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Rules file looked up at the scan root
    #[arg(long, value_name = "NAME", default_value = treeshape_core::DEFAULT_IGNORE_FILE)]
    ignore_file: String,

    /// Extra ignore pattern in gitignore syntax (repeatable)
    #[arg(short, long = "ignore", value_name = "PATTERN")]
    ignore: Vec<String>,

    /// Log skipped entries and scan progress
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    init_tracing(&cli);

    let cwd = std::env::current_dir().context("Cannot determine working directory")?;
    let target = match &cli.path {
        Some(path) => cwd.join(path),
        None => cwd.clone(),
    };

    if !target.exists() {
        bail!("Directory does not exist: {}", target.display());
    }
    let root = target.canonicalize().context("Invalid path")?;

    let config = ScanConfig::builder()
        .root(&root)
        .metadata(if cli.simple {
            MetadataMode::Simple
        } else {
            MetadataMode::Full
        })
        .ignore_file(cli.ignore_file.clone())
        .extra_ignore_patterns(cli.ignore.clone())
        .build()
        .map_err(|e| ScanError::InvalidConfig {
            message: e.to_string(),
        })?;

    status(&cli, format_args!("Scanning directory: {}", root.display()));

    let tree = TreeScanner::new().scan(&config).context("Scan failed")?;
    let json = serde_json::to_string_pretty(&tree.root)?;

    if cli.stdout {
        println!("{json}");
    } else {
        let output = match &cli.output {
            Some(path) => cwd.join(path),
            None => project::output_path(&cwd, &project::project_name(&root)),
        };
        write_snapshot(&output, &json)?;
        status(
            &cli,
            format_args!("Directory structure saved to: {}", output.display()),
        );
    }

    status(&cli, format_args!("{}", summary(&tree)));

    Ok(())
}

/// Accept the single-dash `-simple` spelling alongside `--simple`.
fn normalize_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| {
            if arg == "-simple" {
                OsString::from("--simple")
            } else {
                arg
            }
        })
        .collect()
}

fn init_tracing(cli: &Cli) {
    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Progress lines go to stderr when stdout carries the snapshot.
fn status(cli: &Cli, message: std::fmt::Arguments<'_>) {
    if cli.quiet {
        return;
    }
    if cli.stdout {
        eprintln!("{message}");
    } else {
        println!("{message}");
    }
}

fn write_snapshot(path: &Path, json: &str) -> Result<()> {
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// One-line scan summary.
fn summary(tree: &StructureTree) -> String {
    let stats = &tree.stats;
    let mut line = format!(
        "{} files, {} directories, {}",
        stats.total_files,
        stats.total_dirs,
        format_size(stats.total_size)
    );
    if stats.hidden_skipped + stats.ignored_skipped > 0 {
        line.push_str(&format!(
            " ({} hidden, {} ignored skipped)",
            stats.hidden_skipped, stats.ignored_skipped
        ));
    }
    if tree.has_warnings() {
        line.push_str(&format!(", {} warning(s) during scan", tree.warnings.len()));
    }
    line
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}
