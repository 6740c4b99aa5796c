//! Command-line interface for skillgather.
//!
//! Takes a local skill directory or a Git URL, gathers its files and prints the
//! security review report (or writes it to a file).

use clap::{Parser, ValueEnum};
use skillgather::{GatherBuilder, GatherError, GitCloner, gather, is_remote_url, output};
use std::path::PathBuf;
use std::process::exit;

/// skillgather: gather skill files for security review
#[derive(Parser)]
#[command(name = "skillgather", version, about, long_about = None)]
struct Cli {
    /// Path to the skill directory or a remote Git URL
    skill_path: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Indent JSON output
    #[arg(short, long)]
    pretty: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for output::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => output::OutputFormat::Text,
            OutputFormat::Json => output::OutputFormat::Json,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    #[cfg(feature = "logging")]
    init_logging();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        exit(1);
    }
}

#[cfg(feature = "logging")]
fn init_logging() {
    use tracing_subscriber::EnvFilter;
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Canonical path if it exists, otherwise just made absolute.
fn local_root(value: &str) -> PathBuf {
    let path = PathBuf::from(value);
    std::fs::canonicalize(&path)
        .or_else(|_| std::path::absolute(&path))
        .unwrap_or(path)
}

fn run(cli: Cli) -> Result<(), GatherError> {
    // Dropping the checkout at the end of this function deletes it.
    let checkout = if is_remote_url(&cli.skill_path) {
        eprintln!("Cloning remote repository: {}", cli.skill_path);
        Some(GitCloner::new().fetch(&cli.skill_path)?)
    } else {
        None
    };

    let root = match &checkout {
        Some(repo) => repo.path().to_path_buf(),
        None => local_root(&cli.skill_path),
    };
    let options = GatherBuilder::new(root)
        .source_url(checkout.as_ref().map(|repo| repo.url().to_string()))
        .build();
    let result = gather(options);

    let format: output::OutputFormat = cli.format.into();
    match &cli.output {
        Some(path) => {
            output::write_result_to_file(&result, format, path, cli.pretty)?;
            eprintln!("Output written to: {}", path.display());
        }
        None => {
            let rendered = output::format_result(&result, format, cli.pretty)?;
            println!("{}", rendered.trim_end_matches('\n'));
        }
    }
    Ok(())
}
