//! crdoc - browse Kubernetes CustomResourceDefinition schemas as documentation

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod context;
mod display;
mod error;
mod exit_codes;
mod util;

use commands::OutputFormat;
use context::Context;
use error::Result;

#[derive(Parser)]
#[command(name = "crdoc")]
#[command(version)]
#[command(about = "Browse Kubernetes CRD schemas as documentation", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// CRD cache database
    #[arg(long, global = true, env = "CRDOC_CACHE")]
    cache: Option<PathBuf>,

    /// Configuration file
    #[arg(long, global = true, env = "CRDOC_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Document a cached CRD
    Doc {
        /// Documentation path, e.g. github.com/org/repo/path/to/crd.yaml@tag
        path: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Tree)]
        format: OutputFormat,

        /// Deepest schema level to expand
        #[arg(long)]
        max_depth: Option<usize>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Document a local CRD file
    Show {
        /// CRD manifest (YAML or JSON)
        file: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Tree)]
        format: OutputFormat,

        /// Deepest schema level to expand
        #[arg(long)]
        max_depth: Option<usize>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the CRDs documented for a repository
    Org {
        /// Repository, e.g. org/repo@tag or host/org/repo
        repo: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Tree)]
        format: OutputFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Manage the CRD cache
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
}

#[derive(Subcommand)]
enum CacheCommands {
    /// Store a CRD (document key) or CRD listing (repository key)
    Add {
        /// Cache key, e.g. github.com/org/repo/crd.yaml@tag or org/repo@tag
        key: String,

        /// File to store
        file: PathBuf,
    },

    /// List cached entries
    List,

    /// Remove a cached entry
    Remove {
        /// Cache key
        key: String,
    },

    /// Show cache statistics
    Stats,
}

fn main() {
    miette::set_panic_hook();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            std::process::exit(exit_codes::USAGE_ERROR);
        }
    };

    init_tracing(cli.debug);

    if let Err(err) = run(cli) {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

/// Logs go to stderr; `RUST_LOG` applies unless `--debug` is set
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let ctx = Context::load(cli.cache, cli.config.as_deref())?;

    match cli.command {
        Commands::Doc {
            path,
            format,
            max_depth,
            output,
        } => commands::doc::run(&ctx, &path, format, max_depth, output.as_deref()),

        Commands::Show {
            file,
            format,
            max_depth,
            output,
        } => commands::show::run(&ctx, &file, format, max_depth, output.as_deref()),

        Commands::Org {
            repo,
            format,
            output,
        } => commands::org::run(&ctx, &repo, format, output.as_deref()),

        Commands::Cache { command } => match command {
            CacheCommands::Add { key, file } => commands::cache::add(&ctx, &key, &file),
            CacheCommands::List => commands::cache::list(&ctx),
            CacheCommands::Remove { key } => commands::cache::remove(&ctx, &key),
            CacheCommands::Stats => commands::cache::stats(&ctx),
        },
    }
}
