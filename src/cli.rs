use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docsearch")]
#[command(about = "Build and upload search records for rendered documentation", long_about = None)]
pub struct Cli {
    /// Config file (defaults to <config dir>/docsearch/config.toml)
    #[arg(short, long, global = true, env = "DOCSEARCH_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value = "compact")]
    pub log_format: LogFormatArg,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Compact,
    Json,
}

/// Project and version being processed.
#[derive(clap::Args)]
pub struct VersionArgs {
    /// Project descriptor (TOML)
    #[arg(short, long)]
    pub project: PathBuf,
    /// Version slug
    #[arg(short = 'V', long = "version")]
    pub version_slug: String,
    /// Source branch; defaults to the version slug
    #[arg(short, long)]
    pub branch: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the records built from document files as JSON
    Records {
        #[command(flatten)]
        target: VersionArgs,
        /// Rendered document trees (JSON)
        #[arg(required = true)]
        documents: Vec<PathBuf>,
    },
    /// Build records and replace the search index contents
    Index {
        #[command(flatten)]
        target: VersionArgs,
        #[arg(required = true)]
        documents: Vec<PathBuf>,
        /// Use an in-memory index instead of the search service
        #[arg(long)]
        dry_run: bool,
    },
    /// Apply index settings and clear all records
    InitIndex,
    /// Run the API reference generator for a version
    Apidoc {
        #[command(flatten)]
        target: VersionArgs,
        /// Local repository checkout
        #[arg(long, default_value = ".")]
        repository_path: PathBuf,
        #[arg(long)]
        source: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long)]
        cache: PathBuf,
    },
}
