use anyhow::Context;
use clap::Parser;
use docsearch::cli::{Cli, Commands, LogFormatArg, VersionArgs};
use docsearch::config::{Config, api_key_from_env};
use docsearch::tracing::LogFormat;
use docsearch::{
    ApiDocBuild, ApiDocConfig, Document, HttpSearchIndex, MemoryIndex, Project, ProjectVersion,
    SearchIndex, VersionBatch,
};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    docsearch::tracing::init(match cli.log_format {
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    });

    let config = Config::load(cli.config.as_deref()).await?;

    // Ctrl-C abandons the batch in progress
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("Interrupted, cancelling");
                cancel.cancel();
            }
        });
    }

    match cli.command {
        Commands::Records { target, documents } => {
            let batch = load_batch(&target, &config).await?;
            let documents = load_documents(&documents).await?;
            let records = batch.build(documents, &cancel).await?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Commands::Index {
            target,
            documents,
            dry_run,
        } => {
            let batch = load_batch(&target, &config).await?;
            let documents = load_documents(&documents).await?;
            let summary = if dry_run {
                batch.index(&MemoryIndex::new(), documents, &cancel).await?
            } else {
                batch.index(&http_index(&config)?, documents, &cancel).await?
            };
            println!(
                "Indexed {} records from {} documents",
                summary.records, summary.documents
            );
        }
        Commands::InitIndex => {
            let index = http_index(&config)?;
            index.initialize().await?;
            println!("Initialized index '{}'", index.index_name());
        }
        Commands::Apidoc {
            target,
            repository_path,
            source,
            output,
            cache,
        } => {
            let (project, version) = load_target(&target).await?;
            let apidoc = ApiDocConfig::for_version(
                &project,
                &version,
                repository_path,
                source,
                output,
                cache,
            )?;
            ApiDocBuild::new(config.apidoc.command.clone(), config.apidoc.args.clone())
                .run(&apidoc)
                .await?;
        }
    }

    Ok(())
}

async fn load_target(target: &VersionArgs) -> anyhow::Result<(Project, ProjectVersion)> {
    let project = Project::load(&target.project).await?;
    let branch = target
        .branch
        .clone()
        .unwrap_or_else(|| target.version_slug.clone());
    Ok((project, ProjectVersion::new(target.version_slug.clone(), branch)))
}

async fn load_batch(target: &VersionArgs, config: &Config) -> anyhow::Result<VersionBatch> {
    let (project, version) = load_target(target).await?;
    Ok(VersionBatch::new(project, version).with_source_marker(&config.indexer.source_marker))
}

async fn load_documents(paths: &[PathBuf]) -> anyhow::Result<Vec<Document>> {
    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        documents.push(Document::load(path).await?);
    }
    tracing::info!(documents = documents.len(), "Loaded documents");
    Ok(documents)
}

fn http_index(config: &Config) -> anyhow::Result<HttpSearchIndex> {
    let endpoint = config.search.endpoint(api_key_from_env()?)?;
    HttpSearchIndex::new(endpoint).context("Failed to create search client")
}
