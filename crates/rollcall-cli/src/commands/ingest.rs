//! Ingest command implementation.

use super::open_store;
use crate::cli::IngestArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use rollcall_domain::traits::TableStore;
use rollcall_extractor::{Completer, CompletionClient, Pipeline, PipelineConfig};
use rollcall_llm::DeepseekProvider;
use std::fmt::Display;
use std::path::PathBuf;
use tracing::debug;

/// Execute the ingest command.
pub async fn execute_ingest(args: IngestArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let api_key = args
        .api_key
        .filter(|key| !key.trim().is_empty())
        .ok_or(CliError::MissingApiKey)?;

    let mut provider_config = config.provider.clone();
    if let Some(model) = args.model {
        provider_config.model = model;
    }
    if let Some(endpoint) = args.endpoint {
        provider_config.endpoint = endpoint;
    }

    debug!("Using model {} at {}", provider_config.model, provider_config.endpoint);
    let provider = DeepseekProvider::new(provider_config, api_key)?;

    let mut options = config.store.options;
    if args.no_lock {
        options.lock = false;
    }
    let store = open_store(args.out.as_deref(), options, config);

    let label = store.path().display().to_string();
    let output = run_ingest(
        CompletionClient::new(provider),
        store,
        &label,
        config.pipeline.clone(),
        &args.files,
        formatter,
    )
    .await?;

    println!("{}", output);
    Ok(())
}

/// Run the pipeline over `files` and render the batch report.
///
/// `label` names the table in the summary line.
pub async fn run_ingest<C, S>(
    completer: C,
    store: S,
    label: &str,
    pipeline_config: PipelineConfig,
    files: &[PathBuf],
    formatter: &Formatter,
) -> Result<String>
where
    C: Completer,
    S: TableStore,
    S::Error: Display,
{
    let pipeline = Pipeline::new(completer, store, pipeline_config)?;
    let report = pipeline.run(files).await?;
    formatter.format_report(&report, label)
}
