//! Pipeline driver: files in, merged table out

use crate::client::Completer;
use crate::config::PipelineConfig;
use crate::error::{CompletionError, ExtractorError};
use crate::types::{BatchReport, FileFailure, FileOutcome};
use chrono::{DateTime, SubsecRound, Utc};
use rollcall_domain::traits::TableStore;
use rollcall_domain::{normalize, NormalizedRecord, PersonRecord};
use rollcall_reader::DocumentFormat;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Runs extraction, completion and normalization per file, then one upsert
///
/// Files are processed one at a time in input order. A failure in any stage
/// is recorded against that file and the batch continues. Only a failed
/// table write, or a batch in which no path names a usable input, fails the
/// run as a whole.
pub struct Pipeline<C, S> {
    completer: C,
    store: S,
    config: PipelineConfig,
}

impl<C, S> Pipeline<C, S>
where
    C: Completer,
    S: TableStore,
    S::Error: Display,
{
    /// Create a pipeline, validating `config`
    pub fn new(completer: C, store: S, config: PipelineConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        Ok(Self {
            completer,
            store,
            config,
        })
    }

    /// The completer
    pub fn completer(&self) -> &C {
        &self.completer
    }

    /// The table store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Process `paths` and merge the results with the current time
    pub async fn run(&self, paths: &[PathBuf]) -> Result<BatchReport, ExtractorError> {
        self.run_at(paths, Utc::now()).await
    }

    /// Process `paths` and merge the results at `now`
    ///
    /// `now` is truncated to whole seconds so the stored timestamp reads back
    /// unchanged.
    pub async fn run_at(&self, paths: &[PathBuf], now: DateTime<Utc>) -> Result<BatchReport, ExtractorError> {
        let now = now.trunc_subsecs(0);
        info!("Processing {} file(s)", paths.len());

        let mut report = BatchReport::default();
        let mut batch: Vec<NormalizedRecord> = Vec::new();

        for path in paths {
            report.files_processed += 1;
            match self.process_file(path).await {
                Ok(records) => {
                    info!("{}: {} record(s)", path.display(), records.len());
                    report.outcomes.push(FileOutcome {
                        path: path.clone(),
                        records: records.len(),
                    });
                    batch.extend(records);
                }
                Err(error) => {
                    warn!("{}: {}", path.display(), error);
                    report.failures.push(FileFailure::new(path.clone(), error));
                }
            }
        }

        if report.outcomes.is_empty() && report.failures.iter().all(|f| f.error.is_unresolved_input()) {
            return Err(ExtractorError::NoInputs {
                failures: report.failures,
            });
        }

        let outcome = self
            .store
            .merge(&batch, now)
            .map_err(|e| ExtractorError::Persist(e.to_string()))?;

        report.records_merged = batch.len();
        report.row_count = outcome.rows.len();
        report.inserted = outcome.inserted;
        report.updated = outcome.updated;

        info!(
            "Batch complete: {}/{} file(s) succeeded, {} inserted, {} updated, {} row(s)",
            report.files_succeeded(),
            report.files_processed,
            report.inserted.len(),
            report.updated.len(),
            report.row_count
        );

        Ok(report)
    }

    /// Extract, complete and normalize a single file
    async fn process_file(&self, path: &Path) -> Result<Vec<NormalizedRecord>, ExtractorError> {
        let format = DocumentFormat::from_path(path)?;
        let text = rollcall_reader::extract_as(path, format)?;

        let chars = text.chars().count();
        if chars > self.config.max_text_length {
            return Err(ExtractorError::TextTooLong {
                chars,
                max: self.config.max_text_length,
            });
        }

        if text.trim().is_empty() {
            info!("{}: no text found, skipping completion", path.display());
            return Ok(Vec::new());
        }

        let raw = self.complete_with_retry(path, &text).await?;
        let records = normalize(&raw);
        if records.len() < raw.len() {
            debug!(
                "{}: dropped {} record(s) without a name",
                path.display(),
                raw.len() - records.len()
            );
        }

        Ok(records)
    }

    /// Call the completer under the per-call timeout, retrying service errors
    async fn complete_with_retry(
        &self,
        path: &Path,
        text: &str,
    ) -> Result<Vec<PersonRecord>, ExtractorError> {
        let limit = self.config.completion_timeout();
        let mut attempt = 0;

        loop {
            let result = match timeout(limit, self.completer.complete(text)).await {
                Ok(result) => result,
                Err(_) => Err(CompletionError::Service {
                    status: None,
                    message: format!("Completion timed out after {}s", limit.as_secs()),
                }),
            };

            match result {
                Err(e) if e.is_retryable() && attempt < self.config.service_retries => {
                    let backoff = self.config.retry_backoff(attempt);
                    attempt += 1;
                    warn!(
                        "{}: {} (retry {}/{} in {:?})",
                        path.display(),
                        e,
                        attempt,
                        self.config.service_retries,
                        backoff
                    );
                    tokio::time::sleep(backoff).await;
                }
                other => return other.map_err(ExtractorError::from),
            }
        }
    }
}
