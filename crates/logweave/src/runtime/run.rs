//! Run: command execution. Each command returns the text to print on stdout.

use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use thiserror::Error;

use crate::analysis::{AnalysisDocument, AnalysisError, AnalysisRequest};
use crate::conf::{ConfigError, LogweaveConfig, OutputFormat};
use crate::logs::{prepare_with, request_ids, IngestError, Prepared};
use crate::parser::StreamParser;
use crate::trace::{render_tree, SpanTreeBuilder};

use super::cli::Commands;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", path.display())]
    Ingest {
        path: PathBuf,
        #[source]
        source: IngestError,
    },

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Ingestion task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

fn read(path: &Path) -> Result<String, RunError> {
    fs::read_to_string(path).map_err(|source| RunError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn ingest(path: &Path, parser: StreamParser, request_id: Option<&str>) -> Result<Prepared, RunError> {
    let content = read(path)?;
    prepare_with(&parser, &content, request_id).map_err(|source| RunError::Ingest {
        path: path.to_path_buf(),
        source,
    })
}

pub async fn execute(command: Commands, config: &LogweaveConfig) -> Result<String, RunError> {
    match command {
        Commands::Parse { files, request_id } => parse_files(files, request_id, config).await,
        Commands::Group { file, request_id } => group_file(&file, request_id.as_deref(), config),
        Commands::Spans {
            file,
            analysis,
            request_id,
        } => spans_file(&file, &analysis, request_id.as_deref(), config),
        Commands::Ids { file } => ids_file(&file, config),
    }
}

/// Ingest every file on the blocking pool; reports keep argument order.
pub async fn parse_files(
    files: Vec<PathBuf>,
    request_id: Option<String>,
    config: &LogweaveConfig,
) -> Result<String, RunError> {
    let parser = StreamParser::with_sample_size(config.sample_size);

    let jobs: Vec<_> = files
        .into_iter()
        .map(|path| {
            let request_id = request_id.clone();
            tokio::task::spawn_blocking(move || {
                let prepared = ingest(&path, parser, request_id.as_deref());
                (path, prepared)
            })
        })
        .collect();

    let mut reports = Vec::with_capacity(jobs.len());
    for job in jobs {
        let (path, prepared) = job.await?;
        let prepared = prepared?;
        tracing::info!(
            file = %path.display(),
            lines = prepared.metadata.total_logs,
            pattern = %prepared.metadata.pattern_type,
            "ingested"
        );
        reports.push((path, prepared));
    }

    match config.output {
        OutputFormat::Json => {
            let body: Vec<_> = reports
                .iter()
                .map(|(path, prepared)| {
                    json!({
                        "file": path.display().to_string(),
                        "metadata": prepared.metadata,
                        "logs": prepared.selected,
                    })
                })
                .collect();
            Ok(serde_json::to_string_pretty(&body)?)
        }
        OutputFormat::Text => {
            let mut out = String::new();
            for (path, prepared) in &reports {
                let meta = &prepared.metadata;
                let _ = writeln!(out, "{}", path.display());
                let _ = writeln!(out, "  pattern: {}", meta.pattern_type);
                let _ = writeln!(
                    out,
                    "  lines: {} total, {} analyzed",
                    meta.total_logs, meta.analyzed_logs
                );
                let _ = writeln!(out, "  services: {}", meta.services.join(", "));
                if let Some(id) = &meta.request_id {
                    let _ = writeln!(out, "  request_id: {}", id);
                }
            }
            Ok(out)
        }
    }
}

pub fn group_file(
    file: &Path,
    request_id: Option<&str>,
    config: &LogweaveConfig,
) -> Result<String, RunError> {
    let prepared = ingest(file, StreamParser::with_sample_size(config.sample_size), request_id)?;
    let request = AnalysisRequest::from_prepared(&prepared, config.context.clone());

    match config.output {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&request)?),
        OutputFormat::Text => Ok(request.render_log_sections()),
    }
}

pub fn spans_file(
    file: &Path,
    analysis: &Path,
    request_id: Option<&str>,
    config: &LogweaveConfig,
) -> Result<String, RunError> {
    let prepared = ingest(file, StreamParser::with_sample_size(config.sample_size), request_id)?;
    let document = AnalysisDocument::from_response_text(&read(analysis)?)?;

    let view = SpanTreeBuilder::new(config.orphan_policy)
        .with_logs(&prepared.selected)
        .build(&document);

    match config.output {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&view)?),
        OutputFormat::Text => Ok(render_tree(&view)),
    }
}

pub fn ids_file(file: &Path, config: &LogweaveConfig) -> Result<String, RunError> {
    let prepared = ingest(file, StreamParser::with_sample_size(config.sample_size), None)?;
    let ids = request_ids(&prepared.stream.logs);

    match config.output {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&ids)?),
        OutputFormat::Text => Ok(ids.iter().map(|id| format!("{}\n", id)).collect()),
    }
}
