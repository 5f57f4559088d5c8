//! Ingest: parse, optionally filter by request id, then group by service.
//!
//! This is the boundary where empty input and empty filter results become
//! user-visible errors instead of silently falling back to other data.

use std::collections::BTreeMap;
use serde::Serialize;
use thiserror::Error;

use crate::parser::{LogLine, PatternKind, ParsedStream, StreamParser};
use super::group::{filter_by_request_id, group_by_service};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IngestError {
    #[error("Missing or empty log content")]
    EmptyInput,

    #[error("No logs found for request_id={request_id}")]
    NoMatchingLogs { request_id: String },
}

/// Summary of one ingestion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestMetadata {
    pub total_logs: usize,
    pub analyzed_logs: usize,
    pub services: Vec<String>,
    pub pattern_type: PatternKind,
    pub request_id: Option<String>,
}

/// Parsed stream plus the selection handed on for analysis.
#[derive(Debug, Clone, Serialize)]
pub struct Prepared {
    pub stream: ParsedStream,
    /// Records selected by the request-id filter (all records when unfiltered)
    pub selected: Vec<LogLine>,
    /// Raw lines of `selected`, by service
    pub grouped: BTreeMap<String, Vec<String>>,
    pub metadata: IngestMetadata,
}

/// Run the pipeline with the default stream parser.
pub fn prepare(content: &str, request_id: Option<&str>) -> Result<Prepared, IngestError> {
    prepare_with(&StreamParser::new(), content, request_id)
}

pub fn prepare_with(
    parser: &StreamParser,
    content: &str,
    request_id: Option<&str>,
) -> Result<Prepared, IngestError> {
    if content.trim().is_empty() {
        return Err(IngestError::EmptyInput);
    }

    let stream = parser.parse(content);

    let selected: Vec<LogLine> = match request_id {
        Some(id) => {
            let filtered: Vec<LogLine> = filter_by_request_id(&stream.logs, id)
                .into_iter()
                .cloned()
                .collect();

            tracing::debug!(
                request_id = id,
                matched = filtered.len(),
                total = stream.len(),
                "filtered by request id"
            );

            if filtered.is_empty() {
                return Err(IngestError::NoMatchingLogs {
                    request_id: id.to_string(),
                });
            }
            filtered
        }
        None => stream.logs.clone(),
    };

    let grouped = group_by_service(&selected);

    let metadata = IngestMetadata {
        total_logs: stream.len(),
        analyzed_logs: selected.len(),
        services: stream.services.clone(),
        pattern_type: stream.pattern.kind(),
        request_id: request_id.map(str::to_string),
    };

    Ok(Prepared {
        stream,
        selected,
        grouped,
        metadata,
    })
}
