//! Line and stream parsing: raw text in, one `LogLine` per non-blank line out.

use std::collections::HashSet;
use serde::Serialize;

use super::detector::ServicePatternDetector;
use super::fields::{
    extract_level, extract_parent_span_id, extract_request_id, extract_span_id, extract_trace_id,
};
use super::timestamp::extract_timestamp;
use super::traits::*;

/// Result of parsing one stream.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedStream {
    pub logs: Vec<LogLine>,
    pub pattern: ServicePattern,
    /// Distinct service labels, in first-seen order
    pub services: Vec<String>,
}

impl ParsedStream {
    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.logs.len()
    }
}

/// Build one structured record from a raw line.
pub fn parse_line(raw: &str, line_number: usize, pattern: &ServicePattern) -> LogLine {
    LogLine {
        raw: raw.to_string(),
        line_number,
        timestamp: extract_timestamp(raw),
        service: pattern.service_for(raw),
        level: extract_level(raw),
        request_id: extract_request_id(raw),
        trace_id: extract_trace_id(raw),
        span_id: extract_span_id(raw),
        parent_span_id: extract_parent_span_id(raw),
    }
}

/// Stream parser with a configurable detection sample size.
///
/// Holds no per-stream state; one instance can parse any number of
/// streams, from any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct StreamParser {
    sample_size: usize,
}

impl StreamParser {
    pub fn new() -> Self {
        Self {
            sample_size: super::DETECTION_SAMPLE_SIZE,
        }
    }

    pub fn with_sample_size(sample_size: usize) -> Self {
        Self {
            sample_size: sample_size.max(1),
        }
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    pub fn parse(&self, content: &str) -> ParsedStream {
        // Blank lines are dropped before numbering
        let lines: Vec<&str> = content
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .collect();

        let sample = &lines[..lines.len().min(self.sample_size)];
        let pattern = ServicePatternDetector::new().detect(sample);

        let mut logs = Vec::with_capacity(lines.len());
        let mut services = Vec::new();
        let mut seen = HashSet::new();

        for (index, raw) in lines.iter().enumerate() {
            let log = parse_line(raw, index + 1, &pattern);
            if seen.insert(log.service.clone()) {
                services.push(log.service.clone());
            }
            logs.push(log);
        }

        tracing::debug!(
            lines = logs.len(),
            services = services.len(),
            pattern = %pattern.kind(),
            "parsed log stream"
        );

        ParsedStream { logs, pattern, services }
    }
}

impl Default for StreamParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an interleaved multi-service stream with the default sample size.
pub fn parse_stream(content: &str) -> ParsedStream {
    StreamParser::new().parse(content)
}
