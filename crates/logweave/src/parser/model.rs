use std::fmt;
use serde::{Serialize, Deserialize};

use super::traits::ServiceStrategy;

/// Service label for a line the selected strategy could not attribute.
pub const UNKNOWN_SERVICE_LINE: &str = "unknown";

/// Service label assigned to every line when no strategy matched the sample.
pub const UNKNOWN_SERVICE_STREAM: &str = "unknown-service";

/// Severity vocabulary recognised by the level extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Critical,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
            Level::Critical => "CRITICAL",
        }
    }

    /// Case-insensitive lookup of a bare level keyword.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word.to_ascii_uppercase().as_str() {
            "TRACE" => Some(Level::Trace),
            "DEBUG" => Some(Level::Debug),
            "INFO" => Some(Level::Info),
            "WARN" => Some(Level::Warn),
            "ERROR" => Some(Level::Error),
            "FATAL" => Some(Level::Fatal),
            "CRITICAL" => Some(Level::Critical),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structured record per non-blank input line.
///
/// Produced once by the stream parser and never mutated afterwards.
/// `line_number` is the only totally ordered key: timestamps may be
/// missing, malformed, or skewed between services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogLine {
    /// Original line text, verbatim
    pub raw: String,

    /// 1-based position among the non-blank lines of the stream
    pub line_number: usize,

    /// Normalized timestamp text, if a recognised form was found
    pub timestamp: Option<String>,

    pub service: String,

    pub level: Option<Level>,

    /// Request/correlation id (may equal `trace_id` when only `trace_id=` is present)
    pub request_id: Option<String>,

    pub trace_id: Option<String>,

    pub span_id: Option<String>,

    pub parent_span_id: Option<String>,
}

/// Which service-encoding convention was selected for a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// `service=NAME` anywhere in the line
    KeyValue,
    /// JSON object lines with a `service`/`service_name`/`app` field
    Json,
    /// `[name] ...` at line start
    Bracketed,
    /// Orchestrator naming: `name-deployment-xyz` / `name-pod-xyz`
    Orchestration,
    /// Nothing matched the sample
    Unknown,
}

impl PatternKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::KeyValue => "key_value",
            PatternKind::Json => "json",
            PatternKind::Bracketed => "bracketed",
            PatternKind::Orchestration => "orchestration",
            PatternKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The strategy chosen for a stream, bound to its per-line extractor.
///
/// Selected once from the sample prefix and then applied to every line,
/// including lines that would have triggered a different strategy alone.
#[derive(Clone, Copy)]
pub struct ServicePattern {
    strategy: &'static dyn ServiceStrategy,
}

impl ServicePattern {
    pub(crate) fn new(strategy: &'static dyn ServiceStrategy) -> Self {
        Self { strategy }
    }

    pub fn kind(&self) -> PatternKind {
        self.strategy.kind()
    }

    /// Run the bound extractor on one line. `None` means this line carries
    /// no service under the selected convention.
    pub fn extract(&self, line: &str) -> Option<String> {
        self.strategy.extract(line)
    }

    /// Service label for a line, falling back to [`UNKNOWN_SERVICE_LINE`].
    pub fn service_for(&self, line: &str) -> String {
        self.extract(line)
            .unwrap_or_else(|| UNKNOWN_SERVICE_LINE.to_string())
    }
}

impl fmt::Debug for ServicePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServicePattern")
            .field("kind", &self.kind())
            .finish()
    }
}

impl PartialEq for ServicePattern {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind()
    }
}

impl Eq for ServicePattern {}

impl Serialize for ServicePattern {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.kind().serialize(serializer)
    }
}
