//! Per-line field extractors for severity and correlation identifiers.
//!
//! Every extractor is total: absence is `None`, never an error. Keys are
//! matched on a word boundary so `span_id=` does not fire inside
//! `parent_span_id=`.

use std::sync::LazyLock;
use regex::Regex;

use super::model::Level;

static LEVEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(TRACE|DEBUG|INFO|WARN|ERROR|FATAL|CRITICAL)\b").expect("static regex")
});

/// Request/correlation patterns in priority order. `trace_id` is accepted
/// here too, so a line's request id may equal its trace id.
static REQUEST_ID: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\breq_id=([A-Za-z0-9_-]+)",
        r"\brequest_id=([A-Za-z0-9_-]+)",
        r"\bcorrelation_id=([A-Za-z0-9_-]+)",
        r"\btrace_id=([A-Za-z0-9_-]+)",
        r#""request_id"\s*:\s*"([^"]+)""#,
        r#""correlation_id"\s*:\s*"([^"]+)""#,
        r#""trace_id"\s*:\s*"([^"]+)""#,
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static regex"))
    .collect()
});

static TRACE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\btrace_id=([A-Za-z0-9_-]+)").expect("static regex")
});

static SPAN_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bspan_id=([A-Za-z0-9_-]+)").expect("static regex")
});

static PARENT_SPAN_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bparent_span_id=([A-Za-z0-9_-]+)").expect("static regex")
});

/// First severity keyword in scan order, case-insensitive.
pub fn extract_level(line: &str) -> Option<Level> {
    LEVEL
        .captures(line)
        .and_then(|caps| Level::from_keyword(&caps[1]))
}

pub fn extract_request_id(line: &str) -> Option<String> {
    REQUEST_ID.iter().find_map(|re| capture(re, line))
}

pub fn extract_trace_id(line: &str) -> Option<String> {
    capture(&TRACE_ID, line)
}

pub fn extract_span_id(line: &str) -> Option<String> {
    capture(&SPAN_ID, line)
}

pub fn extract_parent_span_id(line: &str) -> Option<String> {
    capture(&PARENT_SPAN_ID, line)
}

fn capture(re: &Regex, line: &str) -> Option<String> {
    re.captures(line).map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_first_match_wins() {
        assert_eq!(extract_level("INFO retrying after ERROR"), Some(Level::Info));
    }

    #[test]
    fn level_lowercase_is_uppercased() {
        assert_eq!(extract_level("ts=1 level=warn msg=slow"), Some(Level::Warn));
        assert_eq!(extract_level("critical: disk full"), Some(Level::Critical));
    }

    #[test]
    fn level_requires_whole_word() {
        assert_eq!(extract_level("WARNING: deprecated"), None);
        assert_eq!(extract_level("information only"), None);
        assert_eq!(extract_level("errors=0"), None);
    }

    #[test]
    fn request_id_priority_order() {
        let line = "trace_id=t1 correlation_id=c1 request_id=r1 req_id=q1";
        assert_eq!(extract_request_id(line), Some("q1".to_string()));

        let line = "trace_id=t1 correlation_id=c1";
        assert_eq!(extract_request_id(line), Some("c1".to_string()));
    }

    #[test]
    fn request_id_falls_back_to_trace_id() {
        let line = "service=api trace_id=trace_8x9k2 span_id=s1";
        assert_eq!(extract_request_id(line), Some("trace_8x9k2".to_string()));
        assert_eq!(extract_trace_id(line), Some("trace_8x9k2".to_string()));
    }

    #[test]
    fn request_id_json_forms() {
        let line = r#"{"service":"api","request_id":"r-42","msg":"ok"}"#;
        assert_eq!(extract_request_id(line), Some("r-42".to_string()));

        let line = r#"{"correlation_id": "c 7"}"#;
        assert_eq!(extract_request_id(line), Some("c 7".to_string()));
    }

    #[test]
    fn request_id_key_value_beats_json() {
        let line = r#"req_id=kv {"request_id":"json"}"#;
        assert_eq!(extract_request_id(line), Some("kv".to_string()));
    }

    #[test]
    fn request_id_absent() {
        assert_eq!(extract_request_id("service=api hello"), None);
    }

    #[test]
    fn span_id_not_confused_with_parent() {
        let line = "parent_span_id=span-001 span_id=span-002";
        assert_eq!(extract_span_id(line), Some("span-002".to_string()));
        assert_eq!(extract_parent_span_id(line), Some("span-001".to_string()));
    }

    #[test]
    fn parent_only_line_has_no_span_id() {
        let line = "parent_span_id=span-001 msg=orphan";
        assert_eq!(extract_span_id(line), None);
        assert_eq!(extract_parent_span_id(line), Some("span-001".to_string()));
    }

    #[test]
    fn ids_stop_at_delimiters() {
        let line = "trace_id=abc-123,span_id=s_9;";
        assert_eq!(extract_trace_id(line), Some("abc-123".to_string()));
        assert_eq!(extract_span_id(line), Some("s_9".to_string()));
    }
}
