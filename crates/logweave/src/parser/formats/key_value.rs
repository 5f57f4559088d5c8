use std::sync::LazyLock;
use regex::Regex;

use crate::parser::traits::*;

static SERVICE_KV: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bservice=([A-Za-z0-9_-]+)").expect("static regex")
});

/// `service=NAME` anywhere in the line (logfmt style).
pub struct KeyValueStrategy;

impl ServiceStrategy for KeyValueStrategy {
    fn matches(&self, line: &str) -> bool {
        SERVICE_KV.is_match(line)
    }

    fn extract(&self, line: &str) -> Option<String> {
        SERVICE_KV
            .captures(line)
            .map(|caps| caps[1].to_string())
    }

    fn kind(&self) -> PatternKind {
        PatternKind::KeyValue
    }
}
