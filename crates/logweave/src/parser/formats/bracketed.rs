use std::sync::LazyLock;
use regex::Regex;

use crate::parser::traits::*;

static BRACKET_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[([A-Za-z0-9_-]+)\]").expect("static regex")
});

/// `[service-name] message` at the very start of the line.
pub struct BracketedStrategy;

impl ServiceStrategy for BracketedStrategy {
    fn matches(&self, line: &str) -> bool {
        BRACKET_PREFIX.is_match(line)
    }

    fn extract(&self, line: &str) -> Option<String> {
        BRACKET_PREFIX
            .captures(line)
            .map(|caps| caps[1].to_string())
    }

    fn kind(&self) -> PatternKind {
        PatternKind::Bracketed
    }
}
