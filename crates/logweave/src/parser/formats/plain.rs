use crate::parser::traits::*;
use crate::parser::model::UNKNOWN_SERVICE_STREAM;

/// Fallback when nothing in the sample identifies a service.
/// Always matches; labels every line `unknown-service`.
pub struct UnknownStrategy;

impl ServiceStrategy for UnknownStrategy {
    fn matches(&self, _line: &str) -> bool {
        true
    }

    fn extract(&self, _line: &str) -> Option<String> {
        Some(UNKNOWN_SERVICE_STREAM.to_string())
    }

    fn kind(&self) -> PatternKind {
        PatternKind::Unknown
    }
}
