pub use super::model::{LogLine, Level, PatternKind, ServicePattern};

/// One entry in the service-detection catalog: a trigger evaluated against
/// the sample, paired with the extractor applied to every line once chosen.
pub trait ServiceStrategy: Send + Sync {
    /// Does this sampled line show the convention?
    fn matches(&self, line: &str) -> bool;

    /// Pull the service name out of a line, or `None` if it has none.
    fn extract(&self, line: &str) -> Option<String>;

    fn kind(&self) -> PatternKind;
}
