use std::sync::LazyLock;
use regex::Regex;

use crate::parser::traits::*;

static WORKLOAD_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9_-]+-(?:deployment|pod)-[A-Za-z0-9_]+").expect("static regex")
});

static DEPLOYMENT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z0-9_-]+)-deployment").expect("static regex")
});

static POD_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z0-9_-]+)-pod").expect("static regex")
});

/// Orchestrator workload names such as `checkout-deployment-7f9c` or
/// `checkout-pod-x2k`. The suffix is stripped to recover the service.
pub struct OrchestrationStrategy;

impl ServiceStrategy for OrchestrationStrategy {
    fn matches(&self, line: &str) -> bool {
        WORKLOAD_NAME.is_match(line)
    }

    fn extract(&self, line: &str) -> Option<String> {
        DEPLOYMENT_PREFIX
            .captures(line)
            .or_else(|| POD_PREFIX.captures(line))
            .map(|caps| caps[1].to_string())
    }

    fn kind(&self) -> PatternKind {
        PatternKind::Orchestration
    }
}
