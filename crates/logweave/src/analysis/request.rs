use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

use crate::logs::Prepared;

/// Free-text context forwarded to the analysis engine alongside the logs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisContext {
    pub architecture: Option<String>,
    pub user_context: Option<String>,
    pub expected_behavior: Option<String>,
    /// Time window of interest, as the user wrote it
    pub time_window: Option<String>,
}

/// Payload handed to the external analysis engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    pub grouped_logs: BTreeMap<String, Vec<String>>,
    #[serde(flatten)]
    pub context: AnalysisContext,
}

impl AnalysisRequest {
    pub fn new(grouped_logs: BTreeMap<String, Vec<String>>, context: AnalysisContext) -> Self {
        Self { grouped_logs, context }
    }

    pub fn from_prepared(prepared: &Prepared, context: AnalysisContext) -> Self {
        Self::new(prepared.grouped.clone(), context)
    }

    /// Per-service log blocks:
    ///
    /// ```text
    /// === api-gateway ===
    /// line 1
    /// line 2
    /// ```
    pub fn render_log_sections(&self) -> String {
        let mut out = String::new();
        for (service, lines) in &self.grouped_logs {
            out.push_str("\n=== ");
            out.push_str(service);
            out.push_str(" ===\n");
            out.push_str(&lines.join("\n"));
            out.push('\n');
        }
        out
    }
}
