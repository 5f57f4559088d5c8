use serde::{Deserialize, Serialize};

/// Document returned by the external analysis engine.
///
/// Only its shape is checked (see [`super::validate`]); the content is
/// taken as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDocument {
    pub timeline: Vec<TimelineEvent>,
    pub anomalies: Vec<Anomaly>,
    pub clock_issues: Vec<ClockIssue>,
    pub causality_analysis: CausalityAnalysis,
    pub attention_priority: Vec<AttentionPriority>,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub service: String,
    /// What happened, in the engine's words
    #[serde(rename = "event", default)]
    pub description: String,
    #[serde(default)]
    pub confidence: Confidence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ambiguity_note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub issue: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Clock skew or timezone disagreement reported for one service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockIssue {
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub issue: String,
    #[serde(default, alias = "correction")]
    pub evidence: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CausalityAnalysis {
    #[serde(default)]
    pub probable_root_cause: String,
    /// Symptoms that look like the cause but are not
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub misleading_evidence: Option<String>,
    #[serde(default, alias = "causal_chain")]
    pub dependency_chain: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttentionPriority {
    #[serde(rename = "priority", default)]
    pub rank: u32,
    #[serde(default)]
    pub focus_area: String,
    #[serde(default)]
    pub reasoning: String,
}

impl AnalysisDocument {
    /// Is any anomaly of `severity` reported for `service`?
    pub fn flags(&self, service: &str, severity: Severity) -> bool {
        self.anomalies
            .iter()
            .any(|a| a.service == service && a.severity == severity)
    }
}
