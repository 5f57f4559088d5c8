//! Structural validation of analysis-engine responses.
//!
//! The engine's reply is plain text that should hold one JSON document.
//! Code fences are stripped, then every required top-level field is checked
//! for presence and type before the document is used for span
//! reconstruction. Partial documents are refused.

use serde_json::Value;
use thiserror::Error;

use super::model::AnalysisDocument;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Invalid analysis response: {0}")]
    InvalidResponse(String),

    #[error("Analysis response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy)]
enum Shape {
    Array,
    Object,
    String,
}

impl Shape {
    fn accepts(&self, value: &Value) -> bool {
        match self {
            Shape::Array => value.is_array(),
            Shape::Object => value.is_object(),
            Shape::String => value.is_string(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Shape::Array => "an array",
            Shape::Object => "an object",
            Shape::String => "a string",
        }
    }
}

const REQUIRED_FIELDS: [(&str, Shape); 6] = [
    ("timeline", Shape::Array),
    ("anomalies", Shape::Array),
    ("clock_issues", Shape::Array),
    ("causality_analysis", Shape::Object),
    ("attention_priority", Shape::Array),
    ("summary", Shape::String),
];

/// Check that every required top-level field is present with the right type.
pub fn validate_structure(value: &Value) -> Result<(), AnalysisError> {
    let obj = value
        .as_object()
        .ok_or_else(|| AnalysisError::InvalidResponse("response is not a JSON object".into()))?;

    for (field, shape) in REQUIRED_FIELDS {
        match obj.get(field) {
            None => {
                return Err(AnalysisError::InvalidResponse(format!("missing field `{}`", field)));
            }
            Some(v) if !shape.accepts(v) => {
                return Err(AnalysisError::InvalidResponse(format!(
                    "field `{}` must be {}",
                    field,
                    shape.name()
                )));
            }
            Some(_) => {}
        }
    }
    Ok(())
}

/// Remove markdown code fences (```json ... ```) around a reply.
pub fn strip_code_fences(text: &str) -> &str {
    let mut body = text.trim();
    if let Some(rest) = body.strip_prefix("```") {
        // Drop the info string ("json") up to the end of the fence line
        body = match rest.find('\n') {
            Some(idx) => &rest[idx + 1..],
            None => rest.trim_start_matches("json"),
        };
    }
    if let Some(rest) = body.trim_end().strip_suffix("```") {
        body = rest;
    }
    body.trim()
}

impl AnalysisDocument {
    /// Parse and validate a raw engine reply.
    pub fn from_response_text(text: &str) -> Result<Self, AnalysisError> {
        let value: Value = serde_json::from_str(strip_code_fences(text))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, AnalysisError> {
        if let Err(e) = validate_structure(&value) {
            tracing::warn!(error = %e, "rejecting analysis response");
            return Err(e);
        }
        serde_json::from_value(value)
            .map_err(|e| AnalysisError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal() -> Value {
        json!({
            "timeline": [],
            "anomalies": [],
            "clock_issues": [],
            "causality_analysis": {
                "probable_root_cause": "slow inventory query",
                "dependency_chain": "database -> payment-service -> api-gateway"
            },
            "attention_priority": [],
            "summary": "Database latency exhausted the payment timeout."
        })
    }

    #[test]
    fn minimal_document_is_accepted() {
        let doc = AnalysisDocument::from_value(minimal()).unwrap();
        assert_eq!(doc.summary, "Database latency exhausted the payment timeout.");
        assert!(doc.timeline.is_empty());
    }

    #[test]
    fn each_missing_field_is_rejected() {
        for (field, _) in REQUIRED_FIELDS {
            let mut value = minimal();
            value.as_object_mut().unwrap().remove(field);

            let err = AnalysisDocument::from_value(value).unwrap_err();
            assert!(
                err.to_string().contains(field),
                "error for missing `{}` should name it: {}",
                field,
                err
            );
        }
    }

    #[test]
    fn wrong_types_are_rejected() {
        let mut value = minimal();
        value["timeline"] = json!({"not": "an array"});
        assert!(matches!(
            validate_structure(&value),
            Err(AnalysisError::InvalidResponse(_))
        ));

        let mut value = minimal();
        value["summary"] = json!(42);
        assert!(validate_structure(&value).is_err());

        let mut value = minimal();
        value["causality_analysis"] = Value::Null;
        assert!(validate_structure(&value).is_err());
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(validate_structure(&json!([1, 2, 3])).is_err());
    }

    #[test]
    fn fenced_reply_is_unwrapped() {
        let text = format!("```json\n{}\n```", minimal());
        let doc = AnalysisDocument::from_response_text(&text).unwrap();
        assert_eq!(doc.causality_analysis.probable_root_cause, "slow inventory query");
    }

    #[test]
    fn bare_fence_without_language() {
        let text = format!("```\n{}\n```\n", minimal());
        assert!(AnalysisDocument::from_response_text(&text).is_ok());
    }

    #[test]
    fn unfenced_reply_passes_through() {
        assert_eq!(strip_code_fences("  {\"a\":1}  "), "{\"a\":1}");
    }

    #[test]
    fn garbage_is_a_json_error() {
        let err = AnalysisDocument::from_response_text("I could not analyze these logs").unwrap_err();
        assert!(matches!(err, AnalysisError::Json(_)));
    }

    #[test]
    fn full_document_round_trips_fields() {
        let text = r#"{
            "timeline": [
                {"timestamp": "2024-02-07T14:23:00.891Z", "service": "api-gateway",
                 "event": "Received POST /api/v1/checkout", "confidence": "high"},
                {"timestamp": "2024-02-07T14:23:01.237Z", "service": "payment-service",
                 "event": "Stripe API call failed", "confidence": "medium",
                 "ambiguity_note": "clock is 3h ahead"}
            ],
            "anomalies": [
                {"service": "payment-service", "issue": "timeout", "severity": "critical"}
            ],
            "clock_issues": [
                {"service": "payment-service", "issue": "+3h skew", "evidence": "17:23 vs 14:23"}
            ],
            "causality_analysis": {
                "probable_root_cause": "slow query",
                "misleading_evidence": "Stripe timeout",
                "dependency_chain": "db -> payment -> gateway"
            },
            "attention_priority": [
                {"priority": 1, "focus_area": "inventory query", "reasoning": "consumed 2.8s"}
            ],
            "summary": "Slow query starved the payment call."
        }"#;

        let doc = AnalysisDocument::from_response_text(text).unwrap();
        assert_eq!(doc.timeline.len(), 2);
        assert_eq!(doc.timeline[1].ambiguity_note.as_deref(), Some("clock is 3h ahead"));
        assert_eq!(doc.attention_priority[0].rank, 1);
        assert_eq!(doc.clock_issues[0].evidence, "17:23 vs 14:23");
        assert!(doc.flags("payment-service", crate::analysis::Severity::Critical));
        assert!(!doc.flags("api-gateway", crate::analysis::Severity::Critical));
    }
}
