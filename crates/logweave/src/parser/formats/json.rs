use serde_json::Value;

use crate::parser::traits::*;

/// Fields consulted for the service name, in priority order.
const SERVICE_FIELDS: [&str; 3] = ["service", "service_name", "app"];

/// JSON-lines logs: one object per line carrying the service name.
pub struct JsonStrategy;

impl ServiceStrategy for JsonStrategy {
    fn matches(&self, line: &str) -> bool {
        line.trim_start().starts_with('{')
    }

    fn extract(&self, line: &str) -> Option<String> {
        // Lines that are not valid JSON simply carry no service
        let value: Value = serde_json::from_str(line).ok()?;
        let obj = value.as_object()?;
        extract_string_field(obj, &SERVICE_FIELDS)
    }

    fn kind(&self) -> PatternKind {
        PatternKind::Json
    }
}

/// First field whose value is a non-empty string (or a number).
fn extract_string_field(obj: &serde_json::Map<String, Value>, field_names: &[&str]) -> Option<String> {
    for field in field_names {
        let result = match obj.get(*field) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };

        if result.is_some() {
            return result;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_leading_brace() {
        assert!(JsonStrategy.matches(r#"{"service":"api"}"#));
        assert!(JsonStrategy.matches(r#"   {"app":"web"}"#));
        assert!(!JsonStrategy.matches("service=api {json later}"));
    }

    #[test]
    fn test_field_priority() {
        let line = r#"{"app":"c","service_name":"b","service":"a"}"#;
        assert_eq!(JsonStrategy.extract(line), Some("a".to_string()));

        let line = r#"{"app":"c","service_name":"b"}"#;
        assert_eq!(JsonStrategy.extract(line), Some("b".to_string()));

        let line = r#"{"app":"c"}"#;
        assert_eq!(JsonStrategy.extract(line), Some("c".to_string()));
    }

    #[test]
    fn test_empty_string_falls_through() {
        let line = r#"{"service":"","app":"worker"}"#;
        assert_eq!(JsonStrategy.extract(line), Some("worker".to_string()));
    }

    #[test]
    fn test_invalid_json_is_not_found() {
        assert_eq!(JsonStrategy.extract("{broken"), None);
        assert_eq!(JsonStrategy.extract("plain text line"), None);
    }

    #[test]
    fn test_non_object_json_is_not_found() {
        assert_eq!(JsonStrategy.extract(r#"["service","api"]"#), None);
    }

    #[test]
    fn test_object_without_service_fields() {
        assert_eq!(JsonStrategy.extract(r#"{"level":"info","msg":"hi"}"#), None);
    }
}
