//! Model: LogweaveConfig and related structs.

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisContext;
use crate::parser::DETECTION_SAMPLE_SIZE;
use crate::trace::OrphanPolicy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogweaveConfig {
    /// Leading lines sampled for service-pattern detection
    pub sample_size: usize,
    pub orphan_policy: OrphanPolicy,
    pub output: OutputFormat,
    /// Free text forwarded with every analysis request
    pub context: AnalysisContext,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}

impl Default for LogweaveConfig {
    fn default() -> Self {
        Self {
            sample_size: DETECTION_SAMPLE_SIZE,
            orphan_policy: OrphanPolicy::default(),
            output: OutputFormat::default(),
            context: AnalysisContext::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Defaults ─────────────────────────────────────────────────

    #[test]
    fn test_config_defaults() {
        let cfg = LogweaveConfig::default();
        assert_eq!(cfg.sample_size, 20);
        assert_eq!(cfg.orphan_policy, OrphanPolicy::Promote);
        assert_eq!(cfg.output, OutputFormat::Text);
        assert!(cfg.context.architecture.is_none());
    }

    #[test]
    fn test_output_format_parses() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    // ── TOML ─────────────────────────────────────────────────────

    #[test]
    fn test_config_deserialize_partial_toml() {
        // Only set orphan_policy; rest should use defaults via #[serde(default)]
        let cfg: LogweaveConfig =
            toml::from_str(r#"orphan_policy = "drop""#).expect("Should accept partial TOML");
        assert_eq!(cfg.orphan_policy, OrphanPolicy::Drop);
        assert_eq!(cfg.sample_size, 20);
        assert_eq!(cfg.output, OutputFormat::Text);
    }

    #[test]
    fn test_config_context_table() {
        let toml_str = r#"
            output = "json"

            [context]
            architecture = "api-gateway -> payment-service -> stripe"
            time_window = "14:23:00-14:24:00"
        "#;
        let cfg: LogweaveConfig = toml::from_str(toml_str).expect("Should parse context table");
        assert_eq!(cfg.output, OutputFormat::Json);
        assert_eq!(
            cfg.context.architecture.as_deref(),
            Some("api-gateway -> payment-service -> stripe")
        );
        assert_eq!(cfg.context.time_window.as_deref(), Some("14:23:00-14:24:00"));
        assert!(cfg.context.user_context.is_none());
    }

    #[test]
    fn test_config_rejects_unknown_policy() {
        assert!(toml::from_str::<LogweaveConfig>(r#"orphan_policy = "keep""#).is_err());
    }
}
